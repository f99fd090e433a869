//! crates/logging/src/thread_local.rs
//! Thread-local storage for verbosity configuration and event collection.

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Events kept per thread between drains; older events are discarded first.
pub const MAX_BUFFERED_EVENTS: usize = 4096;

thread_local! {
    static VERBOSITY: RefCell<VerbosityConfig> = RefCell::new(VerbosityConfig::default());
    #[allow(clippy::missing_const_for_thread_local)]
    static EVENTS: RefCell<VecDeque<DiagnosticEvent>> = RefCell::new(VecDeque::new());
    static DROPPED: Cell<usize> = const { Cell::new(0) };
}

/// Diagnostic event collected during execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// Info-level diagnostic event.
    Info {
        /// The info flag category.
        flag: InfoFlag,
        /// The verbosity level.
        level: u8,
        /// The diagnostic message.
        message: String,
    },
    /// Debug-level diagnostic event.
    Debug {
        /// The debug flag category.
        flag: DebugFlag,
        /// The verbosity level.
        level: u8,
        /// The diagnostic message.
        message: String,
    },
}

impl DiagnosticEvent {
    /// Returns the rendered message.
    pub fn message(&self) -> &str {
        match self {
            Self::Info { message, .. } | Self::Debug { message, .. } => message,
        }
    }
}

/// Initialize verbosity configuration for the current thread.
pub fn init(config: VerbosityConfig) {
    VERBOSITY.with(|v| {
        *v.borrow_mut() = config;
    });
}

/// Check if the info flag is at or above the specified level.
pub fn info_gte(flag: InfoFlag, level: u8) -> bool {
    VERBOSITY.with(|v| v.borrow().info.get(flag) >= level)
}

/// Check if the debug flag is at or above the specified level.
pub fn debug_gte(flag: DebugFlag, level: u8) -> bool {
    VERBOSITY.with(|v| v.borrow().debug.get(flag) >= level)
}

fn push_event(event: DiagnosticEvent) {
    EVENTS.with(|e| {
        let mut events = e.borrow_mut();
        if events.len() == MAX_BUFFERED_EVENTS {
            events.pop_front();
            DROPPED.with(|d| d.set(d.get() + 1));
        }
        events.push_back(event);
    });
}

/// Emit an info diagnostic event.
pub fn emit_info(flag: InfoFlag, level: u8, message: String) {
    push_event(DiagnosticEvent::Info {
        flag,
        level,
        message,
    });
}

/// Emit a debug diagnostic event.
pub fn emit_debug(flag: DebugFlag, level: u8, message: String) {
    push_event(DiagnosticEvent::Debug {
        flag,
        level,
        message,
    });
}

/// Drain all collected events, clearing the internal buffer.
///
/// The buffer holds at most [`MAX_BUFFERED_EVENTS`]; callers that enable
/// verbose flags over long runs should drain it periodically.
pub fn drain_events() -> Vec<DiagnosticEvent> {
    DROPPED.with(|d| d.set(0));
    EVENTS.with(|e| e.borrow_mut().drain(..).collect())
}

/// Events discarded because the buffer was full since the last drain.
pub fn dropped_events() -> usize {
    DROPPED.with(Cell::get)
}

/// Apply an info flag token to the current configuration.
pub fn apply_info_flag(token: &str) -> Result<(), String> {
    VERBOSITY.with(|v| v.borrow_mut().apply_info_flag(token))
}

/// Apply a debug flag token to the current configuration.
pub fn apply_debug_flag(token: &str) -> Result<(), String> {
    VERBOSITY.with(|v| v.borrow_mut().apply_debug_flag(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_controls_level_checks() {
        let mut config = VerbosityConfig::default();
        config.info.filter = 2;
        config.debug.ancestor = 3;

        init(config);

        assert!(info_gte(InfoFlag::Filter, 1));
        assert!(info_gte(InfoFlag::Filter, 2));
        assert!(!info_gte(InfoFlag::Filter, 3));
        assert!(debug_gte(DebugFlag::Ancestor, 3));
        assert!(!debug_gte(DebugFlag::Scope, 1));
    }

    #[test]
    fn emitted_events_drain_in_order() {
        init(VerbosityConfig::default());
        drain_events();

        emit_info(InfoFlag::Stats, 1, "pass complete".to_string());
        emit_debug(DebugFlag::Scope, 2, "outside scope".to_string());

        let events = drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            DiagnosticEvent::Info {
                flag: InfoFlag::Stats,
                level: 1,
                message: "pass complete".to_string(),
            }
        );
        assert_eq!(events[1].message(), "outside scope");
        assert!(drain_events().is_empty());
    }

    #[test]
    fn buffer_keeps_only_the_newest_events() {
        init(VerbosityConfig::default());
        drain_events();

        for index in 0..MAX_BUFFERED_EVENTS + 3 {
            emit_debug(DebugFlag::Filter, 2, format!("event {index}"));
        }

        assert_eq!(dropped_events(), 3);
        let events = drain_events();
        assert_eq!(events.len(), MAX_BUFFERED_EVENTS);
        assert_eq!(events[0].message(), "event 3");
        assert_eq!(dropped_events(), 0);
    }

    #[test]
    fn apply_tokens_on_current_thread() {
        init(VerbosityConfig::default());
        apply_debug_flag("filter2").unwrap();
        apply_info_flag("remove").unwrap();
        assert!(debug_gte(DebugFlag::Filter, 2));
        assert!(info_gte(InfoFlag::Remove, 1));
        assert!(apply_info_flag("").is_err());
    }
}
