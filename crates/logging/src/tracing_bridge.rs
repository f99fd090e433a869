//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the verbosity flag system.
//!
//! [`FilterLogLayer`] is a `tracing-subscriber` layer that maps events whose
//! target names a filter-engine subsystem (`xfer::filter`, `xfer::enum`,
//! `xfer::ancestor`, `xfer::scope`, `xfer::remove`, `xfer::stats`) onto the
//! info and debug flags, recording them through the thread-local event buffer
//! when the configured level allows it.
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(2));
//! tracing::debug!(target: "xfer::scope", "outside scope");
//! ```

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use super::thread_local::{debug_gte, emit_debug, emit_info, info_gte};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// A tracing layer that routes events into the verbosity system.
pub struct FilterLogLayer {
    _config: VerbosityConfig,
}

impl FilterLogLayer {
    /// Create a new layer with the given verbosity configuration.
    #[must_use]
    pub const fn new(config: VerbosityConfig) -> Self {
        Self { _config: config }
    }

    fn subsystem(target: &str) -> &str {
        target.rsplit("::").next().unwrap_or(target)
    }

    /// Map a tracing target to an info flag.
    fn target_to_info_flag(target: &str) -> Option<InfoFlag> {
        match Self::subsystem(target) {
            "filter" => Some(InfoFlag::Filter),
            "enum" | "enumerate" => Some(InfoFlag::Enum),
            "remove" => Some(InfoFlag::Remove),
            "stats" => Some(InfoFlag::Stats),
            _ => None,
        }
    }

    /// Map a tracing target to a debug flag.
    ///
    /// Only the last path component is compared, so `mod::unknown` never
    /// resolves to a flag by substring.
    fn target_to_debug_flag(target: &str) -> Option<DebugFlag> {
        match Self::subsystem(target) {
            "filter" => Some(DebugFlag::Filter),
            "enum" | "enumerate" => Some(DebugFlag::Enum),
            "ancestor" => Some(DebugFlag::Ancestor),
            "scope" => Some(DebugFlag::Scope),
            _ => None,
        }
    }

    const fn level_to_verbosity_level(level: &Level) -> u8 {
        match *level {
            Level::ERROR | Level::WARN | Level::INFO => 1,
            Level::DEBUG => 2,
            Level::TRACE => 3,
        }
    }
}

impl<S> Layer<S> for FilterLogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        let level = metadata.level();
        let verbosity_level = Self::level_to_verbosity_level(level);
        let is_debug = matches!(*level, Level::DEBUG | Level::TRACE);

        if is_debug {
            if let Some(flag) = Self::target_to_debug_flag(target) {
                if debug_gte(flag, verbosity_level) {
                    if let Some(message) = extract_message(event) {
                        emit_debug(flag, verbosity_level, message);
                    }
                }
                return;
            }
        }

        if let Some(flag) = Self::target_to_info_flag(target) {
            if info_gte(flag, verbosity_level) {
                if let Some(message) = extract_message(event) {
                    emit_info(flag, verbosity_level, message);
                }
            }
        }
    }
}

fn extract_message(event: &tracing::Event<'_>) -> Option<String> {
    let mut visitor = MessageVisitor::default();
    event.record(&mut visitor);
    visitor.message
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Install a global subscriber that routes tracing events through
/// [`FilterLogLayer`].
///
/// Also initialises the calling thread's verbosity configuration. Fails
/// silently if a global subscriber is already installed.
pub fn init_tracing(config: VerbosityConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config.clone());

    let _ = tracing_subscriber::registry()
        .with(FilterLogLayer::new(config))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drain_events;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn targets_map_to_info_flags() {
        assert_eq!(
            FilterLogLayer::target_to_info_flag("xfer::filter"),
            Some(InfoFlag::Filter)
        );
        assert_eq!(
            FilterLogLayer::target_to_info_flag("xfer::stats"),
            Some(InfoFlag::Stats)
        );
        assert_eq!(FilterLogLayer::target_to_info_flag("unknown"), None);
    }

    #[test]
    fn targets_map_to_debug_flags() {
        assert_eq!(
            FilterLogLayer::target_to_debug_flag("xfer::ancestor"),
            Some(DebugFlag::Ancestor)
        );
        assert_eq!(
            FilterLogLayer::target_to_debug_flag("scope"),
            Some(DebugFlag::Scope)
        );
        assert_eq!(FilterLogLayer::target_to_debug_flag("xfer::unscoped"), None);
    }

    #[test]
    fn levels_map_to_verbosity() {
        assert_eq!(FilterLogLayer::level_to_verbosity_level(&Level::WARN), 1);
        assert_eq!(FilterLogLayer::level_to_verbosity_level(&Level::DEBUG), 2);
        assert_eq!(FilterLogLayer::level_to_verbosity_level(&Level::TRACE), 3);
    }

    #[test]
    fn layer_records_enabled_events() {
        let mut config = VerbosityConfig::default();
        config.debug.scope = 2;
        crate::init(config.clone());
        drain_events();

        let subscriber = tracing_subscriber::registry().with(FilterLogLayer::new(config));
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "xfer::scope", "item outside scope");
            tracing::debug!(target: "xfer::ancestor", "not enabled");
        });

        let events = drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message(), "item outside scope");
    }
}
