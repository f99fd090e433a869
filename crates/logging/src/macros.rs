//! crates/logging/src/macros.rs
//! Level-checked logging macros.
//!
//! Both macros test the thread-local verbosity before formatting, so disabled
//! categories cost a single lookup.

/// Record an info diagnostic when `flag` is at or above `level`.
///
/// # Example
/// ```
/// use logging::{VerbosityConfig, drain_events, info_log, init};
///
/// let mut config = VerbosityConfig::default();
/// config.info.stats = 1;
/// init(config);
///
/// info_log!(Stats, 1, "accepted {} items", 3);
/// info_log!(Stats, 2, "suppressed");
///
/// let events = drain_events();
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].message(), "accepted 3 items");
/// ```
#[macro_export]
macro_rules! info_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {
        if $crate::info_gte($crate::InfoFlag::$flag, $level) {
            $crate::emit_info($crate::InfoFlag::$flag, $level, format!($($arg)+));
        }
    };
}

/// Record a debug diagnostic when `flag` is at or above `level`.
///
/// # Example
/// ```
/// use logging::{VerbosityConfig, debug_log, drain_events, init};
///
/// let mut config = VerbosityConfig::default();
/// config.debug.ancestor = 2;
/// init(config);
///
/// debug_log!(Ancestor, 2, "synthesized {:?}", "sub");
/// debug_log!(Scope, 1, "suppressed");
///
/// assert_eq!(drain_events().len(), 1);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {
        if $crate::debug_gte($crate::DebugFlag::$flag, $level) {
            $crate::emit_debug($crate::DebugFlag::$flag, $level, format!($($arg)+));
        }
    };
}
