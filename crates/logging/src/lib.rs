#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the verbosity flag system shared by the filter engine
//! workspace. Diagnostics are grouped into info and debug categories
//! ([`InfoFlag`], [`DebugFlag`]) with per-category levels, mirroring the
//! `--info=FLAG[N]` / `--debug=FLAG[N]` style of configuration.
//!
//! # Design
//!
//! - [`VerbosityConfig`] holds the levels and can be derived from a single
//!   `-v` count or refined with flag tokens such as `filter2`.
//! - Configuration and captured events live in thread-local storage, so the
//!   single-owner stages of a filter pass can log without locking.
//! - [`info_log!`] and [`debug_log!`] check the level before formatting.
//! - With the `tracing` feature, `FilterLogLayer` routes `tracing` events
//!   with `xfer::*` targets through the same flag checks.
//!
//! # Examples
//!
//! ```
//! use logging::{VerbosityConfig, debug_log, drain_events, init};
//!
//! let mut config = VerbosityConfig::from_verbose_level(3);
//! config.apply_debug_flag("scope2").unwrap();
//! init(config);
//!
//! debug_log!(Scope, 2, "rejected {} outside scope", "other/file");
//! assert_eq!(drain_events().len(), 1);
//! ```

mod config;
mod levels;
mod macros;
mod thread_local;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use thread_local::{
    DiagnosticEvent, MAX_BUFFERED_EVENTS, apply_debug_flag, apply_info_flag, debug_gte,
    drain_events, dropped_events, emit_debug, emit_info, info_gte, init,
};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{FilterLogLayer, init_tracing};
