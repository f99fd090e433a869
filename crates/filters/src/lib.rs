#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` decides, item by item, which enumerated files and folders a
//! copy, sync or remove job should act on. Users configure up to six filter
//! categories as semicolon-separated strings: root-anchored include and
//! exclude paths, basename include and exclude globs, a modification-time
//! threshold, and (for removal) a scope restriction. The crate compiles
//! those strings once, evaluates every item against them, and keeps the
//! resulting stream structurally sound by forwarding the parent folders of
//! accepted items.
//!
//! # Design
//!
//! - [`FilterOptions`] holds the raw configuration; [`FilterSet::from_options`]
//!   parses it into [`FilterCategory`] values, rejecting malformed entries
//!   with [`FilterError`] before enumeration begins.
//! - [`FilterSet::decide`] is a pure function of the set and one
//!   [`EnumeratedItem`], returning a [`Verdict`] that names the deciding
//!   category. A set is immutable and shareable across threads.
//! - [`AncestorMaterializer`] turns verdicts into ordered [`FilterRecord`]s,
//!   emitting each needed ancestor folder once and holding rejected folders
//!   until it knows whether a descendant needs them.
//! - [`FilterPass`] wires the two together for one enumeration, with
//!   cancellation and (behind the `parallel` feature) rayon-backed
//!   evaluation.
//!
//! # Invariants
//!
//! - Exclude categories win over include categories.
//! - Configured include categories combine with AND; entries within one
//!   category combine with OR.
//! - Path entries match whole segments from the source root, so
//!   `sub/subsub` covers `sub/subsub/filea` but not `othersub/sub/subsub`.
//! - Glob entries match the basename only; `*` may match an empty run.
//! - Include-after is strict: an item modified exactly at the threshold is
//!   rejected.
//! - The source root is never synthesized as an ancestor.
//!
//! # Errors
//!
//! [`FilterSet::from_options`] reports [`FilterError`] for `..` segments,
//! unbalanced glob syntax, globs containing `/`, and non-RFC 3339
//! thresholds. [`FilterPass`] reports [`PassError`] on cancellation or
//! misuse of the materializer lifecycle.
//!
//! # Examples
//!
//! ```
//! use filters::{EnumeratedItem, FilterOptions, FilterSet, OperationKind};
//! use std::time::SystemTime;
//!
//! let filters = FilterSet::from_options(
//!     &FilterOptions::new(OperationKind::Copy)
//!         .recursive(true)
//!         .exclude_pattern("*.log;2020*;*mid*;excludeFile"),
//! )
//! .expect("filters compile");
//!
//! let now = SystemTime::now();
//! assert!(filters.allows(&EnumeratedItem::file("sample.txt", now, 10)));
//! assert!(!filters.allows(&EnumeratedItem::file("subdir/A2020.log", now, 10)));
//! ```
//!
//! # See also
//!
//! - `walk` produces [`EnumeratedItem`]s from a local directory tree.
//! - [`globset`] for the glob matching primitives used internally.

mod cancel;
mod category;
pub mod debug_filter;
mod decision;
mod error;
mod glob;
mod item;
mod materialize;
mod options;
mod pass;
mod path_pattern;
mod record;
mod set;

pub use cancel::CancellationToken;
pub use category::{FilterCategory, FilterKind, ScopeRestriction};
pub use decision::{AcceptReason, RejectReason, Verdict};
pub use error::{FilterError, MaterializeError, PassError};
pub use glob::{GlobPattern, GlobPatternList};
pub use item::{EnumeratedItem, RelativePath};
pub use materialize::{
    AncestorMaterializer, MaterializeSummary, MaterializerOptions, MaterializerState,
};
pub use options::{FilterOptions, OperationKind};
pub use pass::FilterPass;
pub use path_pattern::{PathPattern, PathPatternList, segments_match};
pub use record::{FilterRecord, RecordAction};
pub use set::FilterSet;
