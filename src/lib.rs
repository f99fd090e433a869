#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `xfer_filter` bundles the enumeration-time filter engine with a local
//! directory enumerator. It re-exports the [`filters`], [`walk`] and
//! [`logging`] crates and adds [`LocalSource`], which walks a directory,
//! filters every entry and hands the resulting records to the caller.
//!
//! # Examples
//!
//! ```
//! use xfer_filter::{FilterOptions, LocalSource, OperationKind};
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! fs::create_dir_all(temp.path().join("logs"))?;
//! fs::write(temp.path().join("keep.txt"), b"data")?;
//! fs::write(temp.path().join("logs/app.log"), b"data")?;
//!
//! let options = FilterOptions::new(OperationKind::Copy)
//!     .recursive(true)
//!     .exclude_pattern("*.log");
//!
//! let mut forwarded = Vec::new();
//! LocalSource::new(temp.path(), options).run(|record| {
//!     if record.is_accepted() {
//!         forwarded.push(record.path().to_string());
//!     }
//! })?;
//! assert_eq!(forwarded, ["", "keep.txt", "logs"]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

use std::path::PathBuf;

use logging::info_log;
use thiserror::Error;

pub use filters::{
    AcceptReason, AncestorMaterializer, CancellationToken, EnumeratedItem, FilterCategory,
    FilterError, FilterKind, FilterOptions, FilterPass, FilterRecord, FilterSet, MaterializeError,
    MaterializeSummary, MaterializerOptions, MaterializerState, OperationKind, PassError,
    RecordAction, RejectReason, RelativePath, ScopeRestriction, Verdict,
};
pub use walk::{WalkBuilder, WalkEntry, WalkError};
pub use filters;
pub use logging;
pub use walk;

/// Failure while filtering a local source tree.
#[derive(Debug, Error)]
pub enum Error {
    /// The filter configuration was rejected.
    #[error(transparent)]
    Filter(#[from] FilterError),
    /// The source tree could not be enumerated.
    #[error(transparent)]
    Walk(#[from] WalkError),
    /// The filter pass stopped early.
    #[error(transparent)]
    Pass(#[from] PassError),
}

/// Filters the contents of a local directory.
///
/// The walker recurses when the options are recursive or a remove scope is
/// configured, so a scope may name an item at any depth.
#[derive(Clone, Debug)]
pub struct LocalSource {
    root: PathBuf,
    options: FilterOptions,
    materializer: MaterializerOptions,
    cancel: CancellationToken,
}

impl LocalSource {
    /// Prepares a run over `root` with `options`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, options: FilterOptions) -> Self {
        Self {
            root: root.into(),
            options,
            materializer: MaterializerOptions::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Overrides the materializer options.
    #[must_use]
    pub const fn materializer(mut self, options: MaterializerOptions) -> Self {
        self.materializer = options;
        self
    }

    /// Attaches a cancellation token.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Walks, filters and materializes, handing every record to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Filter`] before touching the filesystem when the
    /// options are malformed, [`Error::Walk`] on the first I/O failure, and
    /// [`Error::Pass`] on cancellation.
    pub fn run<F>(self, mut sink: F) -> Result<MaterializeSummary, Error>
    where
        F: FnMut(FilterRecord),
    {
        let set = FilterSet::from_options(&self.options)?;
        let recursive = set.is_recursive() || set.category(FilterKind::ScopeRestriction).is_some();
        let walker = WalkBuilder::new(&self.root).recursive(recursive).build()?;

        let mut pass = FilterPass::with_options(set, self.materializer)
            .with_cancellation(self.cancel);
        for entry in walker {
            let item = entry?.into_item();
            pass.push(&item)?.into_iter().for_each(&mut sink);
        }

        let (held, summary) = pass.finish()?;
        held.into_iter().for_each(sink);
        info_log!(Stats, 1, "{}: {}", self.root.display(), summary);
        Ok(summary)
    }
}
