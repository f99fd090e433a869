use logging::{debug_log, info_log};

use crate::debug_filter::{trace_item_decision, trace_pass_summary};
use crate::{
    AncestorMaterializer, CancellationToken, EnumeratedItem, FilterRecord, FilterSet,
    MaterializeSummary, MaterializerOptions, OperationKind, PassError, RejectReason, Verdict,
};

/// Drives one enumeration through a [`FilterSet`] and an
/// [`AncestorMaterializer`].
///
/// Items may be pushed one at a time as the enumerator produces them, or a
/// whole batch can be handed to [`run`](Self::run). Logging happens on the
/// thread that owns the pass.
///
/// # Examples
///
/// ```
/// use filters::{EnumeratedItem, FilterOptions, FilterPass, FilterSet, OperationKind};
/// use std::time::SystemTime;
///
/// let set = FilterSet::from_options(
///     &FilterOptions::new(OperationKind::Copy)
///         .recursive(true)
///         .include_path("sub/subsub"),
/// )
/// .unwrap();
///
/// let now = SystemTime::now();
/// let items = vec![
///     EnumeratedItem::folder("sub", now),
///     EnumeratedItem::folder("sub/subsub", now),
///     EnumeratedItem::file("sub/subsub/filea", now, 1),
///     EnumeratedItem::file("sub/fileb", now, 1),
/// ];
///
/// let mut forwarded = Vec::new();
/// FilterPass::new(set)
///     .run(items, |record| {
///         if record.is_accepted() {
///             forwarded.push(record.path().to_string());
///         }
///     })
///     .unwrap();
/// assert_eq!(forwarded, ["sub", "sub/subsub", "sub/subsub/filea"]);
/// ```
#[derive(Debug)]
pub struct FilterPass {
    set: FilterSet,
    materializer: AncestorMaterializer,
    cancel: CancellationToken,
    processed: usize,
}

impl FilterPass {
    /// Creates a pass with a folder-aware materializer.
    #[must_use]
    pub fn new(set: FilterSet) -> Self {
        Self::with_options(set, MaterializerOptions::default())
    }

    /// Creates a pass with explicit materializer options.
    ///
    /// Remove passes never forward ancestors: a removal scheduler acts on
    /// every accepted folder, so only items inside the scope may be accepted.
    #[must_use]
    pub fn with_options(set: FilterSet, options: MaterializerOptions) -> Self {
        let options = if set.operation() == OperationKind::Remove && options.is_folder_aware() {
            debug_log!(Ancestor, 1, "ancestor forwarding disabled for remove");
            options.folder_aware(false)
        } else {
            options
        };
        Self {
            set,
            materializer: AncestorMaterializer::with_options(options),
            cancel: CancellationToken::new(),
            processed: 0,
        }
    }

    /// Attaches a cancellation token checked before every item.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The filter set in use.
    #[must_use]
    pub const fn filter_set(&self) -> &FilterSet {
        &self.set
    }

    /// Items evaluated so far.
    #[must_use]
    pub const fn processed(&self) -> usize {
        self.processed
    }

    /// Decides and materializes one item.
    ///
    /// # Errors
    ///
    /// Returns [`PassError::Cancelled`] once the token fires, or
    /// [`PassError::Materialize`] after [`finish`](Self::finish).
    pub fn push(&mut self, item: &EnumeratedItem) -> Result<Vec<FilterRecord>, PassError> {
        self.check_cancelled()?;
        let verdict = self.set.decide(item);
        self.observe(item, verdict)
    }

    /// Flushes held folders and returns the pass totals.
    ///
    /// # Errors
    ///
    /// Returns [`PassError::Cancelled`] when the token fired before the
    /// flush.
    pub fn finish(mut self) -> Result<(Vec<FilterRecord>, MaterializeSummary), PassError> {
        self.check_cancelled()?;
        let (records, summary) = self.materializer.finalize()?;
        trace_pass_summary(&summary);
        Ok((records, summary))
    }

    /// Runs every item through the pass, handing each record to `sink`.
    ///
    /// # Errors
    ///
    /// Stops at the first [`PassError`]; records already handed to `sink`
    /// stay delivered.
    pub fn run<I, F>(mut self, items: I, mut sink: F) -> Result<MaterializeSummary, PassError>
    where
        I: IntoIterator<Item = EnumeratedItem>,
        F: FnMut(FilterRecord),
    {
        for item in items {
            self.push(&item)?.into_iter().for_each(&mut sink);
        }
        let (records, summary) = self.finish()?;
        records.into_iter().for_each(sink);
        Ok(summary)
    }

    /// Like [`run`](Self::run), but evaluates the filters on the rayon pool.
    ///
    /// Decisions are computed in parallel; materialization and logging then
    /// proceed in input order on the calling thread, so the record stream is
    /// identical to the sequential one.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    #[cfg(feature = "parallel")]
    pub fn run_parallel<F>(
        mut self,
        items: &[EnumeratedItem],
        mut sink: F,
    ) -> Result<MaterializeSummary, PassError>
    where
        F: FnMut(FilterRecord),
    {
        use rayon::prelude::*;

        self.check_cancelled()?;
        let set = &self.set;
        let verdicts: Vec<Verdict> = items.par_iter().map(|item| set.decide(item)).collect();

        for (item, verdict) in items.iter().zip(verdicts) {
            self.check_cancelled()?;
            self.observe(item, verdict)?.into_iter().for_each(&mut sink);
        }
        let (records, summary) = self.finish()?;
        records.into_iter().for_each(sink);
        Ok(summary)
    }

    fn observe(
        &mut self,
        item: &EnumeratedItem,
        verdict: Verdict,
    ) -> Result<Vec<FilterRecord>, PassError> {
        self.processed += 1;
        log_verdict(item, verdict);
        trace_item_decision(item.path(), item.is_folder(), verdict);
        Ok(self.materializer.observe(item, verdict)?)
    }

    fn check_cancelled(&mut self) -> Result<(), PassError> {
        if self.cancel.is_cancelled() {
            self.materializer.cancel();
            info_log!(Filter, 1, "filter pass cancelled after {} items", self.processed);
            return Err(PassError::Cancelled {
                processed: self.processed,
            });
        }
        Ok(())
    }
}

fn log_verdict(item: &EnumeratedItem, verdict: Verdict) {
    let kind = if item.is_folder() { "folder" } else { "file" };
    match verdict {
        Verdict::Rejected(RejectReason::OutOfScope) => {
            debug_log!(Scope, 1, "{kind} '{}' outside removal scope", item.path());
        }
        Verdict::Rejected(_) => {
            info_log!(Filter, 2, "{kind} '{}' {verdict}", item.path());
        }
        Verdict::Accepted(_) => {
            debug_log!(Filter, 1, "{kind} '{}' {verdict}", item.path());
        }
    }
}
