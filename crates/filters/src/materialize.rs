//! Ancestor materialization for the filtered item stream.
//!
//! Filters judge each item on its own, so an accepted `sub/subsub/filea`
//! may sit below folders that were themselves rejected. The job still has
//! to create those folders first. [`AncestorMaterializer`] sits between the
//! decision function and the job and forwards every proper ancestor of an
//! accepted item (the source root excluded) exactly once, before the item.
//!
//! Rejected files are reported immediately. Rejected folders are held back
//! because a later descendant may still pull them in as ancestors; whatever
//! remains is reported as rejected by [`AncestorMaterializer::finalize`].

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use logging::{debug_log, info_log};

use crate::debug_filter::trace_ancestor_emitted;
use crate::{EnumeratedItem, FilterRecord, MaterializeError, RelativePath, Verdict};

/// Tuning for an [`AncestorMaterializer`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MaterializerOptions {
    folder_aware: bool,
}

impl Default for MaterializerOptions {
    fn default() -> Self {
        Self { folder_aware: true }
    }
}

impl MaterializerOptions {
    /// Options with ancestor synthesis enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables ancestor synthesis.
    ///
    /// Jobs whose destination has no folder concept (flat namespaces)
    /// disable it; records are then forwarded exactly as decided.
    #[must_use]
    pub const fn folder_aware(mut self, folder_aware: bool) -> Self {
        self.folder_aware = folder_aware;
        self
    }

    /// Returns `true` when ancestors are synthesized.
    #[must_use]
    pub const fn is_folder_aware(&self) -> bool {
        self.folder_aware
    }
}

/// Lifecycle of an [`AncestorMaterializer`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MaterializerState {
    /// Nothing observed yet.
    Idle,
    /// Items are being observed.
    Accumulating,
    /// Flushing rejected folders.
    Finalizing,
    /// Finished; no further calls are accepted.
    Done,
    /// Cancelled; pending state was discarded.
    Cancelled,
}

impl fmt::Display for MaterializerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Accumulating => "accumulating",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        })
    }
}

/// Counts of the records a materializer emitted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MaterializeSummary {
    accepted_files: usize,
    accepted_folders: usize,
    synthesized_ancestors: usize,
    rejected_files: usize,
    rejected_folders: usize,
}

impl MaterializeSummary {
    /// Files forwarded into the job.
    #[must_use]
    pub const fn accepted_files(&self) -> usize {
        self.accepted_files
    }

    /// Folders forwarded into the job, ancestors included.
    #[must_use]
    pub const fn accepted_folders(&self) -> usize {
        self.accepted_folders
    }

    /// Forwarded ancestors the enumerator never reported.
    #[must_use]
    pub const fn synthesized_ancestors(&self) -> usize {
        self.synthesized_ancestors
    }

    /// Files reported as rejected.
    #[must_use]
    pub const fn rejected_files(&self) -> usize {
        self.rejected_files
    }

    /// Folders reported as rejected.
    #[must_use]
    pub const fn rejected_folders(&self) -> usize {
        self.rejected_folders
    }

    /// Every forwarded record.
    #[must_use]
    pub const fn total_accepted(&self) -> usize {
        self.accepted_files + self.accepted_folders
    }

    fn record(&mut self, record: &FilterRecord) {
        let counter = match (record.is_accepted(), record.is_folder()) {
            (true, false) => &mut self.accepted_files,
            (true, true) => &mut self.accepted_folders,
            (false, false) => &mut self.rejected_files,
            (false, true) => &mut self.rejected_folders,
        };
        *counter += 1;
        if record.is_synthesized() {
            self.synthesized_ancestors += 1;
        }
    }
}

impl fmt::Display for MaterializeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files and {} folders accepted ({} synthesized), {} files and {} folders rejected",
            self.accepted_files,
            self.accepted_folders,
            self.synthesized_ancestors,
            self.rejected_files,
            self.rejected_folders
        )
    }
}

/// Stateful stage that turns per-item verdicts into an ordered record stream.
///
/// # Guarantees
///
/// - An accepted item's proper ancestors are emitted before it, top-down.
/// - Each folder is forwarded at most once, however many descendants or
///   duplicate reports reference it.
/// - A folder rejected on its own is forwarded anyway when any descendant
///   is accepted; otherwise it is reported as rejected at finalize.
/// - The work per observed item is bounded by its depth.
///
/// Ancestor emission does not depend on arrival order: a descendant may be
/// observed before its parent folder.
///
/// # Examples
///
/// ```
/// use filters::{AcceptReason, AncestorMaterializer, EnumeratedItem, RejectReason, Verdict};
/// use filters::FilterKind;
/// use std::time::SystemTime;
///
/// let now = SystemTime::now();
/// let rejected = Verdict::Rejected(RejectReason::NotIncluded(FilterKind::IncludePath));
/// let accepted = Verdict::Accepted(AcceptReason::SelfMatched);
///
/// let mut materializer = AncestorMaterializer::new();
/// assert!(materializer.observe(&EnumeratedItem::folder("sub", now), rejected).unwrap().is_empty());
///
/// let records = materializer
///     .observe(&EnumeratedItem::file("sub/subsub/filea", now, 3), accepted)
///     .unwrap();
/// let paths: Vec<String> = records.iter().map(|r| r.path().to_string()).collect();
/// assert_eq!(paths, ["sub", "sub/subsub", "sub/subsub/filea"]);
/// assert!(!records[0].is_synthesized());
/// assert!(records[1].is_synthesized());
/// ```
#[derive(Debug)]
pub struct AncestorMaterializer {
    options: MaterializerOptions,
    state: MaterializerState,
    emitted: HashSet<RelativePath>,
    pending: BTreeMap<RelativePath, Verdict>,
    summary: MaterializeSummary,
}

impl Default for AncestorMaterializer {
    fn default() -> Self {
        Self::new()
    }
}

impl AncestorMaterializer {
    /// Creates a folder-aware materializer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(MaterializerOptions::default())
    }

    /// Creates a materializer with explicit options.
    #[must_use]
    pub fn with_options(options: MaterializerOptions) -> Self {
        Self {
            options,
            state: MaterializerState::Idle,
            emitted: HashSet::new(),
            pending: BTreeMap::new(),
            summary: MaterializeSummary::default(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> MaterializerState {
        self.state
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> MaterializerOptions {
        self.options
    }

    /// Counts of the records emitted so far.
    #[must_use]
    pub const fn summary(&self) -> MaterializeSummary {
        self.summary
    }

    /// Number of rejected folders still waiting for a descendant.
    #[must_use]
    pub fn pending_folders(&self) -> usize {
        self.pending.len()
    }

    /// Feeds one decided item and returns the records ready for the job.
    ///
    /// # Errors
    ///
    /// Returns [`MaterializeError::Cancelled`] after [`cancel`](Self::cancel)
    /// and [`MaterializeError::InvalidState`] after [`finalize`](Self::finalize).
    pub fn observe(
        &mut self,
        item: &EnumeratedItem,
        verdict: Verdict,
    ) -> Result<Vec<FilterRecord>, MaterializeError> {
        self.ensure_open("observe")?;
        self.state = MaterializerState::Accumulating;

        let path = item.path();
        let mut records = Vec::new();

        if !self.options.folder_aware {
            self.push(
                &mut records,
                FilterRecord::observed(path.clone(), item.is_folder(), verdict),
            );
            return Ok(records);
        }

        if item.is_folder() && self.emitted.contains(path) {
            debug_log!(Ancestor, 2, "folder '{}' already forwarded", path);
            return Ok(records);
        }

        if verdict.is_accepted() {
            self.emit_ancestors(path, &mut records);
            if item.is_folder() {
                self.pending.remove(path);
                self.emitted.insert(path.clone());
            }
            self.push(
                &mut records,
                FilterRecord::observed(path.clone(), item.is_folder(), verdict),
            );
        } else if item.is_folder() {
            debug_log!(Ancestor, 2, "holding rejected folder '{}'", path);
            self.pending.insert(path.clone(), verdict);
        } else {
            self.push(
                &mut records,
                FilterRecord::observed(path.clone(), false, verdict),
            );
        }

        Ok(records)
    }

    /// Reports every rejected folder that no accepted descendant claimed.
    ///
    /// Folders are returned in path order.
    ///
    /// # Errors
    ///
    /// Returns [`MaterializeError::Cancelled`] after [`cancel`](Self::cancel)
    /// and [`MaterializeError::InvalidState`] when called twice.
    pub fn finalize(&mut self) -> Result<(Vec<FilterRecord>, MaterializeSummary), MaterializeError> {
        self.ensure_open("finalize")?;
        self.state = MaterializerState::Finalizing;

        let pending = std::mem::take(&mut self.pending);
        let mut records = Vec::with_capacity(pending.len());
        for (path, verdict) in pending {
            self.push(&mut records, FilterRecord::observed(path, true, verdict));
        }

        self.state = MaterializerState::Done;
        info_log!(Stats, 1, "{}", self.summary);
        Ok((records, self.summary))
    }

    /// Stops the materializer and discards held folders.
    ///
    /// Has no effect once finalized.
    pub fn cancel(&mut self) {
        if self.state == MaterializerState::Done {
            return;
        }
        if !self.pending.is_empty() {
            debug_log!(
                Ancestor,
                1,
                "cancelled with {} held folders",
                self.pending.len()
            );
        }
        self.pending.clear();
        self.state = MaterializerState::Cancelled;
    }

    fn ensure_open(&self, operation: &'static str) -> Result<(), MaterializeError> {
        match self.state {
            MaterializerState::Idle | MaterializerState::Accumulating => Ok(()),
            MaterializerState::Cancelled => Err(MaterializeError::Cancelled),
            state @ (MaterializerState::Finalizing | MaterializerState::Done) => {
                Err(MaterializeError::InvalidState { state, operation })
            }
        }
    }

    fn emit_ancestors(&mut self, path: &RelativePath, records: &mut Vec<FilterRecord>) {
        // Walk upward until an already forwarded folder; everything above it
        // was forwarded together with it.
        let missing: Vec<RelativePath> = path
            .ancestors()
            .take_while(|ancestor| !self.emitted.contains(ancestor))
            .collect();

        for ancestor in missing.into_iter().rev() {
            let synthesized = self.pending.remove(&ancestor).is_none();
            debug_log!(
                Ancestor,
                1,
                "forwarding ancestor '{}'{}",
                ancestor,
                if synthesized { " (synthesized)" } else { "" }
            );
            trace_ancestor_emitted(&ancestor, synthesized);
            self.emitted.insert(ancestor.clone());
            self.push(records, FilterRecord::ancestor(ancestor, synthesized));
        }
    }

    fn push(&mut self, records: &mut Vec<FilterRecord>, record: FilterRecord) {
        self.summary.record(&record);
        records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AcceptReason, FilterKind, RejectReason};
    use std::time::SystemTime;

    const ACCEPT: Verdict = Verdict::Accepted(AcceptReason::SelfMatched);
    const REJECT: Verdict = Verdict::Rejected(RejectReason::NotIncluded(FilterKind::IncludePath));

    fn folder(path: &str) -> EnumeratedItem {
        EnumeratedItem::folder(path, SystemTime::UNIX_EPOCH)
    }

    fn file(path: &str) -> EnumeratedItem {
        EnumeratedItem::file(path, SystemTime::UNIX_EPOCH, 1)
    }

    fn paths(records: &[FilterRecord]) -> Vec<String> {
        records.iter().map(|r| r.path().to_string()).collect()
    }

    #[test]
    fn starts_idle_and_accumulates() {
        let mut materializer = AncestorMaterializer::new();
        assert_eq!(materializer.state(), MaterializerState::Idle);
        materializer.observe(&file("a"), ACCEPT).unwrap();
        assert_eq!(materializer.state(), MaterializerState::Accumulating);
        materializer.finalize().unwrap();
        assert_eq!(materializer.state(), MaterializerState::Done);
    }

    #[test]
    fn shared_ancestors_are_forwarded_once() {
        let mut materializer = AncestorMaterializer::new();
        let first = materializer.observe(&file("a/b/one"), ACCEPT).unwrap();
        let second = materializer.observe(&file("a/b/two"), ACCEPT).unwrap();
        let third = materializer.observe(&file("a/c/three"), ACCEPT).unwrap();

        assert_eq!(paths(&first), ["a", "a/b", "a/b/one"]);
        assert_eq!(paths(&second), ["a/b/two"]);
        assert_eq!(paths(&third), ["a/c", "a/c/three"]);
        assert!(first[..2].iter().all(FilterRecord::is_synthesized));
    }

    #[test]
    fn held_folder_is_forwarded_when_descendant_accepted() {
        let mut materializer = AncestorMaterializer::new();
        assert!(materializer.observe(&folder("sub"), REJECT).unwrap().is_empty());
        assert_eq!(materializer.pending_folders(), 1);

        let records = materializer.observe(&file("sub/wanted"), ACCEPT).unwrap();
        assert_eq!(paths(&records), ["sub", "sub/wanted"]);
        assert!(!records[0].is_synthesized());
        assert_eq!(materializer.pending_folders(), 0);

        let (rest, summary) = materializer.finalize().unwrap();
        assert!(rest.is_empty());
        assert_eq!(summary.accepted_folders(), 1);
        assert_eq!(summary.synthesized_ancestors(), 0);
    }

    #[test]
    fn unclaimed_rejected_folders_reported_at_finalize_in_path_order() {
        let mut materializer = AncestorMaterializer::new();
        materializer.observe(&folder("zeta"), REJECT).unwrap();
        materializer.observe(&folder("alpha"), REJECT).unwrap();
        let immediate = materializer.observe(&file("loose"), REJECT).unwrap();
        assert_eq!(paths(&immediate), ["loose"]);

        let (records, summary) = materializer.finalize().unwrap();
        assert_eq!(paths(&records), ["alpha", "zeta"]);
        assert!(records.iter().all(|r| !r.is_accepted() && r.is_folder()));
        assert_eq!(summary.rejected_folders(), 2);
        assert_eq!(summary.rejected_files(), 1);
    }

    #[test]
    fn folder_observed_after_forwarding_is_deduplicated() {
        let mut materializer = AncestorMaterializer::new();
        materializer.observe(&file("x/y/z"), ACCEPT).unwrap();
        assert!(materializer.observe(&folder("x"), ACCEPT).unwrap().is_empty());
        assert!(materializer.observe(&folder("x/y"), REJECT).unwrap().is_empty());
        let (records, summary) = materializer.finalize().unwrap();
        assert!(records.is_empty());
        assert_eq!(summary.accepted_folders(), 2);
        assert_eq!(summary.synthesized_ancestors(), 2);
    }

    #[test]
    fn accepted_folder_emits_ancestors_then_itself() {
        let mut materializer = AncestorMaterializer::new();
        let records = materializer.observe(&folder("sub/subsub"), ACCEPT).unwrap();
        assert_eq!(paths(&records), ["sub", "sub/subsub"]);
        assert_eq!(
            records[1].verdict().accept_reason(),
            Some(AcceptReason::SelfMatched)
        );
        assert!(materializer.observe(&file("sub/subsub/filea"), ACCEPT).unwrap().len() == 1);
    }

    #[test]
    fn root_is_never_synthesized() {
        let mut materializer = AncestorMaterializer::new();
        materializer.observe(&folder(""), REJECT).unwrap();
        let records = materializer.observe(&file("wantedfile"), ACCEPT).unwrap();
        assert_eq!(paths(&records), ["wantedfile"]);
        let (rest, _) = materializer.finalize().unwrap();
        assert_eq!(paths(&rest), [""]);
    }

    #[test]
    fn flat_mode_forwards_verdicts_verbatim() {
        let mut materializer =
            AncestorMaterializer::with_options(MaterializerOptions::new().folder_aware(false));
        assert!(!materializer.options().is_folder_aware());
        let folder_records = materializer.observe(&folder("a"), REJECT).unwrap();
        let file_records = materializer.observe(&file("a/b/c"), ACCEPT).unwrap();
        assert_eq!(paths(&folder_records), ["a"]);
        assert_eq!(paths(&file_records), ["a/b/c"]);
        let (rest, summary) = materializer.finalize().unwrap();
        assert!(rest.is_empty());
        assert_eq!(summary.synthesized_ancestors(), 0);
    }

    #[test]
    fn calls_after_finalize_are_rejected() {
        let mut materializer = AncestorMaterializer::new();
        materializer.finalize().unwrap();
        assert_eq!(
            materializer.observe(&file("a"), ACCEPT).unwrap_err(),
            MaterializeError::InvalidState {
                state: MaterializerState::Done,
                operation: "observe",
            }
        );
        assert!(matches!(
            materializer.finalize(),
            Err(MaterializeError::InvalidState { operation: "finalize", .. })
        ));
        materializer.cancel();
        assert_eq!(materializer.state(), MaterializerState::Done);
    }

    #[test]
    fn cancel_discards_held_folders() {
        let mut materializer = AncestorMaterializer::new();
        materializer.observe(&folder("held"), REJECT).unwrap();
        materializer.cancel();
        assert_eq!(materializer.state(), MaterializerState::Cancelled);
        assert_eq!(materializer.pending_folders(), 0);
        assert_eq!(
            materializer.observe(&file("a"), ACCEPT).unwrap_err(),
            MaterializeError::Cancelled
        );
        assert_eq!(materializer.finalize().unwrap_err(), MaterializeError::Cancelled);
    }

    #[test]
    fn summary_display_lists_counts() {
        let mut materializer = AncestorMaterializer::new();
        materializer.observe(&file("a/b"), ACCEPT).unwrap();
        let (_, summary) = materializer.finalize().unwrap();
        assert_eq!(summary.total_accepted(), 2);
        assert_eq!(
            summary.to_string(),
            "1 files and 1 folders accepted (1 synthesized), 0 files and 0 folders rejected"
        );
    }
}
