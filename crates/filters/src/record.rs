use std::fmt;

use crate::{AcceptReason, RelativePath, Verdict};

/// What the job does with a record.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum RecordAction {
    /// Create (or for Remove, remove) the folder.
    CreateFolder,
    /// Transfer (or remove) the file.
    Transfer,
    /// Leave the item alone.
    Ignore,
}

impl fmt::Display for RecordAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateFolder => "create-folder",
            Self::Transfer => "transfer",
            Self::Ignore => "ignore",
        })
    }
}

/// One entry of the filtered stream handed to the job.
///
/// Accepted records arrive after every accepted ancestor of theirs, so a
/// consumer creating folders in arrival order never sees a missing parent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilterRecord {
    path: RelativePath,
    is_folder: bool,
    verdict: Verdict,
    synthesized: bool,
}

impl FilterRecord {
    pub(crate) const fn observed(path: RelativePath, is_folder: bool, verdict: Verdict) -> Self {
        Self {
            path,
            is_folder,
            verdict,
            synthesized: false,
        }
    }

    pub(crate) const fn ancestor(path: RelativePath, synthesized: bool) -> Self {
        Self {
            path,
            is_folder: true,
            verdict: Verdict::Accepted(AcceptReason::AncestorOfMatch),
            synthesized,
        }
    }

    /// Path relative to the source root.
    #[must_use]
    pub const fn path(&self) -> &RelativePath {
        &self.path
    }

    /// Returns `true` for folders.
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        self.is_folder
    }

    /// The verdict behind this record.
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Returns `true` when the record is forwarded into the job.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.verdict.is_accepted()
    }

    /// Returns `true` for ancestor folders the enumerator never reported.
    #[must_use]
    pub const fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    /// Maps the record onto the job action it implies.
    #[must_use]
    pub const fn action(&self) -> RecordAction {
        match (self.verdict.is_accepted(), self.is_folder) {
            (false, _) => RecordAction::Ignore,
            (true, true) => RecordAction::CreateFolder,
            (true, false) => RecordAction::Transfer,
        }
    }
}

impl fmt::Display for FilterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_folder { "folder" } else { "file" };
        write!(f, "{kind} '{}': {}", self.path, self.verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FilterKind, RejectReason};

    #[test]
    fn action_follows_verdict_and_kind() {
        let accepted = Verdict::Accepted(AcceptReason::SelfMatched);
        let rejected = Verdict::Rejected(RejectReason::NotIncluded(FilterKind::IncludePath));

        assert_eq!(
            FilterRecord::observed("a".into(), true, accepted).action(),
            RecordAction::CreateFolder
        );
        assert_eq!(
            FilterRecord::observed("a/b".into(), false, accepted).action(),
            RecordAction::Transfer
        );
        assert_eq!(
            FilterRecord::observed("a/c".into(), false, rejected).action(),
            RecordAction::Ignore
        );
    }

    #[test]
    fn ancestor_records_are_accepted_folders() {
        let record = FilterRecord::ancestor("sub".into(), true);
        assert!(record.is_folder());
        assert!(record.is_accepted());
        assert!(record.is_synthesized());
        assert_eq!(record.verdict().accept_reason(), Some(AcceptReason::AncestorOfMatch));
        assert_eq!(record.to_string(), "folder 'sub': accepted (ancestor of match)");
    }
}
