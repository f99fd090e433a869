use std::fmt;

use crate::FilterKind;

/// Why an item was accepted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AcceptReason {
    /// The item passed every configured category itself.
    SelfMatched,
    /// The folder failed its own test but contains an accepted item.
    AncestorOfMatch,
}

/// Why an item was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum RejectReason {
    /// Outside the configured remove scope.
    OutOfScope,
    /// Deeper than a non-recursive pass considers.
    BeyondRecursion,
    /// Matched the given exclude category.
    Excluded(FilterKind),
    /// Failed the given include category.
    NotIncluded(FilterKind),
}

/// Outcome of evaluating one item.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Verdict {
    /// Forward the item into the job.
    Accepted(AcceptReason),
    /// Drop the item.
    Rejected(RejectReason),
}

impl Verdict {
    /// Returns `true` for accepted items.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Accept reason, if accepted.
    #[must_use]
    pub const fn accept_reason(self) -> Option<AcceptReason> {
        match self {
            Self::Accepted(reason) => Some(reason),
            Self::Rejected(_) => None,
        }
    }

    /// Reject reason, if rejected.
    #[must_use]
    pub const fn reject_reason(self) -> Option<RejectReason> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted(AcceptReason::SelfMatched) => f.write_str("accepted"),
            Self::Accepted(AcceptReason::AncestorOfMatch) => {
                f.write_str("accepted (ancestor of match)")
            }
            Self::Rejected(RejectReason::OutOfScope) => f.write_str("rejected (outside scope)"),
            Self::Rejected(RejectReason::BeyondRecursion) => {
                f.write_str("rejected (not recursive)")
            }
            Self::Rejected(RejectReason::Excluded(kind)) => write!(f, "rejected ({kind} match)"),
            Self::Rejected(RejectReason::NotIncluded(kind)) => {
                write!(f, "rejected (no {kind} match)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_split_variants() {
        let accepted = Verdict::Accepted(AcceptReason::SelfMatched);
        assert!(accepted.is_accepted());
        assert_eq!(accepted.accept_reason(), Some(AcceptReason::SelfMatched));
        assert_eq!(accepted.reject_reason(), None);

        let rejected = Verdict::Rejected(RejectReason::Excluded(FilterKind::ExcludePath));
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.accept_reason(), None);
        assert_eq!(
            rejected.reject_reason(),
            Some(RejectReason::Excluded(FilterKind::ExcludePath))
        );
    }

    #[test]
    fn display_names_the_category() {
        assert_eq!(
            Verdict::Rejected(RejectReason::NotIncluded(FilterKind::IncludePattern)).to_string(),
            "rejected (no include-pattern match)"
        );
        assert_eq!(
            Verdict::Accepted(AcceptReason::AncestorOfMatch).to_string(),
            "accepted (ancestor of match)"
        );
    }
}
