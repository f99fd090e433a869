use thiserror::Error;

use crate::{FilterKind, MaterializerState};

/// Configuration error reported while building a [`FilterSet`](crate::FilterSet).
///
/// Every variant names the [`FilterKind`] whose configuration string was
/// rejected together with the offending entry, so callers can point users at
/// the exact flag value that needs fixing before enumeration starts.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A glob entry could not be compiled.
    #[error("failed to compile {kind} pattern '{pattern}': {source}")]
    InvalidGlob {
        /// Category the entry belongs to.
        kind: FilterKind,
        /// Offending entry.
        pattern: String,
        /// Underlying compilation failure.
        #[source]
        source: globset::Error,
    },
    /// A glob entry contains `/`, which can never occur inside a single name.
    #[error("{kind} pattern '{pattern}' contains a path separator; patterns match a single name")]
    GlobSeparator {
        /// Category the entry belongs to.
        kind: FilterKind,
        /// Offending entry.
        pattern: String,
    },
    /// A relative path entry is not usable as a root-anchored segment sequence.
    #[error("invalid {kind} entry '{pattern}': {reason}")]
    InvalidPath {
        /// Category the entry belongs to.
        kind: FilterKind,
        /// Offending entry.
        pattern: String,
        /// Why the entry was rejected.
        reason: &'static str,
    },
    /// The include-after threshold is not an RFC 3339 timestamp.
    #[error("invalid {kind} timestamp '{value}': {source}")]
    InvalidTimestamp {
        /// Always [`FilterKind::IncludeAfter`].
        kind: FilterKind,
        /// Offending value.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: time::error::Parse,
    },
}

impl FilterError {
    /// Returns the category whose configuration was rejected.
    #[must_use]
    pub const fn kind(&self) -> FilterKind {
        match self {
            Self::InvalidGlob { kind, .. }
            | Self::GlobSeparator { kind, .. }
            | Self::InvalidPath { kind, .. }
            | Self::InvalidTimestamp { kind, .. } => *kind,
        }
    }

    /// Returns the offending configuration entry.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::InvalidGlob { pattern, .. }
            | Self::GlobSeparator { pattern, .. }
            | Self::InvalidPath { pattern, .. } => pattern,
            Self::InvalidTimestamp { value, .. } => value,
        }
    }
}

/// Lifecycle error reported by the [`AncestorMaterializer`](crate::AncestorMaterializer).
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum MaterializeError {
    /// The materializer was cancelled; pending state was discarded.
    #[error("ancestor materialization was cancelled")]
    Cancelled,
    /// An operation was attempted in a state that does not allow it.
    #[error("cannot {operation} while the materializer is {state}")]
    InvalidState {
        /// State at the time of the call.
        state: MaterializerState,
        /// Rejected operation.
        operation: &'static str,
    },
}

/// Error returned by a [`FilterPass`](crate::FilterPass).
#[derive(Debug, Error)]
pub enum PassError {
    /// The pass observed its cancellation token.
    #[error("filter pass cancelled after {processed} items")]
    Cancelled {
        /// Items evaluated before the stop.
        processed: usize,
    },
    /// The materializer refused an operation.
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use globset::GlobBuilder;
    use std::error::Error as _;

    #[test]
    fn invalid_glob_preserves_pattern_and_source() {
        let glob_err = GlobBuilder::new("[").build().unwrap_err();
        let error = FilterError::InvalidGlob {
            kind: FilterKind::IncludePattern,
            pattern: "[".into(),
            source: glob_err.clone(),
        };

        assert_eq!(error.pattern(), "[");
        assert_eq!(error.kind(), FilterKind::IncludePattern);
        assert!(error.to_string().contains("include-pattern"));
        assert_eq!(error.source().unwrap().to_string(), glob_err.to_string());
    }

    #[test]
    fn invalid_path_reports_reason() {
        let error = FilterError::InvalidPath {
            kind: FilterKind::ExcludePath,
            pattern: "../etc".into(),
            reason: "parent-directory segments are not allowed",
        };
        assert_eq!(
            error.to_string(),
            "invalid exclude-path entry '../etc': parent-directory segments are not allowed"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn invalid_state_names_operation_and_state() {
        let error = MaterializeError::InvalidState {
            state: MaterializerState::Done,
            operation: "observe",
        };
        assert_eq!(error.to_string(), "cannot observe while the materializer is done");
    }

    #[test]
    fn pass_error_wraps_materialize_error() {
        let error = PassError::from(MaterializeError::Cancelled);
        assert!(matches!(error, PassError::Materialize(MaterializeError::Cancelled)));
        assert_eq!(error.to_string(), "ancestor materialization was cancelled");
    }
}
