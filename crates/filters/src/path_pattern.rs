//! Root-anchored, whole-segment path matching.

use crate::item::split_segments;
use crate::{FilterError, FilterKind, RelativePath};

/// Returns `true` when `pattern` is a segment-wise prefix of `candidate`
/// starting at the first segment.
///
/// Segments compare by exact equality, so a pattern only matches the item it
/// names and everything nested beneath it.
///
/// ```
/// use filters::segments_match;
///
/// let pattern = ["sub", "subsub"];
/// assert!(segments_match(&pattern, &["sub", "subsub", "filea"]));
/// assert!(!segments_match(&pattern, &["othersub", "sub", "subsub", "filey"]));
/// assert!(!segments_match(&["wantedfile"], &["wantedfileabc"]));
/// ```
pub fn segments_match<P, C>(pattern: &[P], candidate: &[C]) -> bool
where
    P: AsRef<str>,
    C: AsRef<str>,
{
    pattern.len() <= candidate.len()
        && pattern
            .iter()
            .zip(candidate)
            .all(|(expected, actual)| expected.as_ref() == actual.as_ref())
}

/// One entry of an include-path / exclude-path list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    text: String,
    path: RelativePath,
}

impl PathPattern {
    /// Parses a single relative path entry.
    ///
    /// Leading, trailing and doubled separators are ignored. Entries that
    /// contain `..`, a NUL byte, or that name only the root are rejected.
    pub fn parse(kind: FilterKind, text: &str) -> Result<Self, FilterError> {
        let path = parse_relative(kind, text)?;
        if path.is_root() {
            return Err(FilterError::InvalidPath {
                kind,
                pattern: text.to_owned(),
                reason: "entry names the source root",
            });
        }
        Ok(Self {
            text: text.to_owned(),
            path,
        })
    }

    /// Original entry text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Normalised segments.
    #[must_use]
    pub const fn path(&self) -> &RelativePath {
        &self.path
    }

    /// Tests `candidate` against this entry.
    #[must_use]
    pub fn matches(&self, candidate: &RelativePath) -> bool {
        segments_match(self.path.segments(), candidate.segments())
    }
}

/// Semicolon-delimited list of [`PathPattern`]s, OR-combined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPatternList {
    patterns: Vec<PathPattern>,
}

impl PathPatternList {
    /// Parses `text`, skipping empty entries.
    ///
    /// Returns `Ok(None)` when no entry remains, which leaves the category
    /// unconfigured.
    pub fn parse(kind: FilterKind, text: &str) -> Result<Option<Self>, FilterError> {
        let patterns = split_list(text)
            .map(|entry| PathPattern::parse(kind, entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((!patterns.is_empty()).then_some(Self { patterns }))
    }

    /// Entries in configuration order.
    #[must_use]
    pub fn patterns(&self) -> &[PathPattern] {
        &self.patterns
    }

    /// Returns `true` when any entry matches.
    #[must_use]
    pub fn matches(&self, candidate: &RelativePath) -> bool {
        self.matching(candidate).is_some()
    }

    /// Returns the first entry that matches.
    #[must_use]
    pub fn matching(&self, candidate: &RelativePath) -> Option<&PathPattern> {
        self.patterns.iter().find(|pattern| pattern.matches(candidate))
    }
}

/// Splits a semicolon-delimited configuration string, dropping empty entries.
pub(crate) fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(';').filter(|entry| !entry.is_empty())
}

/// Normalises a relative path entry, rejecting escapes from the root.
pub(crate) fn parse_relative(kind: FilterKind, text: &str) -> Result<RelativePath, FilterError> {
    let invalid = |reason| FilterError::InvalidPath {
        kind,
        pattern: text.to_owned(),
        reason,
    };

    if text.contains('\0') {
        return Err(invalid("entry contains a NUL byte"));
    }
    if split_segments(text).any(|segment| segment == "..") {
        return Err(invalid("parent-directory segments are not allowed"));
    }
    Ok(RelativePath::parse(text))
}
