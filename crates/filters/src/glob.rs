//! Basename glob matching for include-pattern / exclude-pattern.

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};

use crate::path_pattern::split_list;
use crate::{FilterError, FilterKind};

/// One compiled glob entry.
///
/// `*` matches any run of characters (including none) and the whole name
/// must match. `?`, `[...]` classes and `{a,b}` alternates follow [`globset`]
/// syntax; a backslash escapes the next character.
#[derive(Clone, Debug)]
pub struct GlobPattern {
    text: String,
    matcher: GlobMatcher,
}

impl GlobPattern {
    /// Compiles a single entry.
    pub fn parse(kind: FilterKind, text: &str) -> Result<Self, FilterError> {
        let glob = build_glob(kind, text)?;
        Ok(Self {
            text: text.to_owned(),
            matcher: glob.compile_matcher(),
        })
    }

    /// Original entry text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns `true` when the entry has no wildcard and must match verbatim.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        !self
            .text
            .contains(['*', '?', '[', ']', '{', '}', '\\'])
    }

    /// Tests a single name.
    #[must_use]
    pub fn matches(&self, basename: &str) -> bool {
        self.matcher.is_match(basename)
    }
}

/// Semicolon-delimited list of [`GlobPattern`]s, OR-combined.
///
/// The entries are also compiled into one [`GlobSet`] so a basename is
/// tested against the whole list in a single pass.
#[derive(Clone, Debug)]
pub struct GlobPatternList {
    patterns: Vec<GlobPattern>,
    set: GlobSet,
}

impl GlobPatternList {
    /// Parses `text`, skipping empty entries.
    ///
    /// Returns `Ok(None)` when no entry remains.
    pub fn parse(kind: FilterKind, text: &str) -> Result<Option<Self>, FilterError> {
        let mut patterns = Vec::new();
        let mut builder = GlobSetBuilder::new();

        for entry in split_list(text) {
            let glob = build_glob(kind, entry)?;
            patterns.push(GlobPattern {
                text: entry.to_owned(),
                matcher: glob.compile_matcher(),
            });
            builder.add(glob);
        }

        if patterns.is_empty() {
            return Ok(None);
        }

        let set = builder.build().map_err(|source| FilterError::InvalidGlob {
            kind,
            pattern: text.to_owned(),
            source,
        })?;

        Ok(Some(Self { patterns, set }))
    }

    /// Entries in configuration order.
    #[must_use]
    pub fn patterns(&self) -> &[GlobPattern] {
        &self.patterns
    }

    /// Returns `true` when any entry matches `basename`.
    #[must_use]
    pub fn matches(&self, basename: &str) -> bool {
        self.set.is_match(basename)
    }

    /// Returns the first entry, in configuration order, that matches.
    #[must_use]
    pub fn matching(&self, basename: &str) -> Option<&GlobPattern> {
        self.set
            .matches(basename)
            .into_iter()
            .min()
            .map(|index| &self.patterns[index])
    }
}

fn build_glob(kind: FilterKind, text: &str) -> Result<Glob, FilterError> {
    if text.contains('/') {
        return Err(FilterError::GlobSeparator {
            kind,
            pattern: text.to_owned(),
        });
    }

    GlobBuilder::new(text)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map_err(|source| FilterError::InvalidGlob {
            kind,
            pattern: text.to_owned(),
            source,
        })
}
