use std::fmt;
use std::time::SystemTime;

use crate::{EnumeratedItem, GlobPatternList, PathPatternList, RelativePath};

/// The six filter families a [`FilterSet`](crate::FilterSet) can carry.
///
/// Variants are declared in evaluation order: the scope check runs first,
/// then the exclude families, then the include families.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum FilterKind {
    /// Remove-only restriction to one relative path.
    ScopeRestriction,
    /// Root-anchored relative paths to drop.
    ExcludePath,
    /// Basename globs to drop.
    ExcludePattern,
    /// Root-anchored relative paths to keep.
    IncludePath,
    /// Basename globs to keep.
    IncludePattern,
    /// Modification-time threshold (Copy only).
    IncludeAfter,
}

impl FilterKind {
    /// All kinds in evaluation order.
    pub const ALL: [Self; 6] = [
        Self::ScopeRestriction,
        Self::ExcludePath,
        Self::ExcludePattern,
        Self::IncludePath,
        Self::IncludePattern,
        Self::IncludeAfter,
    ];

    /// Returns `true` for the exclude families.
    #[must_use]
    pub const fn is_exclude(self) -> bool {
        matches!(self, Self::ExcludePath | Self::ExcludePattern)
    }

    /// Returns `true` for the include families (including include-after).
    #[must_use]
    pub const fn is_include(self) -> bool {
        matches!(
            self,
            Self::IncludePath | Self::IncludePattern | Self::IncludeAfter
        )
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ScopeRestriction => "relative-source-path",
            Self::ExcludePath => "exclude-path",
            Self::ExcludePattern => "exclude-pattern",
            Self::IncludePath => "include-path",
            Self::IncludePattern => "include-pattern",
            Self::IncludeAfter => "include-after",
        })
    }
}

/// Restricts a Remove pass to one path and, when recursive, its descendants.
///
/// An empty scope path covers the entire source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeRestriction {
    path: RelativePath,
    recursive: bool,
}

impl ScopeRestriction {
    /// Creates a restriction to `path`.
    #[must_use]
    pub const fn new(path: RelativePath, recursive: bool) -> Self {
        Self { path, recursive }
    }

    /// The scope path.
    #[must_use]
    pub const fn path(&self) -> &RelativePath {
        &self.path
    }

    /// Returns `true` when the scope is the whole source root.
    #[must_use]
    pub fn is_whole_source(&self) -> bool {
        self.path.is_root()
    }

    /// Returns `true` when `candidate` is the scope path, or a descendant of
    /// it and descendants are in play.
    #[must_use]
    pub fn contains(&self, candidate: &RelativePath) -> bool {
        if self.path.is_root() {
            return true;
        }
        candidate == &self.path || (self.recursive && candidate.is_descendant_of(&self.path))
    }
}

/// A configured filter family holding its compiled patterns.
///
/// Unconfigured families are simply absent from the owning set, so every
/// value of this type has at least one entry to test.
#[derive(Clone, Debug)]
pub enum FilterCategory {
    /// See [`FilterKind::ScopeRestriction`].
    ScopeRestriction(ScopeRestriction),
    /// See [`FilterKind::ExcludePath`].
    ExcludePath(PathPatternList),
    /// See [`FilterKind::ExcludePattern`].
    ExcludePattern(GlobPatternList),
    /// See [`FilterKind::IncludePath`].
    IncludePath(PathPatternList),
    /// See [`FilterKind::IncludePattern`].
    IncludePattern(GlobPatternList),
    /// See [`FilterKind::IncludeAfter`]; holds the exclusive threshold.
    IncludeAfter(SystemTime),
}

impl FilterCategory {
    /// The family this category belongs to.
    #[must_use]
    pub const fn kind(&self) -> FilterKind {
        match self {
            Self::ScopeRestriction(_) => FilterKind::ScopeRestriction,
            Self::ExcludePath(_) => FilterKind::ExcludePath,
            Self::ExcludePattern(_) => FilterKind::ExcludePattern,
            Self::IncludePath(_) => FilterKind::IncludePath,
            Self::IncludePattern(_) => FilterKind::IncludePattern,
            Self::IncludeAfter(_) => FilterKind::IncludeAfter,
        }
    }

    /// Returns `true` when `item` satisfies this category's predicate.
    ///
    /// For exclude families a match means the item is dropped.
    #[must_use]
    pub fn matches(&self, item: &EnumeratedItem) -> bool {
        match self {
            Self::ScopeRestriction(scope) => scope.contains(item.path()),
            Self::ExcludePath(paths) | Self::IncludePath(paths) => paths.matches(item.path()),
            Self::ExcludePattern(globs) | Self::IncludePattern(globs) => {
                globs.matches(item.basename())
            }
            Self::IncludeAfter(threshold) => item.last_modified() > *threshold,
        }
    }
}
