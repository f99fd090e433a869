use std::sync::Arc;
use std::time::SystemTime;

use logging::{debug_log, info_log};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::debug_filter::trace_category_configured;
use crate::path_pattern::parse_relative;
use crate::{
    AcceptReason, EnumeratedItem, FilterCategory, FilterError, FilterKind, FilterOptions,
    GlobPatternList, OperationKind, PathPatternList, RejectReason, ScopeRestriction, Verdict,
};

/// Compiled, immutable filter configuration for one job.
///
/// A `FilterSet` is built once from [`FilterOptions`] via
/// [`from_options`](Self::from_options). Every semicolon list is split and
/// compiled up front so configuration mistakes surface before enumeration
/// starts and no string is re-parsed per item.
///
/// Evaluation is stateless: [`decide`](Self::decide) reads only the set and
/// the item, so one set may be shared across worker threads. The set is
/// cheaply cloneable (the compiled state is behind an [`Arc`]).
///
/// # Semantics
///
/// 1. A non-empty scope restriction rejects items outside the scope.
/// 2. Without a scope, a non-recursive pass rejects items below the root's
///    direct children.
/// 3. Any matching exclude category rejects, whatever the includes say.
/// 4. Every configured include category must match; unconfigured ones are
///    skipped.
///
/// Folders rejected here may still be forwarded by the
/// [`AncestorMaterializer`](crate::AncestorMaterializer) when a descendant is
/// accepted.
///
/// # Examples
///
/// ```
/// use filters::{EnumeratedItem, FilterOptions, FilterSet, OperationKind};
/// use std::time::SystemTime;
///
/// let set = FilterSet::from_options(
///     &FilterOptions::new(OperationKind::Copy)
///         .recursive(true)
///         .exclude_path("subL1/subL2;excludeFile"),
/// )
/// .unwrap();
///
/// let now = SystemTime::now();
/// assert!(!set.allows(&EnumeratedItem::file("subL1/subL2/file1", now, 1)));
/// assert!(set.allows(&EnumeratedItem::file("sub/excludeFile", now, 1)));
/// ```
///
/// [`FilterSet::default`] is the set compiled from [`FilterOptions::default`]:
/// a non-recursive Copy pass with no categories.
#[derive(Clone, Debug, Default)]
pub struct FilterSet {
    inner: Arc<FilterSetInner>,
}

#[derive(Debug)]
struct FilterSetInner {
    operation: OperationKind,
    recursive: bool,
    categories: Vec<FilterCategory>,
}

impl Default for FilterSetInner {
    fn default() -> Self {
        Self {
            operation: OperationKind::Copy,
            recursive: false,
            categories: Vec::new(),
        }
    }
}

impl FilterSet {
    /// Parses and compiles `options`.
    ///
    /// Categories that do not apply to the configured operation are dropped:
    /// include-path for Sync, include-after outside Copy, and the scope
    /// restriction outside Remove. Dropped values are still validated.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] for the first malformed path, glob or
    /// timestamp entry.
    pub fn from_options(options: &FilterOptions) -> Result<Self, FilterError> {
        let operation = options.operation();
        let recursive = options.is_recursive();
        let mut categories = Vec::new();

        if let Some(value) = options.relative_source_path_value() {
            if operation == OperationKind::Remove {
                let path = parse_relative(FilterKind::ScopeRestriction, value)?;
                info_log!(Remove, 1, "restricting removal to '{}'", path);
                categories.push(FilterCategory::ScopeRestriction(ScopeRestriction::new(
                    path, recursive,
                )));
            } else {
                skip_inapplicable(FilterKind::ScopeRestriction, operation);
            }
        }

        if let Some(value) = options.exclude_path_value() {
            if let Some(list) = PathPatternList::parse(FilterKind::ExcludePath, value)? {
                categories.push(FilterCategory::ExcludePath(list));
            }
        }

        if let Some(value) = options.exclude_pattern_value() {
            if let Some(list) = GlobPatternList::parse(FilterKind::ExcludePattern, value)? {
                categories.push(FilterCategory::ExcludePattern(list));
            }
        }

        if let Some(value) = options.include_path_value() {
            let parsed = PathPatternList::parse(FilterKind::IncludePath, value)?;
            if operation == OperationKind::Sync {
                skip_inapplicable(FilterKind::IncludePath, operation);
            } else if let Some(list) = parsed {
                categories.push(FilterCategory::IncludePath(list));
            }
        }

        if let Some(value) = options.include_pattern_value() {
            if let Some(list) = GlobPatternList::parse(FilterKind::IncludePattern, value)? {
                categories.push(FilterCategory::IncludePattern(list));
            }
        }

        if let Some(value) = options.include_after_value() {
            let threshold = parse_threshold(value)?;
            if operation == OperationKind::Copy {
                categories.push(FilterCategory::IncludeAfter(threshold));
            } else {
                skip_inapplicable(FilterKind::IncludeAfter, operation);
            }
        }

        for category in &categories {
            trace_category_configured(category.kind(), category_entry_count(category));
            debug_log!(Filter, 1, "{} filter configured", category.kind());
        }

        Ok(Self {
            inner: Arc::new(FilterSetInner {
                operation,
                recursive,
                categories,
            }),
        })
    }

    /// Operation the set was built for.
    #[must_use]
    pub fn operation(&self) -> OperationKind {
        self.inner.operation
    }

    /// Whether the pass is recursive.
    #[must_use]
    pub fn is_recursive(&self) -> bool {
        self.inner.recursive
    }

    /// Configured categories in evaluation order.
    #[must_use]
    pub fn categories(&self) -> &[FilterCategory] {
        &self.inner.categories
    }

    /// Returns the configured category of `kind`, if any.
    #[must_use]
    pub fn category(&self, kind: FilterKind) -> Option<&FilterCategory> {
        self.inner
            .categories
            .iter()
            .find(|category| category.kind() == kind)
    }

    /// Returns `true` when no category is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.categories.is_empty()
    }

    /// Evaluates `item` against every configured category.
    ///
    /// Returns [`Verdict::Accepted`] with [`AcceptReason::SelfMatched`] or a
    /// [`Verdict::Rejected`] naming the first failing check.
    #[must_use]
    pub fn decide(&self, item: &EnumeratedItem) -> Verdict {
        if self.beyond_recursion(item) {
            return Verdict::Rejected(RejectReason::BeyondRecursion);
        }

        for category in &self.inner.categories {
            let kind = category.kind();
            let matched = category.matches(item);
            match kind {
                FilterKind::ScopeRestriction if !matched => {
                    return Verdict::Rejected(RejectReason::OutOfScope);
                }
                _ if kind.is_exclude() && matched => {
                    return Verdict::Rejected(RejectReason::Excluded(kind));
                }
                _ if kind.is_include() && !matched => {
                    return Verdict::Rejected(RejectReason::NotIncluded(kind));
                }
                _ => {}
            }
        }

        Verdict::Accepted(AcceptReason::SelfMatched)
    }

    /// Shorthand for `decide(item).is_accepted()`.
    #[must_use]
    pub fn allows(&self, item: &EnumeratedItem) -> bool {
        self.decide(item).is_accepted()
    }

    fn beyond_recursion(&self, item: &EnumeratedItem) -> bool {
        if self.inner.recursive || item.path().depth() <= 1 {
            return false;
        }
        // A non-empty scope applies its own recursion rule.
        !matches!(
            self.category(FilterKind::ScopeRestriction),
            Some(FilterCategory::ScopeRestriction(scope)) if !scope.is_whole_source()
        )
    }
}

fn parse_threshold(value: &str) -> Result<SystemTime, FilterError> {
    OffsetDateTime::parse(value.trim(), &Rfc3339)
        .map(SystemTime::from)
        .map_err(|source| FilterError::InvalidTimestamp {
            kind: FilterKind::IncludeAfter,
            value: value.to_owned(),
            source,
        })
}

fn skip_inapplicable(kind: FilterKind, operation: OperationKind) {
    info_log!(Filter, 1, "{kind} does not apply to {operation}; ignoring it");
}

fn category_entry_count(category: &FilterCategory) -> usize {
    match category {
        FilterCategory::ExcludePath(list) | FilterCategory::IncludePath(list) => {
            list.patterns().len()
        }
        FilterCategory::ExcludePattern(list) | FilterCategory::IncludePattern(list) => {
            list.patterns().len()
        }
        FilterCategory::ScopeRestriction(_) | FilterCategory::IncludeAfter(_) => 1,
    }
}
