use std::fmt;

/// The kind of job the filters are built for.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum OperationKind {
    /// One-way copy; every category applies.
    #[default]
    Copy,
    /// Sync; change detection replaces include-after.
    Sync,
    /// Remove; honours the scope restriction.
    Remove,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Copy => "copy",
            Self::Sync => "sync",
            Self::Remove => "remove",
        })
    }
}

/// Raw filter configuration as supplied by the command line or a job file.
///
/// Strings are kept verbatim; parsing and validation happen once in
/// [`FilterSet::from_options`](crate::FilterSet::from_options).
///
/// # Examples
///
/// ```
/// use filters::{FilterOptions, OperationKind};
///
/// let options = FilterOptions::new(OperationKind::Copy)
///     .recursive(true)
///     .include_path("sub/subsub;wantedfile");
/// assert_eq!(options.include_path_value(), Some("sub/subsub;wantedfile"));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default, rename_all = "camelCase", deny_unknown_fields)
)]
pub struct FilterOptions {
    operation: OperationKind,
    recursive: bool,
    include_path: Option<String>,
    exclude_path: Option<String>,
    include_pattern: Option<String>,
    exclude_pattern: Option<String>,
    include_after: Option<String>,
    relative_source_path: Option<String>,
}

impl FilterOptions {
    /// Creates an empty, non-recursive configuration for `operation`.
    #[must_use]
    pub fn new(operation: OperationKind) -> Self {
        Self {
            operation,
            ..Self::default()
        }
    }

    /// Enables depth traversal and depth-independent pattern application.
    #[must_use]
    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Semicolon-delimited relative paths to keep.
    #[must_use]
    pub fn include_path(mut self, value: impl Into<String>) -> Self {
        self.include_path = Some(value.into());
        self
    }

    /// Semicolon-delimited relative paths to drop.
    #[must_use]
    pub fn exclude_path(mut self, value: impl Into<String>) -> Self {
        self.exclude_path = Some(value.into());
        self
    }

    /// Semicolon-delimited basename globs to keep.
    #[must_use]
    pub fn include_pattern(mut self, value: impl Into<String>) -> Self {
        self.include_pattern = Some(value.into());
        self
    }

    /// Semicolon-delimited basename globs to drop.
    #[must_use]
    pub fn exclude_pattern(mut self, value: impl Into<String>) -> Self {
        self.exclude_pattern = Some(value.into());
        self
    }

    /// RFC 3339 timestamp; only strictly newer items are kept (Copy only).
    #[must_use]
    pub fn include_after(mut self, value: impl Into<String>) -> Self {
        self.include_after = Some(value.into());
        self
    }

    /// Remove scope; an empty string means the whole source.
    #[must_use]
    pub fn relative_source_path(mut self, value: impl Into<String>) -> Self {
        self.relative_source_path = Some(value.into());
        self
    }

    /// Configured operation.
    #[must_use]
    pub const fn operation(&self) -> OperationKind {
        self.operation
    }

    /// Whether the pass is recursive.
    #[must_use]
    pub const fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Raw include-path value.
    #[must_use]
    pub fn include_path_value(&self) -> Option<&str> {
        self.include_path.as_deref()
    }

    /// Raw exclude-path value.
    #[must_use]
    pub fn exclude_path_value(&self) -> Option<&str> {
        self.exclude_path.as_deref()
    }

    /// Raw include-pattern value.
    #[must_use]
    pub fn include_pattern_value(&self) -> Option<&str> {
        self.include_pattern.as_deref()
    }

    /// Raw exclude-pattern value.
    #[must_use]
    pub fn exclude_pattern_value(&self) -> Option<&str> {
        self.exclude_pattern.as_deref()
    }

    /// Raw include-after value.
    #[must_use]
    pub fn include_after_value(&self) -> Option<&str> {
        self.include_after.as_deref()
    }

    /// Raw relative-source-path value.
    #[must_use]
    pub fn relative_source_path_value(&self) -> Option<&str> {
        self.relative_source_path.as_deref()
    }
}
