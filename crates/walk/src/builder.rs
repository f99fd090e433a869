use crate::error::WalkError;
use crate::walker::Walker;
use std::path::PathBuf;

/// Configures a filesystem traversal rooted at a specific path.
///
/// The defaults describe a recursive walk that reports the root itself and
/// does not follow directory symlinks.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    root: PathBuf,
    recursive: bool,
    follow_symlinks: bool,
    include_root: bool,
}

impl WalkBuilder {
    /// Creates a new builder that will traverse the provided root path.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            recursive: true,
            follow_symlinks: false,
            include_root: true,
        }
    }

    /// Controls whether the walker descends below the root's direct children.
    #[must_use]
    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Configures whether directory symlinks should be traversed.
    ///
    /// When enabled, a symlink to a directory is reported as a folder and its
    /// target's contents appear under the symlink's relative path. Canonical
    /// paths are tracked to prevent infinite loops. Otherwise the symlink is
    /// reported as a file.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Controls whether the root entry should be included in the output.
    #[must_use]
    pub const fn include_root(mut self, include: bool) -> Self {
        self.include_root = include;
        self
    }

    /// Builds a [`Walker`] using the configured options.
    pub fn build(self) -> Result<Walker, WalkError> {
        Walker::new(
            self.root,
            self.recursive,
            self.follow_symlinks,
            self.include_root,
        )
    }
}
