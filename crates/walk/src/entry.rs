use std::path::{Path, PathBuf};

use filters::{EnumeratedItem, RelativePath};

/// Result of a filesystem traversal step.
///
/// Wraps the [`EnumeratedItem`] handed to the filter engine together with
/// the absolute path it was read from.
#[derive(Clone, Debug)]
pub struct WalkEntry {
    pub(crate) full_path: PathBuf,
    pub(crate) item: EnumeratedItem,
    pub(crate) is_root: bool,
}

impl WalkEntry {
    /// Returns the absolute path to the filesystem entry.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Returns the path relative to the traversal root.
    #[must_use]
    pub const fn relative_path(&self) -> &RelativePath {
        self.item.path()
    }

    /// Returns the enumerated item describing this entry.
    #[must_use]
    pub const fn item(&self) -> &EnumeratedItem {
        &self.item
    }

    /// Consumes the entry, keeping only the enumerated item.
    #[must_use]
    pub fn into_item(self) -> EnumeratedItem {
        self.item
    }

    /// Reports the depth of the entry relative to the root (root depth is `0`).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.item.path().depth()
    }

    /// Indicates whether this entry corresponds to the traversal root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.is_root
    }
}

impl From<WalkEntry> for EnumeratedItem {
    fn from(entry: WalkEntry) -> Self {
        entry.item
    }
}
