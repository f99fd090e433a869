//! Path model for enumerated items.

use std::fmt;
use std::path::{Component, Path};
use std::time::SystemTime;

/// Location of an item relative to the enumeration root, as path segments.
///
/// Both `/` and `\` separate segments in every constructor, including
/// [`join`](Self::join) and [`from_path`](Self::from_path). Empty segments
/// and `.` are dropped, so `"a//b/"`, `"./a/b"` and `"a\\b"` all denote the
/// same two-segment path. The root is the empty sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath {
    segments: Vec<String>,
}

impl RelativePath {
    /// Returns the root path (no segments).
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parses `text` into segments.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::from_segments(split_segments(text))
    }

    /// Builds a path from segments, skipping empty and `.` ones.
    ///
    /// A segment containing a separator contributes each of its parts.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut path = Self::root();
        for segment in segments {
            path.push_split(segment.as_ref());
        }
        path
    }

    /// Converts a native relative path.
    ///
    /// Non-UTF-8 names are converted lossily. Returns `None` when the path is
    /// absolute or contains `..`.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => segments.extend(
                    split_segments(&name.to_string_lossy()).map(str::to_owned),
                ),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(Self { segments })
    }

    /// Returns the segments in root-to-leaf order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns `true` for the enumeration root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments; the root has depth `0`.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Final segment, or `None` for the root.
    #[must_use]
    pub fn basename(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Containing folder, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, head) = self.segments.split_last()?;
        Some(Self {
            segments: head.to_vec(),
        })
    }

    /// Appends a name, splitting it on separators like [`parse`](Self::parse).
    #[must_use]
    pub fn join(&self, name: impl AsRef<str>) -> Self {
        let mut joined = self.clone();
        joined.push_split(name.as_ref());
        joined
    }

    fn push_split(&mut self, text: &str) {
        self.segments
            .extend(split_segments(text).map(str::to_owned));
    }

    /// Returns `true` when `prefix` equals the first `prefix.depth()` segments.
    ///
    /// Every path starts with the root, and every path starts with itself.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Returns `true` when `self` lies strictly beneath `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, ancestor: &Self) -> bool {
        self.depth() > ancestor.depth() && self.starts_with(ancestor)
    }

    /// Iterates the folders strictly between the root and `self`, nearest first.
    ///
    /// Neither the root nor `self` is yielded.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + '_ {
        (1..self.segments.len()).rev().map(move |len| Self {
            segments: self.segments[..len].to_vec(),
        })
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl From<&str> for RelativePath {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for RelativePath {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

pub(crate) fn split_segments(text: &str) -> impl Iterator<Item = &str> {
    text.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
}

/// A candidate produced by a source enumerator.
///
/// Items are immutable once built; the filter engine only reads them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumeratedItem {
    path: RelativePath,
    is_folder: bool,
    last_modified: SystemTime,
    size: u64,
}

impl EnumeratedItem {
    /// Creates a file item.
    #[must_use]
    pub fn file(path: impl Into<RelativePath>, last_modified: SystemTime, size: u64) -> Self {
        Self {
            path: path.into(),
            is_folder: false,
            last_modified,
            size,
        }
    }

    /// Creates a folder item.
    #[must_use]
    pub fn folder(path: impl Into<RelativePath>, last_modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            is_folder: true,
            last_modified,
            size: 0,
        }
    }

    /// Location relative to the enumeration root.
    #[must_use]
    pub const fn path(&self) -> &RelativePath {
        &self.path
    }

    /// Whether the item is a folder.
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        self.is_folder
    }

    /// Last modification time reported by the source.
    #[must_use]
    pub const fn last_modified(&self) -> SystemTime {
        self.last_modified
    }

    /// Size in bytes; carried through, never consulted by filters.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Final path segment, or `""` for the root.
    #[must_use]
    pub fn basename(&self) -> &str {
        self.path.basename().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_normalises_separators() {
        let expected = RelativePath::from_segments(["a", "b"]);
        assert_eq!(RelativePath::parse("a/b"), expected);
        assert_eq!(RelativePath::parse("/a//b/"), expected);
        assert_eq!(RelativePath::parse("./a\\b"), expected);
        assert!(RelativePath::parse("").is_root());
        assert!(RelativePath::parse("/").is_root());
    }

    #[test]
    fn display_joins_with_slash() {
        assert_eq!(RelativePath::parse("sub\\subsub\\filea").to_string(), "sub/subsub/filea");
        assert_eq!(RelativePath::root().to_string(), "");
    }

    #[test]
    fn ancestors_exclude_root_and_self() {
        let path = RelativePath::parse("a/b/c/d");
        let ancestors: Vec<String> = path.ancestors().map(|p| p.to_string()).collect();
        assert_eq!(ancestors, ["a/b/c", "a/b", "a"]);
        assert_eq!(RelativePath::parse("top").ancestors().count(), 0);
        assert_eq!(RelativePath::root().ancestors().count(), 0);
    }

    #[test]
    fn starts_with_is_segment_wise() {
        let path = RelativePath::parse("wantedfileabc");
        assert!(!path.starts_with(&RelativePath::parse("wantedfile")));
        assert!(path.starts_with(&RelativePath::root()));
        assert!(path.starts_with(&path));
        assert!(!path.is_descendant_of(&path));
        assert!(RelativePath::parse("a/b").is_descendant_of(&RelativePath::parse("a")));
    }

    #[test]
    fn parent_and_basename() {
        let path = RelativePath::parse("sub/subsub/filea");
        assert_eq!(path.basename(), Some("filea"));
        assert_eq!(path.parent(), Some(RelativePath::parse("sub/subsub")));
        assert_eq!(RelativePath::root().parent(), None);
        assert_eq!(RelativePath::root().basename(), None);
    }

    #[test]
    fn from_path_rejects_escapes() {
        assert_eq!(
            RelativePath::from_path(&PathBuf::from("a/./b")),
            Some(RelativePath::parse("a/b"))
        );
        assert_eq!(RelativePath::from_path(&PathBuf::from("../x")), None);
        assert_eq!(RelativePath::from_path(&PathBuf::from("/abs")), None);
    }

    #[test]
    fn join_skips_empty_segments() {
        let base = RelativePath::parse("a");
        assert_eq!(base.join("b"), RelativePath::parse("a/b"));
        assert_eq!(base.join(""), base);
    }

    #[test]
    fn names_with_backslashes_split_like_parsed_text() {
        let joined = RelativePath::root().join("dir").join("inner\\leaf");
        assert_eq!(joined.depth(), 3);
        assert_eq!(joined, RelativePath::parse("dir/inner/leaf"));
        assert_eq!(RelativePath::parse(&joined.to_string()), joined);
        assert_eq!(
            RelativePath::from_path(&PathBuf::from("dir/inner\\leaf")),
            Some(joined.clone())
        );
        assert_eq!(RelativePath::from_segments(["dir", "inner\\leaf"]), joined);
    }

    #[test]
    fn item_constructors() {
        let file = EnumeratedItem::file("dir/file.txt", SystemTime::UNIX_EPOCH, 1024);
        assert!(!file.is_folder());
        assert_eq!(file.size(), 1024);
        assert_eq!(file.basename(), "file.txt");

        let root = EnumeratedItem::folder("", SystemTime::UNIX_EPOCH);
        assert!(root.is_folder());
        assert!(root.path().is_root());
        assert_eq!(root.basename(), "");
    }
}
