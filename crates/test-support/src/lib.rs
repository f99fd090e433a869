#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Shared fixtures for building source trees on disk in tests.
//!
//! [`TestDir`] owns a temporary directory that is removed on drop.
//! [`FileTree`] describes folders and files (optionally with fixed
//! modification times) and materializes them inside a [`TestDir`].
//!
//! ```
//! use test_support::{FileTree, TestDir};
//!
//! let dir = TestDir::new().unwrap();
//! let mut tree = FileTree::new();
//! tree.folder("empty").text_file("sub/a.txt", "a");
//! tree.create_in(&dir).unwrap();
//!
//! assert!(dir.exists("empty"));
//! assert_eq!(dir.read_file("sub/a.txt").unwrap(), b"a");
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use filetime::FileTime;
use tempfile::TempDir;

/// Temporary directory removed when dropped.
#[derive(Debug)]
pub struct TestDir {
    temp: TempDir,
}

impl TestDir {
    /// Creates a fresh, empty directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            temp: tempfile::tempdir()?,
        })
    }

    /// Absolute path of the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Resolves `relative` inside the directory.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.temp.path().join(relative)
    }

    /// Creates `relative` and any missing parents.
    pub fn create_dir(&self, relative: impl AsRef<Path>) -> io::Result<PathBuf> {
        let path = self.join(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Writes `contents` to `relative`, creating parents as needed.
    pub fn write_file(&self, relative: impl AsRef<Path>, contents: &[u8]) -> io::Result<PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Reads the file at `relative`.
    pub fn read_file(&self, relative: impl AsRef<Path>) -> io::Result<Vec<u8>> {
        fs::read(self.join(relative))
    }

    /// Returns `true` when `relative` exists.
    #[must_use]
    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.join(relative).exists()
    }

    /// Sets the modification time of `relative`.
    pub fn set_mtime(&self, relative: impl AsRef<Path>, mtime: SystemTime) -> io::Result<()> {
        filetime::set_file_mtime(self.join(relative), FileTime::from_system_time(mtime))
    }
}

#[derive(Clone, Debug)]
enum Node {
    Folder(PathBuf),
    File {
        path: PathBuf,
        contents: Vec<u8>,
        mtime: Option<SystemTime>,
    },
}

/// Declarative description of a source tree.
///
/// Nodes are created in insertion order; parents are created implicitly.
#[derive(Clone, Debug, Default)]
pub struct FileTree {
    nodes: Vec<Node>,
}

impl FileTree {
    /// Creates an empty description.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a folder (which may stay empty).
    pub fn folder(&mut self, relative: impl Into<PathBuf>) -> &mut Self {
        self.nodes.push(Node::Folder(relative.into()));
        self
    }

    /// Adds a file with text contents.
    pub fn text_file(&mut self, relative: impl Into<PathBuf>, contents: &str) -> &mut Self {
        self.file(relative, contents.as_bytes())
    }

    /// Adds a file with raw contents.
    pub fn file(&mut self, relative: impl Into<PathBuf>, contents: &[u8]) -> &mut Self {
        self.nodes.push(Node::File {
            path: relative.into(),
            contents: contents.to_vec(),
            mtime: None,
        });
        self
    }

    /// Adds a file with a fixed modification time.
    pub fn file_with_mtime(
        &mut self,
        relative: impl Into<PathBuf>,
        contents: &[u8],
        mtime: SystemTime,
    ) -> &mut Self {
        self.nodes.push(Node::File {
            path: relative.into(),
            contents: contents.to_vec(),
            mtime: Some(mtime),
        });
        self
    }

    /// Number of declared nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when nothing was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Materializes the tree inside `dir`.
    pub fn create_in(&self, dir: &TestDir) -> io::Result<()> {
        for node in &self.nodes {
            match node {
                Node::Folder(path) => {
                    dir.create_dir(path)?;
                }
                Node::File {
                    path,
                    contents,
                    mtime,
                } => {
                    dir.write_file(path, contents)?;
                    if let Some(mtime) = mtime {
                        dir.set_mtime(path, *mtime)?;
                    }
                }
            }
        }
        Ok(())
    }
}
