#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` enumerates a local source tree and produces the
//! [`EnumeratedItem`](filters::EnumeratedItem) stream the filter engine
//! consumes. Entries carry root-relative paths, a folder flag, the
//! modification time and (for files) the size.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures the traversal: recursion, whether the root
//!   is reported, and whether directory symlinks are followed.
//! - [`Walker`] implements [`Iterator`] and yields [`WalkEntry`] values in
//!   depth-first order with each directory's contents sorted by name.
//! - [`WalkError`] describes I/O failures and always names the offending
//!   path.
//!
//! # Invariants
//!
//! - A folder is yielded before any of its contents.
//! - Relative paths never contain `..` segments; the root's path is empty.
//! - A non-recursive walk yields the root and its direct children only.
//! - Traversal stops after the first error.
//!
//! # Examples
//!
//! ```
//! use walk::WalkBuilder;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("src");
//! fs::create_dir_all(root.join("nested"))?;
//! fs::write(root.join("file.txt"), b"data")?;
//! fs::write(root.join("nested/more.txt"), b"data")?;
//!
//! let mut seen = Vec::new();
//! for entry in WalkBuilder::new(&root).include_root(false).build()? {
//!     seen.push(entry?.relative_path().to_string());
//! }
//! assert_eq!(seen, ["file.txt", "nested", "nested/more.txt"]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod entry;
mod error;
mod walker;

pub use builder::WalkBuilder;
pub use entry::WalkEntry;
pub use error::{WalkError, WalkErrorKind};
pub use walker::Walker;
