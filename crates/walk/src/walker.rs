use crate::entry::WalkEntry;
use crate::error::WalkError;
use filters::{EnumeratedItem, RelativePath};
use logging::debug_log;
use std::collections::HashSet;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Depth-first iterator over filesystem entries.
///
/// Directory contents are sorted by name, so every folder is yielded before
/// anything it contains and the sequence is stable across platforms.
#[derive(Debug)]
pub struct Walker {
    pub(crate) root: PathBuf,
    pub(crate) recursive: bool,
    pub(crate) follow_symlinks: bool,
    pub(crate) root_entry: Option<WalkEntry>,
    pub(crate) stack: Vec<DirectoryState>,
    pub(crate) visited: HashSet<PathBuf>,
    pub(crate) finished: bool,
}

impl Walker {
    pub(crate) fn new(
        root: PathBuf,
        recursive: bool,
        follow_symlinks: bool,
        include_root: bool,
    ) -> Result<Self, WalkError> {
        let root = absolutize(root)?;
        debug_log!(Enum, 1, "enumerating {:?} (recursive: {})", root, recursive);

        let metadata = fs::symlink_metadata(&root)
            .map_err(|error| WalkError::root_metadata(root.clone(), error))?;
        let descend = if metadata.file_type().is_dir() {
            true
        } else if metadata.file_type().is_symlink() && follow_symlinks {
            fs::metadata(&root)
                .map_err(|error| WalkError::metadata(root.clone(), error))?
                .is_dir()
        } else {
            false
        };

        let root_entry = if include_root {
            Some(WalkEntry {
                full_path: root.clone(),
                item: to_item(&root, RelativePath::root(), &metadata, descend)?,
                is_root: true,
            })
        } else {
            None
        };

        let mut walker = Self {
            root,
            recursive,
            follow_symlinks,
            root_entry,
            stack: Vec::new(),
            visited: HashSet::new(),
            finished: false,
        };

        if descend {
            walker.push_directory(walker.root.clone(), RelativePath::root())?;
        }

        Ok(walker)
    }

    fn push_directory(
        &mut self,
        fs_path: PathBuf,
        relative_prefix: RelativePath,
    ) -> Result<(), WalkError> {
        let canonical = fs::canonicalize(&fs_path)
            .map_err(|error| WalkError::canonicalize(fs_path.clone(), error))?;
        if !self.visited.insert(canonical) {
            debug_log!(Enum, 1, "skipping already visited directory: {:?}", fs_path);
            return Ok(());
        }

        debug_log!(Enum, 3, "entering directory: {:?}", fs_path);
        let state = DirectoryState::new(fs_path, relative_prefix)?;
        self.stack.push(state);
        Ok(())
    }

    fn prepare_entry(
        &mut self,
        full_path: PathBuf,
        relative_path: RelativePath,
    ) -> Result<WalkEntry, WalkError> {
        debug_log!(Enum, 4, "processing entry: {}", relative_path);

        let metadata = fs::symlink_metadata(&full_path)
            .map_err(|error| WalkError::metadata(full_path.clone(), error))?;
        let mut descend_into = None;
        let mut is_folder = false;

        if metadata.file_type().is_dir() {
            is_folder = true;
            descend_into = Some(full_path.clone());
        } else if metadata.file_type().is_symlink() && self.follow_symlinks {
            match fs::metadata(&full_path) {
                Ok(target) if target.is_dir() => {
                    let canonical = fs::canonicalize(&full_path)
                        .map_err(|error| WalkError::canonicalize(full_path.clone(), error))?;
                    is_folder = true;
                    descend_into = Some(canonical);
                }
                Ok(_) => {}
                Err(error) => {
                    return Err(WalkError::metadata(full_path.clone(), error));
                }
            }
        }

        let item = to_item(&full_path, relative_path.clone(), &metadata, is_folder)?;

        if let Some(dir_path) = descend_into {
            if self.recursive {
                self.push_directory(dir_path, relative_path)?;
            }
        }

        Ok(WalkEntry {
            full_path,
            item,
            is_root: false,
        })
    }
}

impl Iterator for Walker {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if let Some(entry) = self.root_entry.take() {
            return Some(Ok(entry));
        }

        loop {
            let (full_path, relative_path) = {
                let state = self.stack.last_mut()?;

                if let Some(name) = state.next_name() {
                    let full_path = state.fs_path.join(&name);
                    let relative_path = state
                        .relative_prefix
                        .join(name.to_string_lossy().into_owned());
                    (full_path, relative_path)
                } else {
                    self.stack.pop();
                    continue;
                }
            };

            match self.prepare_entry(full_path, relative_path) {
                Ok(entry) => return Some(Ok(entry)),
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct DirectoryState {
    fs_path: PathBuf,
    relative_prefix: RelativePath,
    entries: Vec<OsString>,
    index: usize,
}

impl DirectoryState {
    fn new(fs_path: PathBuf, relative_prefix: RelativePath) -> Result<Self, WalkError> {
        let mut entries = Vec::new();
        let read_dir =
            fs::read_dir(&fs_path).map_err(|error| WalkError::read_dir(fs_path.clone(), error))?;
        for entry in read_dir {
            let entry = entry.map_err(|error| WalkError::read_dir_entry(fs_path.clone(), error))?;
            entries.push(entry.file_name());
        }
        entries.sort();

        debug_log!(Enum, 3, "found {} entries in {:?}", entries.len(), fs_path);

        Ok(Self {
            fs_path,
            relative_prefix,
            entries,
            index: 0,
        })
    }

    fn next_name(&mut self) -> Option<OsString> {
        let name = self.entries.get(self.index)?.clone();
        self.index += 1;
        Some(name)
    }
}

fn to_item(
    full_path: &Path,
    relative_path: RelativePath,
    metadata: &fs::Metadata,
    is_folder: bool,
) -> Result<EnumeratedItem, WalkError> {
    let modified = metadata
        .modified()
        .map_err(|error| WalkError::metadata(full_path.to_path_buf(), error))?;
    Ok(if is_folder {
        EnumeratedItem::folder(relative_path, modified)
    } else {
        EnumeratedItem::file(relative_path, modified, metadata.len())
    })
}

fn absolutize(path: PathBuf) -> Result<PathBuf, WalkError> {
    if path.is_absolute() {
        Ok(path)
    } else {
        let cwd = env::current_dir()
            .map_err(|error| WalkError::canonicalize(PathBuf::from("."), error))?;
        Ok(cwd.join(path))
    }
}
