//! Enumeration of candidate files under the source directory.

use crate::file_organizer::OrganizeError;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::{DirEntry, WalkDir};

/// A file found by the traversal, with the data needed to classify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    path: PathBuf,
    modified: SystemTime,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            modified,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last modification time, as reported by the filesystem.
    pub fn modified(&self) -> SystemTime {
        self.modified
    }
}

/// Lazy, single-pass iterator over the files below a root directory.
///
/// In flat mode only the immediate entries of the root are visited; in
/// recursive mode the whole subtree is. Directories are never yielded.
/// Entries within a directory come out sorted by file name, and symbolic
/// links are not followed (the link itself is yielded as a file).
///
/// Errors are yielded in-line so the caller decides whether to continue:
/// a failure to open the root is [`OrganizeError::RootUnreadable`], any
/// deeper failure is recoverable.
pub struct Traversal {
    entries: walkdir::IntoIter,
}

impl Traversal {
    pub fn new(root: &Path, recursive: bool) -> Self {
        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }

        Self {
            entries: walker.into_iter(),
        }
    }

    fn record_for(entry: &DirEntry) -> Result<FileRecord, OrganizeError> {
        let metadata_error = |source: std::io::Error| OrganizeError::Metadata {
            path: entry.path().to_path_buf(),
            source,
        };

        let modified = entry
            .metadata()
            .map_err(|e| metadata_error(e.into()))?
            .modified()
            .map_err(metadata_error)?;

        Ok(FileRecord::new(entry.path(), modified))
    }
}

impl Iterator for Traversal {
    type Item = Result<FileRecord, OrganizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Some(Err(OrganizeError::RootUnreadable { source: err }));
                }
                Err(err) => return Some(Err(OrganizeError::Traversal { source: err })),
            };

            if entry.file_type().is_dir() {
                continue;
            }

            return Some(Self::record_for(&entry));
        }
    }
}
