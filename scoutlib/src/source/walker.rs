//! Ignore-aware directory traversal.
//!
//! Entries are enumerated in file-name order so that every consumer sees
//! the same sequence on every run, independent of the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::filter::extension_of;
use super::ignore::should_ignore;
use crate::error::ScoutError;
use crate::Result;

/// Canonicalize a scan root, reporting a missing root as `PathNotFound`.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(ScoutError::PathNotFound(path.to_path_buf()));
    }
    Ok(fs::canonicalize(path)?)
}

/// What kind of filesystem object an entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// A surviving entry of a walk.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Path relative to the walk root
    pub relative: PathBuf,
    /// Lower-cased extension with leading dot, empty if none
    pub extension: String,
    /// Depth below the root; direct children of the root are depth 0
    pub depth: usize,
    pub kind: EntryKind,
}

impl FileEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Final path component as a string.
    pub fn file_name(&self) -> String {
        self.relative
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Walks a directory tree, skipping anything the ignore policy rejects.
///
/// Ignored directories are pruned, never descended into. Entries that
/// cannot be read are logged at debug level and skipped.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
}

impl TreeWalker {
    /// Create a walker rooted at an (ideally canonical) directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root this walker enumerates.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Iterate every non-ignored descendant of the root.
    pub fn walk(&self) -> impl Iterator<Item = FileEntry> + '_ {
        let root = self.root.as_path();

        WalkDir::new(root)
            .follow_links(false)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| !should_ignore(relative_to(e.path(), root)))
            .filter_map(move |entry| match entry {
                Ok(entry) => self.to_file_entry(&entry),
                Err(err) => {
                    debug!(error = %err, "skipping unreadable entry");
                    None
                }
            })
    }

    fn to_file_entry(&self, entry: &DirEntry) -> Option<FileEntry> {
        let kind = entry_kind(entry)?;
        let relative = relative_to(entry.path(), &self.root).to_path_buf();
        let extension = match kind {
            EntryKind::File => extension_of(&relative),
            EntryKind::Dir => String::new(),
        };

        Some(FileEntry {
            path: entry.path().to_path_buf(),
            relative,
            extension,
            depth: entry.depth().saturating_sub(1),
            kind,
        })
    }
}

/// Resolve the kind of an entry, following symlinks without descending them.
fn entry_kind(entry: &DirEntry) -> Option<EntryKind> {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        return Some(EntryKind::Dir);
    }
    if file_type.is_file() {
        return Some(EntryKind::File);
    }
    if file_type.is_symlink() {
        return match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_dir() => Some(EntryKind::Dir),
            Ok(meta) if meta.is_file() => Some(EntryKind::File),
            Ok(_) => None,
            Err(err) => {
                debug!(path = %entry.path().display(), error = %err, "dangling symlink");
                None
            }
        };
    }
    // sockets, fifos, devices
    None
}

fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
