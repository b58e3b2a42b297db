//! Directory listing for millr.
//!
//! Provides the [Entry] struct which every column is made of, the [DirectoryLister] seam the
//! navigation engine reads directories through, and [FsLister], its filesystem implementation.

use crate::core::error::BrowseError;
use crate::core::formatter::{format_modified, sort_entries};

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Name of the synthetic entry pointing at the parent directory.
pub const PARENT_LINK: &str = "..";

/// A single item of a directory listing.
///
/// Immutable once read. Holds the name, the absolute path, the modification time and the
/// directory / `..` flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    name: Box<OsStr>,
    path: PathBuf,
    modified: Option<SystemTime>,
    flags: u8,
}

impl Entry {
    // Flag bit definitions
    pub(crate) const IS_DIR: u8 = 1 << 0;
    pub(crate) const IS_PARENT_LINK: u8 = 1 << 1;

    pub fn new(name: OsString, path: PathBuf, modified: Option<SystemTime>, flags: u8) -> Self {
        Entry {
            name: name.into_boxed_os_str(),
            path,
            modified,
            flags,
        }
    }

    /// Plain file entry. Mostly useful for stubs and tests.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.file_name().unwrap_or_default().to_os_string();
        Entry::new(name, path, None, 0)
    }

    /// Directory entry. Mostly useful for stubs and tests.
    pub fn dir(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.file_name().unwrap_or_default().to_os_string();
        Entry::new(name, path, None, Entry::IS_DIR)
    }

    /// The synthetic `..` entry for `parent`.
    pub fn parent_link(parent: &Path) -> Self {
        Entry::new(
            OsString::from(PARENT_LINK),
            parent.to_path_buf(),
            None,
            Entry::IS_DIR | Entry::IS_PARENT_LINK,
        )
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Modification time as `YYYY-MM-DD HH:MM`, or `-` when unknown.
    pub fn modified_str(&self) -> String {
        format_modified(self.modified)
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_parent_link(&self) -> bool {
        self.flags & Self::IS_PARENT_LINK != 0
    }
}

/// Reads a directory into an ordered list of entries.
///
/// Contract: when `path` has a parent, a `..` entry comes first; then directories before
/// files; each group ascending by name, case-sensitive.
pub trait DirectoryLister {
    fn list(&self, path: &Path) -> Result<Vec<Entry>, BrowseError>;
}

/// [DirectoryLister] backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, path: &Path) -> Result<Vec<Entry>, BrowseError> {
        let mut entries = browse_dir(path).map_err(|e| BrowseError::io(path, e))?;
        if let Some(parent) = path.parent() {
            entries.push(Entry::parent_link(parent));
        }
        sort_entries(&mut entries);
        Ok(entries)
    }
}

/// Reads the contents of the provided directory, unsorted and without a `..` entry.
///
/// Entries whose metadata cannot be read are skipped. Symlinks pointing at directories are
/// reported as directories.
pub fn browse_dir(path: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::with_capacity(256);

    for entry in fs::read_dir(path)? {
        let Ok(entry) = entry else { continue };
        let Ok(ft) = entry.file_type() else { continue };

        let name = entry.file_name();
        let entry_path = entry.path();

        let mut flags = 0u8;
        if ft.is_dir() {
            flags |= Entry::IS_DIR;
        }

        // follow symlinks, fall back to the link itself when it is broken
        let md = fs::metadata(&entry_path).or_else(|_| entry.metadata()).ok();
        if let Some(md) = &md
            && md.is_dir()
        {
            flags |= Entry::IS_DIR;
        }

        let modified = md.and_then(|m| m.modified().ok());
        entries.push(Entry::new(name, entry_path, modified, flags));
    }
    Ok(entries)
}
