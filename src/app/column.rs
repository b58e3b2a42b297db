//! A single open directory level of the Miller view.
//!
//! A [Column] owns its listing and a selection index which is always valid unless the
//! listing is empty.

use crate::core::Entry;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    path: PathBuf,
    entries: Vec<Entry>,
    selected: usize,
    width: usize,
}

impl Column {
    pub fn new(path: PathBuf, entries: Vec<Entry>) -> Self {
        Self {
            path,
            entries,
            selected: 0,
            width: 0,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Index of the selected entry, `None` for an empty column.
    pub fn selected_idx(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.selected)
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    /// Header label: the base name of the directory, or the full path for a root.
    pub fn title(&self) -> Cow<'_, str> {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => self.path.to_string_lossy(),
        }
    }

    // Navigation functions

    /// Moves the selection up by one entry, stopping at the first.
    /// Returns `true` if the selection moved.
    pub fn move_up(&mut self) -> bool {
        if self.selected == 0 {
            return false;
        }
        self.selected -= 1;
        true
    }

    /// Moves the selection down by one entry, stopping at the last.
    /// Returns `true` if the selection moved.
    pub fn move_down(&mut self) -> bool {
        if self.selected + 1 >= self.entries.len() {
            return false;
        }
        self.selected += 1;
        true
    }

    /// Selects the entry at `idx`. Returns `false` and keeps the selection when out of range.
    pub fn select(&mut self, idx: usize) -> bool {
        if idx >= self.entries.len() {
            return false;
        }
        self.selected = idx;
        true
    }

    pub(crate) fn set_width(&mut self, width: usize) {
        self.width = width;
    }
}
