//! Column geometry.
//!
//! One formula decides how many columns fit a window, how wide they are and which
//! contiguous window of them is shown. Navigation, resizing, rendering and mouse hit-testing
//! all go through [ColumnLayout] and the helpers here so they can never disagree.

use std::ops::Range;

pub const DEFAULT_MIN_COLUMN_WIDTH: usize = 30;
pub const DEFAULT_MARGIN: usize = 2;

/// Rows taken by the status line under the columns.
pub const STATUS_HEIGHT: u16 = 1;
/// Rows taken by a column's header above its entries.
pub const HEADER_HEIGHT: u16 = 1;
/// Cells the preview frame takes on each axis: a border and one cell of padding per side.
pub const PREVIEW_FRAME: u16 = 4;

/// Minimum column width and horizontal margin, both in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    min_column_width: usize,
    margin: usize,
}

impl ColumnLayout {
    pub fn new(min_column_width: usize, margin: usize) -> Self {
        Self {
            min_column_width: min_column_width.max(1),
            margin,
        }
    }

    /// Width left for columns once the margin is taken off.
    #[inline]
    pub fn available(&self, window_width: u16) -> usize {
        (window_width as usize).saturating_sub(self.margin)
    }

    /// Number of columns that fit side by side. Always at least one.
    pub fn max_columns(&self, window_width: u16) -> usize {
        (self.available(window_width) / self.min_column_width).max(1)
    }

    /// Number of columns actually shown for `len` open columns.
    pub fn visible_columns(&self, window_width: u16, len: usize) -> usize {
        len.min(self.max_columns(window_width))
    }

    /// Uniform width of every visible column.
    pub fn column_width(&self, window_width: u16, len: usize) -> usize {
        let visible = self.visible_columns(window_width, len).max(1);
        self.available(window_width) / visible
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_COLUMN_WIDTH, DEFAULT_MARGIN)
    }
}

/// Range of columns to draw so the active one is the rightmost visible column whenever not
/// all of them fit, and the window never has empty slots.
pub fn visible_window(active: usize, max_columns: usize, len: usize) -> Range<usize> {
    let max = max_columns.max(1);
    let end = len.min(active.saturating_sub(max - 1) + max);
    end.saturating_sub(max)..end
}

/// Text area of the preview viewport for a window, as `(width, height)`.
pub fn preview_viewport(window_width: u16, window_height: u16) -> (u16, u16) {
    let body = window_height.saturating_sub(STATUS_HEIGHT);
    (
        window_width.saturating_sub(PREVIEW_FRAME),
        body.saturating_sub(PREVIEW_FRAME),
    )
}

/// First entry shown in a list of `rows` rows so that `selected` stays in view.
/// Scrolls the minimum amount: the selection sits on the last row once it passes the bottom.
pub fn list_offset(selected: Option<usize>, rows: usize) -> usize {
    match selected {
        Some(idx) if rows > 0 => (idx + 1).saturating_sub(rows),
        _ => 0,
    }
}
