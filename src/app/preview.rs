//! State of the preview viewport.
//!
//! Holds the rendered content of the previewed file together with a scroll offset and the
//! viewport dimensions the offset is clamped against. ANSI escapes are parsed into styled
//! lines once, when the preview opens; drawing only copies the rows in view.

use crate::core::PreviewContent;

use ansi_to_tui::IntoText;
use ratatui::text::{Line, Text};

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    path: PathBuf,
    content: PreviewContent,
    lines: Vec<Line<'static>>,
    line_count: usize,
    offset: usize,
    width: u16,
    height: u16,
}

impl PreviewState {
    pub fn new(path: PathBuf, content: PreviewContent, width: u16, height: u16) -> Self {
        let line_count = content.as_str().lines().count();
        let lines = styled_lines(content.as_str());
        Self {
            path,
            content,
            lines,
            line_count,
            offset: 0,
            width,
            height,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    #[inline]
    pub fn is_image(&self) -> bool {
        self.content.is_image()
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The styled rows currently in view.
    pub fn visible_lines(&self) -> &[Line<'static>] {
        let start = self.offset.min(self.lines.len());
        let end = start
            .saturating_add(self.height as usize)
            .min(self.lines.len());
        &self.lines[start..end]
    }

    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> usize {
        self.line_count.saturating_sub(self.height as usize)
    }

    /// Lines moved by a page scroll: half the viewport, at least one.
    pub fn half_page(&self) -> usize {
        (self.height as usize / 2).max(1)
    }

    // Scrolling

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset());
    }

    /// Applies new viewport dimensions and re-clamps the offset.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }
}

fn styled_lines(raw: &str) -> Vec<Line<'static>> {
    raw.into_text()
        .unwrap_or_else(|_| Text::raw(raw.to_string()))
        .lines
}
