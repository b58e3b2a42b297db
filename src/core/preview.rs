//! File preview rendering for millr.
//!
//! [FilePreviewer] decides between the image and text branch by extension, reads files up to a
//! byte cap, keeps at most a fixed number of lines, and falls back to raw text whenever
//! highlighting is unavailable.

use crate::core::ascii::{AsciiImage, ImageConverter, is_image_file};
use crate::core::error::BrowseError;
use crate::core::highlight::Highlighter;

use tracing::debug;

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default cap on the number of bytes read for a text preview (10mb).
pub const DEFAULT_MAX_PREVIEW_BYTES: u64 = 10 * 1024 * 1024;
/// Default cap on the number of lines highlighted and shown for a text preview.
pub const DEFAULT_MAX_PREVIEW_LINES: usize = 2000;
// Bytes checked for NUL to decide a file is binary
const BINARY_PEEK_BYTES: usize = 1024;

/// Rendered preview of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewContent {
    text: String,
    is_image: bool,
}

impl PreviewContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_image: false,
        }
    }

    pub fn image(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_image: true,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_image(&self) -> bool {
        self.is_image
    }
}

/// Produces the preview for a selected file.
pub trait Previewer {
    fn preview(&self, path: &Path) -> Result<PreviewContent, BrowseError>;
}

/// The default [Previewer]: ASCII art for images, highlighted (or raw) text for everything else.
pub struct FilePreviewer {
    highlighter: Option<Box<dyn Highlighter>>,
    images: Box<dyn ImageConverter>,
    max_bytes: u64,
    max_lines: usize,
}

impl FilePreviewer {
    pub fn new(
        highlighter: Option<Box<dyn Highlighter>>,
        images: Box<dyn ImageConverter>,
        max_bytes: u64,
        max_lines: usize,
    ) -> Self {
        Self {
            highlighter,
            images,
            max_bytes,
            max_lines: max_lines.max(1),
        }
    }

    fn preview_text(&self, path: &Path) -> Result<PreviewContent, BrowseError> {
        let bytes = read_prefix(path, self.max_bytes).map_err(|e| BrowseError::io(path, e))?;
        let is_binary = bytes.iter().take(BINARY_PEEK_BYTES).any(|b| *b == 0);
        let decoded = String::from_utf8_lossy(&bytes);
        let text = first_lines(&decoded, self.max_lines);

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        let highlighted = match &self.highlighter {
            Some(hl) if !is_binary => hl.highlight(text, &extension),
            _ => None,
        };

        match highlighted {
            Some(out) => Ok(PreviewContent::text(out)),
            None => {
                debug!(path = %path.display(), is_binary, "previewing raw text");
                Ok(PreviewContent::text(printable(text)))
            }
        }
    }
}

impl Default for FilePreviewer {
    fn default() -> Self {
        Self::new(
            Some(Box::new(crate::core::highlight::SyntectHighlighter::default())),
            Box::new(AsciiImage::default()),
            DEFAULT_MAX_PREVIEW_BYTES,
            DEFAULT_MAX_PREVIEW_LINES,
        )
    }
}

impl Previewer for FilePreviewer {
    fn preview(&self, path: &Path) -> Result<PreviewContent, BrowseError> {
        if is_image_file(path) {
            let art = self.images.convert(path)?;
            return Ok(PreviewContent::image(art));
        }
        self.preview_text(path)
    }
}

/// Reads at most `max_bytes` from the start of `path`.
fn read_prefix(path: &Path, max_bytes: u64) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut bytes = Vec::new();
    file.take(max_bytes).read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// The first `max_lines` lines of `text`, line endings included.
fn first_lines(text: &str, max_lines: usize) -> &str {
    match text.match_indices('\n').nth(max_lines.saturating_sub(1)) {
        Some((end, _)) => &text[..=end],
        None => text,
    }
}

/// Replaces control characters other than newlines and tabs, so raw bytes cannot drive the
/// terminal.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_control() && c != '\n' && c != '\t' {
                '\u{fffd}'
            } else {
                c
            }
        })
        .collect()
}
