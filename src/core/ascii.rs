//! Image to ASCII art conversion.
//!
//! Images are scaled to a fixed cell grid and every cell is mapped to one of three glyphs by
//! its brightness (the HSV value, i.e. the brightest RGB channel).

use crate::core::error::BrowseError;

use image::imageops::FilterType;
use image::{DynamicImage, ImageError};

use std::path::Path;

/// Default grid the converter renders into.
pub const DEFAULT_WIDTH: u32 = 80;
pub const DEFAULT_HEIGHT: u32 = 40;

const DARK_BELOW: f32 = 0.3;
const MID_BELOW: f32 = 0.6;

const DARK_GLYPH: char = ' ';
const MID_GLYPH: char = '▒';
const BRIGHT_GLYPH: char = '█';

/// Extensions the image previewer handles, lowercase.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

/// Converts an image file into a text grid.
pub trait ImageConverter {
    fn convert(&self, path: &Path) -> Result<String, BrowseError>;
}

/// [ImageConverter] rendering a fixed `width` x `height` grid of glyphs.
#[derive(Debug, Clone, Copy)]
pub struct AsciiImage {
    width: u32,
    height: u32,
}

impl AsciiImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

impl Default for AsciiImage {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl ImageConverter for AsciiImage {
    fn convert(&self, path: &Path) -> Result<String, BrowseError> {
        let img = image::open(path).map_err(|e| match e {
            ImageError::IoError(io) => BrowseError::io(path, io),
            other => BrowseError::decode(path, other),
        })?;
        Ok(image_to_ascii(&img, self.width, self.height))
    }
}

/// Checks the extension against the formats the image previewer decodes.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Maps a brightness in `0.0..=1.0` to its glyph.
pub fn brightness_glyph(value: f32) -> char {
    if value < DARK_BELOW {
        DARK_GLYPH
    } else if value < MID_BELOW {
        MID_GLYPH
    } else {
        BRIGHT_GLYPH
    }
}

/// Scales `img` to `width` x `height` cells and renders one glyph per cell.
/// Rows are separated by `\n`.
pub fn image_to_ascii(img: &DynamicImage, width: u32, height: u32) -> String {
    let scaled = img.resize_exact(width, height, FilterType::Triangle).to_rgb8();

    let mut out = String::with_capacity(((width + 1) * height * 3) as usize);
    for y in 0..height {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..width {
            let [r, g, b] = scaled.get_pixel(x, y).0;
            let value = r.max(g).max(b) as f32 / 255.0;
            out.push(brightness_glyph(value));
        }
    }
    out
}
