//! The general and preview configuration settings for millr.
//!
//! This module defines the [General] struct for deserializing the `[general]` section of
//! millr.toml and the [InternalGeneral] struct with the validated values used at runtime.
//! It also holds the `[preview]` section, [PreviewOptions].

use crate::app::layout::{DEFAULT_MARGIN, DEFAULT_MIN_COLUMN_WIDTH};
use crate::core::ascii::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::core::highlight::DEFAULT_SYNTAX_THEME;
use crate::core::preview::{DEFAULT_MAX_PREVIEW_BYTES, DEFAULT_MAX_PREVIEW_LINES};
use crate::utils::{clamp_column_width, expand_home_path};

use serde::Deserialize;

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Seconds an error stays in the status line by default.
pub const DEFAULT_STATUS_SECONDS: u64 = 5;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    min_column_width: usize,
    margin: usize,
    status_seconds: u64,
    log_file: Option<String>,
}

impl Default for General {
    fn default() -> Self {
        General {
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            margin: DEFAULT_MARGIN,
            status_seconds: DEFAULT_STATUS_SECONDS,
            log_file: None,
        }
    }
}

#[derive(Debug)]
pub struct InternalGeneral {
    min_column_width: usize,
    margin: usize,
    status_duration: Duration,
    log_file: Option<PathBuf>,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        Self {
            min_column_width: clamp_column_width(g.min_column_width),
            margin: g.margin,
            status_duration: Duration::from_secs(g.status_seconds),
            log_file: g
                .log_file
                .filter(|s| !s.trim().is_empty())
                .map(|s| expand_home_path(&s)),
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub fn min_column_width(&self) -> usize {
        self.min_column_width
    }

    #[inline]
    pub fn margin(&self) -> usize {
        self.margin
    }

    #[inline]
    pub fn status_duration(&self) -> Duration {
        self.status_duration
    }

    #[inline]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// Preview configuration options
/// ```toml
/// [preview]
/// max_bytes = 1048576
/// max_lines = 500
/// syntax_theme = "Solarized (dark)"
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PreviewOptions {
    max_bytes: u64,
    max_lines: usize,
    image_width: u32,
    image_height: u32,
    syntax_theme: String,
    highlight: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        PreviewOptions {
            max_bytes: DEFAULT_MAX_PREVIEW_BYTES,
            max_lines: DEFAULT_MAX_PREVIEW_LINES,
            image_width: DEFAULT_WIDTH,
            image_height: DEFAULT_HEIGHT,
            syntax_theme: DEFAULT_SYNTAX_THEME.into(),
            highlight: true,
        }
    }
}

impl PreviewOptions {
    /// Read cap for text previews, never zero.
    #[inline]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes.max(1)
    }

    /// Lines kept (and highlighted) for text previews, never zero.
    #[inline]
    pub fn max_lines(&self) -> usize {
        self.max_lines.max(1)
    }

    #[inline]
    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    #[inline]
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    #[inline]
    pub fn syntax_theme(&self) -> &str {
        &self.syntax_theme
    }

    #[inline]
    pub fn highlight(&self) -> bool {
        self.highlight
    }
}
