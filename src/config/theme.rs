//! Theme configuration options for millr
//!
//! This module defines the theme configuration options which are read from the `[theme]`
//! section of millr.toml. The renderer receives the resulting [Theme] as an immutable value.

use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use serde::Deserialize;

use std::sync::LazyLock;

/// Theme configuration options
/// # Examples
/// ```toml
/// [theme]
/// border_shape = "rounded"
/// [theme.directory]
/// fg = "cyan"
/// [theme.selection]
/// fg = "black"
/// bg = "#a6e3a1"
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Theme {
    header: ColorPair,
    entry: ColorPair,
    directory: ColorPair,
    /// Left at `default`, the selection is drawn in reversed video.
    selection: ColorPair,
    border: ColorPair,
    active_border: ColorPair,
    preview_border: ColorPair,
    status: ColorPair,
    border_shape: BorderShape,
    preview_shape: BorderShape,
    dir_prefix: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header: ColorPair {
                bg: Color::Indexed(236),
                ..ColorPair::default()
            },
            entry: ColorPair::default(),
            directory: ColorPair {
                fg: Color::Blue,
                ..ColorPair::default()
            },
            selection: ColorPair::default(),
            border: ColorPair {
                fg: Color::Indexed(238),
                ..ColorPair::default()
            },
            active_border: ColorPair {
                fg: Color::Blue,
                ..ColorPair::default()
            },
            preview_border: ColorPair {
                fg: Color::Indexed(238),
                ..ColorPair::default()
            },
            status: ColorPair {
                fg: Color::Red,
                ..ColorPair::default()
            },
            border_shape: BorderShape::Square,
            preview_shape: BorderShape::Rounded,
            dir_prefix: "▶ ".into(),
        }
    }
}

impl Theme {
    /// Get internal default theme reference
    /// Used for fallback when a color is set to Reset
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    // _style methods for getting Style instances with fallbacks to internal defaults

    pub fn header_style(&self) -> Style {
        self.header
            .style_or(&Theme::internal_defaults().header)
            .add_modifier(Modifier::BOLD)
    }

    pub fn entry_style(&self) -> Style {
        self.entry.style_or(&Theme::internal_defaults().entry)
    }

    pub fn directory_style(&self) -> Style {
        self.directory
            .style_or(&Theme::internal_defaults().directory)
    }

    pub fn selection_style(&self) -> Style {
        if self.selection == ColorPair::default() {
            return Style::default().add_modifier(Modifier::REVERSED);
        }
        self.selection.style_or(&ColorPair::default())
    }

    pub fn border_style(&self) -> Style {
        self.border.style_or(&Theme::internal_defaults().border)
    }

    pub fn active_border_style(&self) -> Style {
        self.active_border
            .style_or(&Theme::internal_defaults().active_border)
    }

    pub fn preview_border_style(&self) -> Style {
        self.preview_border
            .style_or(&Theme::internal_defaults().preview_border)
    }

    pub fn status_style(&self) -> Style {
        self.status.style_or(&Theme::internal_defaults().status)
    }

    #[inline]
    pub fn border_shape(&self) -> BorderShape {
        self.border_shape
    }

    #[inline]
    pub fn preview_shape(&self) -> BorderShape {
        self.preview_shape
    }

    /// Prefix drawn in front of directory entries. Files get the same width in blanks.
    #[inline]
    pub fn dir_prefix(&self) -> &str {
        &self.dir_prefix
    }
}

/// ColorPair struct to hold foreground and background colors.
/// Used throughout the theme configuration.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

/// Sets both foreground and background to Color::Reset
impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    /// Resolves the ColorPair by replacing Reset colors with those from another ColorPair.
    pub fn resolve(&self, other: &ColorPair) -> Self {
        Self {
            fg: if self.fg == Color::Reset {
                other.fg
            } else {
                self.fg
            },
            bg: if self.bg == Color::Reset {
                other.bg
            } else {
                self.bg
            },
        }
    }

    /// Converts the ColorPair to a Style, falling back to the provided fallback ColorPair for Reset colors.
    pub fn style_or(&self, fallback: &ColorPair) -> Style {
        let resolved = self.resolve(fallback);
        Style::default().fg(resolved.fg).bg(resolved.bg)
    }
}

/// Border shape options
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BorderShape {
    Square,
    Rounded,
    Double,
    Thick,
}

impl BorderShape {
    pub fn as_border_type(&self) -> BorderType {
        match self {
            BorderShape::Square => BorderType::Plain,
            BorderShape::Rounded => BorderType::Rounded,
            BorderShape::Double => BorderType::Double,
            BorderShape::Thick => BorderType::Thick,
        }
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
