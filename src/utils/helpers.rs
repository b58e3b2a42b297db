//! Helpers for millr.
//!
//! Small utilities used across the crate:
//! - Color parsing from strings or hex codes
//! - Home directory lookup, `~` expansion and shortening
//! - Clamping the configured column width
//! - Resolving the start directory and the log file location

use ratatui::style::Color;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Smallest accepted `min_column_width`.
pub const MIN_COLUMN_WIDTH: usize = 10;
/// Largest accepted `min_column_width`.
pub const MAX_COLUMN_WIDTH: usize = 200;

/// Parses a string (color name or hex) into a ratatui::style::color
///
/// Supports standard names (red, green, etc.) as well as hex values (#RRGGBB or #RGB)
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        _ => s
            .strip_prefix('#')
            .and_then(parse_hex)
            .unwrap_or(Color::Reset),
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let expanded = match hex.len() {
        6 => hex.to_string(),
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        _ => return None,
    };
    let rgb = u32::from_str_radix(&expanded, 16).ok()?;
    Some(Color::Rgb(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    ))
}

#[inline]
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a leading `~` to the home directory.
pub fn expand_home_path(path: &str) -> PathBuf {
    if path == "~" {
        return get_home().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path
        .strip_prefix("~/")
        .or_else(|| path.strip_prefix("~\\"))
        && let Some(home) = get_home()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Util function to shorten home directory to ~.
/// Is used for the header of the root column.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        let mut short = stripped.display().to_string();
        if short.starts_with(MAIN_SEPARATOR) {
            short.remove(0);
        }
        return format!("~{}{}", MAIN_SEPARATOR, short);
    }
    path.display().to_string()
}

/// Safely clamp the configured minimum column width.
pub fn clamp_column_width(value: usize) -> usize {
    let clamped = value.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
    if clamped != value {
        eprintln!(
            "[Warning] min_column_width={} out of range ({}..={}), clamped to {}",
            value, MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH, clamped
        );
    }
    clamped
}

/// Turns the CLI path argument into an absolute, canonical directory.
pub fn resolve_initial_dir(arg: Option<&str>) -> std::io::Result<PathBuf> {
    let path = match arg {
        Some(arg) => expand_home_path(arg),
        None => std::env::current_dir()?,
    };
    let path = path.canonicalize()?;
    if !path.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            format!("{} is not a directory", path.display()),
        ));
    }
    Ok(path)
}

/// Log file location when none is configured: `<cache dir>/millr/millr.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("millr").join("millr.log"))
}
