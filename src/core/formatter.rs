//! Sorting and display formatting for millr.
//!
//! Orders directory listings, formats modification times and fits strings into column widths.

use crate::core::fm::Entry;

use chrono::{DateTime, Local};
use unicode_width::UnicodeWidthChar;

use std::cmp::Ordering;
use std::time::SystemTime;

/// Sorts entries in place: the `..` link first, then directories, then files.
/// Each group is ordered by name, case-sensitive ascending.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(compare_entries);
}

fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    match (a.is_parent_link(), b.is_parent_link()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }
    match (a.is_dir(), b.is_dir()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name().cmp(b.name()),
    }
}

/// Formats a modification time as `YYYY-MM-DD HH:MM` in local time.
/// # Returns
/// The formatted time, or "-" if unknown.
pub fn format_modified(modified: Option<SystemTime>) -> String {
    modified
        .map(|mtime| {
            let dt: DateTime<Local> = DateTime::from(mtime);
            dt.format("%Y-%m-%d %H:%M").to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Cleans a line to fit exactly into `width` terminal cells
/// by removing control characters, expanding tabs to 4 spaces,
/// and truncating or padding the string.
pub fn sanitize_to_exact_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut current_w = 0;

    for ch in line.chars() {
        if ch == '\t' {
            let space_count = 4 - (current_w % 4);
            if current_w + space_count > width {
                break;
            }
            out.push_str(&" ".repeat(space_count));
            current_w += space_count;
            continue;
        }

        if ch.is_control() {
            continue;
        }

        let w = ch.width().unwrap_or(0);
        if current_w + w > width {
            break;
        }

        out.push(ch);
        current_w += w;
    }

    if current_w < width {
        out.push_str(&" ".repeat(width - current_w));
    }

    out
}
