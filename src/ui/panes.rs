//! UI pane drawing module for millr.
//!
//! This module provides the drawers for a directory column, the preview frame and the status
//! line. Everything draws straight into a ratatui [Buffer], so the same code serves the
//! terminal frame and off-screen rendering.
//!
//! Used internally by ui::render

use crate::app::layout::{HEADER_HEIGHT, list_offset};
use crate::app::{Column, PreviewState};
use crate::config::Theme;
use crate::core::{Entry, sanitize_to_exact_width};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, List, ListItem, ListState, Padding, Paragraph, StatefulWidget, Widget,
    },
};
use unicode_width::UnicodeWidthStr;

const EMPTY_PLACEHOLDER: &str = "[Empty]";
const FILE_PREVIEW_TITLE: &str = " File Preview ";
const IMAGE_PREVIEW_TITLE: &str = " Image Preview ";
/// Drawn on the top border, which closes the preview when clicked.
const EXIT_MARK: &str = " [x] ";

/// Draws one column: a header with the directory name and the entry list below it.
///
/// Only the active column highlights its selection.
pub fn draw_column(buf: &mut Buffer, area: Rect, column: &Column, is_active: bool, theme: &Theme) {
    let border_style = if is_active {
        theme.active_border_style()
    } else {
        theme.border_style()
    };
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_type(theme.border_shape().as_border_type())
        .border_style(border_style);

    let inner = block.inner(area);
    block.render(area, buf);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let [header_area, list_area] =
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).areas(inner);

    let header_style = theme.header_style();
    let title = sanitize_to_exact_width(&format!(" {}", column.title()), header_area.width as usize);
    Paragraph::new(Line::from(Span::styled(title, header_style)))
        .style(header_style)
        .render(header_area, buf);

    if column.is_empty() {
        Paragraph::new(Line::from(vec![
            Span::raw(" ".repeat(theme.dir_prefix().width())),
            Span::styled(EMPTY_PLACEHOLDER, theme.entry_style()),
        ]))
        .render(list_area, buf);
        return;
    }

    let items: Vec<ListItem> = column
        .entries()
        .iter()
        .map(|entry| entry_row(entry, list_area.width as usize, theme))
        .collect();

    let highlight = if is_active {
        theme.selection_style()
    } else {
        Style::default()
    };

    // same offset the mouse hit-test assumes
    let selected = column.selected_idx();
    let mut state = ListState::default()
        .with_offset(list_offset(selected, list_area.height as usize))
        .with_selected(selected);
    StatefulWidget::render(
        List::new(items).highlight_style(highlight),
        list_area,
        buf,
        &mut state,
    );
}

/// One list row: directory prefix (or blanks of the same width) and the name, fitted to `width`.
fn entry_row<'a>(entry: &Entry, width: usize, theme: &Theme) -> ListItem<'a> {
    let prefix = theme.dir_prefix();
    let prefix_width = prefix.width();
    let (lead, style) = if entry.is_dir() {
        (prefix.to_string(), theme.directory_style())
    } else {
        (" ".repeat(prefix_width), theme.entry_style())
    };
    let name = sanitize_to_exact_width(&entry.name_str(), width.saturating_sub(prefix_width));
    ListItem::new(Line::from(vec![
        Span::styled(lead, style),
        Span::styled(name, style),
    ]))
}

/// Draws the framed preview. Only the rows in view are handed to the paragraph.
pub fn draw_preview(buf: &mut Buffer, area: Rect, preview: &PreviewState, theme: &Theme) {
    let title = if preview.is_image() {
        IMAGE_PREVIEW_TITLE
    } else {
        FILE_PREVIEW_TITLE
    };
    let block = Block::bordered()
        .border_type(theme.preview_shape().as_border_type())
        .border_style(theme.preview_border_style())
        .title(title)
        .title_top(Line::from(EXIT_MARK).right_aligned())
        .padding(Padding::uniform(1));

    Paragraph::new(Text::from(preview.visible_lines().to_vec()))
        .style(theme.entry_style())
        .block(block)
        .render(area, buf);
}

/// Draws the status line: the pending message, or the selection's path and modification time.
pub fn draw_status(
    buf: &mut Buffer,
    area: Rect,
    message: Option<&str>,
    selected: Option<&Entry>,
    theme: &Theme,
) {
    let width = area.width as usize;
    let line = match (message, selected) {
        (Some(msg), _) => Line::from(Span::styled(
            sanitize_to_exact_width(msg, width),
            theme.status_style(),
        )),
        (None, Some(entry)) => {
            let info = format!(
                "{}  {}",
                crate::utils::shorten_home_path(entry.path()),
                entry.modified_str()
            );
            Line::from(Span::styled(
                sanitize_to_exact_width(&info, width),
                theme.entry_style(),
            ))
        }
        (None, None) => Line::default(),
    };
    Paragraph::new(line).render(area, buf);
}
