//! UI renderer implementation.
//!
//! Contains the top-level [render] entry point used by the terminal loop, the [draw] function
//! it delegates to and [render_to_string] for off-screen rendering.
//!
//! This module stays "pure rendering": it reads the engine state and the theme and produces
//! widgets, without owning any navigation logic.

use crate::app::EngineState;
use crate::app::layout::STATUS_HEIGHT;
use crate::config::Theme;
use crate::ui::panes;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
};

/// Renders the whole UI into the terminal frame.
pub fn render(frame: &mut Frame, state: &EngineState, theme: &Theme, status: Option<&str>) {
    let area = frame.area();
    draw(frame.buffer_mut(), area, state, theme, status);
}

/// Draws the preview or the visible column window, with the status line underneath.
pub fn draw(buf: &mut Buffer, area: Rect, state: &EngineState, theme: &Theme, status: Option<&str>) {
    let [body, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)]).areas(area);

    match state.preview() {
        Some(preview) => panes::draw_preview(buf, body, preview, theme),
        None => draw_columns(buf, body, state, theme),
    }

    panes::draw_status(buf, status_area, status, state.selected_entry(), theme);
}

/// Draws the visible window of columns left to right at their uniform width.
fn draw_columns(buf: &mut Buffer, area: Rect, state: &EngineState, theme: &Theme) {
    let mut x = area.x;
    let right = area.x.saturating_add(area.width);

    for idx in state.visible_range() {
        let column = &state.columns()[idx];
        let width = u16::try_from(column.width())
            .unwrap_or(u16::MAX)
            .min(right.saturating_sub(x));
        if width == 0 {
            break;
        }
        let col_area = Rect::new(x, area.y, width, area.height);
        panes::draw_column(buf, col_area, column, idx == state.active_index(), theme);
        x = x.saturating_add(width);
    }
}

/// Renders the state into a plain string of `height` lines, trailing blanks trimmed.
/// Styling is dropped; used for snapshots and tests.
pub fn render_to_string(
    state: &EngineState,
    theme: &Theme,
    status: Option<&str>,
    width: u16,
    height: u16,
) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    draw(&mut buf, area, state, theme, status);
    buffer_to_string(&buf)
}

fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let mut line = String::with_capacity(area.width as usize);
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}
