//! Terminal rendering and event loop for millr.
//!
//! Handles setup/teardown of raw mode, alternate screen, redraws,
//! and events (keypress, mouse, resize) to app logic.

use crate::app::{App, KeypressResult};
use crate::config::Theme;
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::info;

use std::{io, time::Duration};

/// Window size used when the terminal cannot report one.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Current terminal size as `(width, height)`, or [FALLBACK_SIZE].
pub fn initial_size() -> (u16, u16) {
    crossterm::terminal::size().unwrap_or(FALLBACK_SIZE)
}

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until quit. Handles all input and UI rendering.
/// Returns an std::io::Error if terminal setup or teardown fails.
pub fn run_terminal(app: &mut App, theme: &Theme) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, app, theme);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen,
        Show
    )?;
    result
}

/// Main event loop of millr: draws UI, polls for events and dispatches them to the app.
/// Returns on quit
fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, theme: &Theme) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    // the engine was laid out for the size seen at startup; sync with the real one
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    draw(terminal, app, theme)?;

    loop {
        if app.tick() {
            draw(terminal, app, theme)?;
        }

        // Event Polling
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                // handle keypress
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match app.handle_keypress(key) {
                        KeypressResult::Quit => break,
                        KeypressResult::Consumed => draw(terminal, app, theme)?,
                        KeypressResult::Continue => {}
                    }
                }

                Event::Mouse(mouse) => match app.handle_mouse(mouse) {
                    KeypressResult::Quit => break,
                    KeypressResult::Consumed => draw(terminal, app, theme)?,
                    KeypressResult::Continue => {}
                },

                // handle resize
                Event::Resize(width, height) => {
                    app.resize(width, height);
                    draw(terminal, app, theme)?;
                }

                _ => {}
            }
        }
    }
    info!("quit");
    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &App, theme: &Theme) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    terminal.draw(|f| ui::render(f, app.state(), theme, app.status()))?;
    Ok(())
}
