//! Application state and main controller module for millr.
//!
//! This module defines the [App] struct, which wraps the navigation engine for the terminal:
//! - the [Navigator] and the current [EngineState]
//! - the [Keymap] translating key events into engine events
//! - the status line, which shows the last error until it expires
//! - mouse clicks, mapped onto entries through the engine's hit-test
//!
//! This is the primary context/state object passed to the terminal event loop and the renderer.

use crate::app::engine::{EngineState, Event, Hit, Navigator, Outcome};
use crate::app::keymap::Keymap;
use crate::app::layout::ColumnLayout;
use crate::config::Config;
use crate::core::{
    AsciiImage, BrowseError, FilePreviewer, FsLister, Highlighter, SyntectHighlighter,
    SystemOpener,
};

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, error};

use std::path::Path;
use std::time::{Duration, Instant};

/// Enumeration for each individual keypress result processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    /// The key is not bound in the current mode.
    Continue,
    /// The key was handled; redraw.
    Consumed,
    Quit,
}

/// A message in the status line and the moment it disappears.
#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    expires: Instant,
}

/// Main struct which holds the central application state of millr
pub struct App {
    navigator: Navigator,
    keymap: Keymap,
    state: EngineState,
    status: Option<StatusMessage>,
    status_duration: Duration,
}

impl App {
    /// Builds the app from the config with the filesystem lister, the file previewer and the
    /// system opener. Fails when `root` cannot be listed.
    pub fn new(config: &Config, root: &Path, width: u16, height: u16) -> Result<Self, BrowseError> {
        let general = config.general();
        let preview = config.preview();

        let highlighter: Option<Box<dyn Highlighter>> = preview
            .highlight()
            .then(|| Box::new(SyntectHighlighter::new(preview.syntax_theme())) as Box<dyn Highlighter>);

        let navigator = Navigator::new(
            Box::new(FsLister),
            Box::new(FilePreviewer::new(
                highlighter,
                Box::new(AsciiImage::new(preview.image_width(), preview.image_height())),
                preview.max_bytes(),
                preview.max_lines(),
            )),
            Box::new(SystemOpener::new(config.opener().cmd().map(str::to_string))),
            ColumnLayout::new(general.min_column_width(), general.margin()),
        );

        let state = navigator.init(root, width, height)?;
        Ok(Self::with_navigator(
            navigator,
            Keymap::from_keys(config.keys()),
            state,
            general.status_duration(),
        ))
    }

    /// Builds the app around an already initialized navigator and state.
    pub fn with_navigator(
        navigator: Navigator,
        keymap: Keymap,
        state: EngineState,
        status_duration: Duration,
    ) -> Self {
        Self {
            navigator,
            keymap,
            state,
            status: None,
            status_duration,
        }
    }

    // Getters/ accessors

    #[inline]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The status line text, if one is showing.
    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    /// Central key handler
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        match self.keymap.lookup(key, self.state.is_previewing()) {
            Some(event) => self.dispatch(event),
            None => KeypressResult::Continue,
        }
    }

    /// Mouse handler: a left click on an entry selects it, then opens a directory or previews
    /// a file; a left click on the preview's top border closes it. The wheel moves the
    /// selection, or scrolls while previewing.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> KeypressResult {
        let previewing = self.state.is_previewing();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.state.hit_test(mouse.column, mouse.row) {
                    Some(Hit::ExitPreview) => self.dispatch(Event::ExitPreview),
                    Some(Hit::Entry { column, entry }) => {
                        self.dispatch(Event::Select { column, entry });
                        match self.state.selected_entry().map(|e| e.is_dir()) {
                            Some(true) => self.dispatch(Event::Descend),
                            Some(false) => self.dispatch(Event::EnterPreview),
                            None => KeypressResult::Consumed,
                        }
                    }
                    None => KeypressResult::Continue,
                }
            }
            MouseEventKind::ScrollDown if previewing => self.dispatch(Event::ScrollDown),
            MouseEventKind::ScrollUp if previewing => self.dispatch(Event::ScrollUp),
            MouseEventKind::ScrollDown => self.dispatch(Event::MoveDown),
            MouseEventKind::ScrollUp => self.dispatch(Event::MoveUp),
            _ => KeypressResult::Continue,
        }
    }

    /// Runs one event through the engine and records failures in the status line.
    pub fn dispatch(&mut self, event: Event) -> KeypressResult {
        debug!(?event, "dispatch");
        let state = std::mem::take(&mut self.state);
        let (next, outcome) = self.navigator.transition(state, event);
        self.state = next;

        match outcome {
            Outcome::Continue => KeypressResult::Consumed,
            Outcome::Quit => KeypressResult::Quit,
            Outcome::Failed(e) => {
                error!(error = %e, "{:?} failed", event);
                self.set_status(e.to_string());
                KeypressResult::Consumed
            }
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.dispatch(Event::Resize(width, height));
    }

    pub fn set_status(&mut self, text: String) {
        self.status = Some(StatusMessage {
            text,
            expires: Instant::now() + self.status_duration,
        });
    }

    /// Housekeeping between events: clears an expired status message and reports opener
    /// launches that have failed since the last tick.
    /// Returns `true` if the screen needs a redraw.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> bool {
        let mut redraw = false;
        if let Some(status) = &self.status
            && now >= status.expires
        {
            self.status = None;
            redraw = true;
        }

        for e in self.navigator.poll_launches() {
            error!(error = %e, "launch failed");
            self.set_status(e.to_string());
            redraw = true;
        }
        redraw
    }
}
