//! The column navigation engine.
//!
//! [Navigator::transition] is the whole state machine: it consumes an [EngineState] and an
//! [Event] and returns the next state together with an [Outcome]. Directory listing, previews
//! and launching go through the injected [DirectoryLister], [Previewer] and [Opener], so the
//! engine runs without a terminal or a real filesystem.
//!
//! Failures never corrupt the state: an operation that cannot complete hands back the state
//! it was given and reports the error in [Outcome::Failed].

use crate::app::column::Column;
use crate::app::layout::{
    ColumnLayout, HEADER_HEIGHT, STATUS_HEIGHT, list_offset, preview_viewport, visible_window,
};
use crate::app::preview::PreviewState;
use crate::core::{BrowseError, DirectoryLister, Entry, Opener, Previewer};

use tracing::{debug, warn};

use std::ops::Range;
use std::path::{Path, PathBuf};

/// Input the engine reacts to, already decoupled from the terminal's key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    MoveUp,
    MoveDown,
    Descend,
    Ascend,
    EnterPreview,
    ExitPreview,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    Resize(u16, u16),
    /// Focus `column` and select its `entry`, closing the columns to its right.
    Select { column: usize, entry: usize },
    Open,
    Home,
    Quit,
}

/// What the caller should do after a transition.
#[derive(Debug)]
pub enum Outcome {
    Continue,
    Quit,
    /// The operation was aborted and the state is unchanged.
    Failed(BrowseError),
}

impl Outcome {
    #[inline]
    pub fn is_continue(&self) -> bool {
        matches!(self, Outcome::Continue)
    }

    #[inline]
    pub fn is_quit(&self) -> bool {
        matches!(self, Outcome::Quit)
    }

    pub fn error(&self) -> Option<&BrowseError> {
        match self {
            Outcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// What sits under a screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Entry { column: usize, entry: usize },
    /// The top border of the preview frame.
    ExitPreview,
}

/// Snapshot of the browser: open columns, focus, window geometry and preview.
///
/// `active` is a valid index into `columns` whenever there is at least one column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineState {
    root: PathBuf,
    columns: Vec<Column>,
    active: usize,
    width: u16,
    height: u16,
    max_columns: usize,
    preview: Option<PreviewState>,
}

impl EngineState {
    // Getters / Accessors

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_column(&self) -> Option<&Column> {
        self.columns.get(self.active)
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.active_column().and_then(Column::selected_entry)
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of columns the current width can show.
    #[inline]
    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    #[inline]
    pub fn is_previewing(&self) -> bool {
        self.preview.is_some()
    }

    #[inline]
    pub fn preview(&self) -> Option<&PreviewState> {
        self.preview.as_ref()
    }

    /// The contiguous range of columns to draw.
    pub fn visible_range(&self) -> Range<usize> {
        visible_window(self.active, self.max_columns, self.columns.len())
    }

    /// Maps the cell at `(x, y)` to what the renderer draws there. Column borders, headers,
    /// empty rows and the status line hit nothing.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Hit> {
        let body = self.height.saturating_sub(STATUS_HEIGHT);
        if x >= self.width || y >= body {
            return None;
        }
        if self.is_previewing() {
            return (y == 0).then_some(Hit::ExitPreview);
        }

        let row = y.checked_sub(HEADER_HEIGHT)? as usize;
        let rows = body.saturating_sub(HEADER_HEIGHT) as usize;
        let x = x as usize;

        let range = self.visible_range();
        let first = range.start;
        let mut left = 0;
        for (i, column) in self.columns[range].iter().enumerate() {
            let right = left + column.width();
            if x >= right {
                left = right;
                continue;
            }
            // the rightmost cell is the border
            if x + 1 == right {
                return None;
            }
            let entry = list_offset(column.selected_idx(), rows) + row;
            return (entry < column.len()).then_some(Hit::Entry {
                column: first + i,
                entry,
            });
        }
        None
    }

    /// Checks the index invariants. Used by the tests after every transition.
    pub fn is_consistent(&self) -> bool {
        let active_ok = self.columns.is_empty() || self.active < self.columns.len();
        let selections_ok = self.columns.iter().all(|c| match c.selected_idx() {
            Some(idx) => idx < c.len(),
            None => c.is_empty(),
        });
        active_ok && selections_ok
    }

    fn active_column_mut(&mut self) -> Option<&mut Column> {
        self.columns.get_mut(self.active)
    }
}

/// Runs transitions against injected collaborators.
pub struct Navigator {
    lister: Box<dyn DirectoryLister>,
    previewer: Box<dyn Previewer>,
    opener: Box<dyn Opener>,
    layout: ColumnLayout,
}

impl Navigator {
    pub fn new(
        lister: Box<dyn DirectoryLister>,
        previewer: Box<dyn Previewer>,
        opener: Box<dyn Opener>,
        layout: ColumnLayout,
    ) -> Self {
        Self {
            lister,
            previewer,
            opener,
            layout,
        }
    }

    /// Collects launches that finished with a failure since the last call.
    pub fn poll_launches(&self) -> Vec<BrowseError> {
        self.opener.poll()
    }

    /// Builds the startup state: a single column listing `root`.
    /// Fails when `root` cannot be listed.
    pub fn init(&self, root: &Path, width: u16, height: u16) -> Result<EngineState, BrowseError> {
        let entries = self.lister.list(root)?;
        let mut state = EngineState {
            root: root.to_path_buf(),
            columns: vec![Column::new(root.to_path_buf(), entries)],
            active: 0,
            width,
            height,
            max_columns: 1,
            preview: None,
        };
        self.relayout(&mut state);
        Ok(state)
    }

    /// Processes one event.
    ///
    /// While a preview is open only [Event::ExitPreview], the scroll events, [Event::Resize]
    /// and [Event::Quit] do anything; every other event is ignored.
    pub fn transition(&self, state: EngineState, event: Event) -> (EngineState, Outcome) {
        match event {
            Event::Quit => (state, Outcome::Quit),
            Event::Resize(width, height) => (self.resize(state, width, height), Outcome::Continue),
            _ if state.is_previewing() => (self.preview_event(state, event), Outcome::Continue),

            Event::MoveUp => (self.move_selection(state, Column::move_up), Outcome::Continue),
            Event::MoveDown => (self.move_selection(state, Column::move_down), Outcome::Continue),
            Event::Select { column, entry } => (self.select(state, column, entry), Outcome::Continue),
            Event::Descend => self.descend(state),
            Event::Ascend => (self.ascend(state), Outcome::Continue),
            Event::EnterPreview => self.enter_preview(state),
            Event::Open => self.open(state),
            Event::Home => self.home(state),

            // preview-only events outside of preview mode
            Event::ExitPreview
            | Event::ScrollUp
            | Event::ScrollDown
            | Event::ScrollPageUp
            | Event::ScrollPageDown => (state, Outcome::Continue),
        }
    }

    fn move_selection(&self, mut state: EngineState, step: fn(&mut Column) -> bool) -> EngineState {
        if let Some(col) = state.active_column_mut() {
            step(col);
        }
        state
    }

    fn select(&self, mut state: EngineState, column: usize, entry: usize) -> EngineState {
        let selected = state
            .columns
            .get_mut(column)
            .is_some_and(|col| col.select(entry));
        if !selected {
            return state;
        }
        // columns further right were opened from the previous selection
        state.columns.truncate(column + 1);
        state.active = column;
        self.relayout(&mut state);
        state
    }

    fn descend(&self, mut state: EngineState) -> (EngineState, Outcome) {
        let target = match state.selected_entry() {
            Some(entry) if entry.is_dir() => entry.path().to_path_buf(),
            _ => return (state, Outcome::Continue),
        };

        // list before touching the columns so a failure leaves them as they were
        let entries = match self.lister.list(&target) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %target.display(), error = %e, "descend failed");
                return (state, Outcome::Failed(e));
            }
        };

        state.columns.truncate(state.active + 1);

        let max = self.layout.max_columns(state.width);
        let evict = (state.columns.len() + 1).saturating_sub(max);
        if evict > 0 {
            debug!(evict, max, "evicting leftmost columns");
            state.columns.drain(..evict);
        }

        state.columns.push(Column::new(target, entries));
        state.active = state.columns.len() - 1;
        self.relayout(&mut state);
        (state, Outcome::Continue)
    }

    fn ascend(&self, mut state: EngineState) -> EngineState {
        if state.active == 0 {
            return state;
        }
        state.active -= 1;
        state.columns.truncate(state.active + 1);
        self.relayout(&mut state);
        state
    }

    fn enter_preview(&self, mut state: EngineState) -> (EngineState, Outcome) {
        let path = match state.selected_entry() {
            Some(entry) if !entry.is_dir() => entry.path().to_path_buf(),
            _ => return (state, Outcome::Continue),
        };

        match self.previewer.preview(&path) {
            Ok(content) => {
                let (w, h) = preview_viewport(state.width, state.height);
                debug!(path = %path.display(), is_image = content.is_image(), "preview opened");
                state.preview = Some(PreviewState::new(path, content, w, h));
                (state, Outcome::Continue)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "preview failed");
                (state, Outcome::Failed(e))
            }
        }
    }

    fn preview_event(&self, mut state: EngineState, event: Event) -> EngineState {
        let Some(preview) = state.preview.as_mut() else {
            return state;
        };
        match event {
            Event::ExitPreview => state.preview = None,
            Event::ScrollUp => preview.scroll_up(1),
            Event::ScrollDown => preview.scroll_down(1),
            Event::ScrollPageUp => preview.scroll_up(preview.half_page()),
            Event::ScrollPageDown => preview.scroll_down(preview.half_page()),
            _ => {}
        }
        state
    }

    fn open(&self, state: EngineState) -> (EngineState, Outcome) {
        let path = match state.selected_entry() {
            Some(entry) if !entry.is_dir() => entry.path().to_path_buf(),
            _ => return (state, Outcome::Continue),
        };
        match self.opener.open(&path) {
            Ok(()) => (state, Outcome::Continue),
            Err(e) => {
                warn!(error = %e, "open failed");
                (state, Outcome::Failed(e))
            }
        }
    }

    fn home(&self, mut state: EngineState) -> (EngineState, Outcome) {
        let entries = match self.lister.list(&state.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %state.root.display(), error = %e, "home failed");
                return (state, Outcome::Failed(e));
            }
        };
        state.columns = vec![Column::new(state.root.clone(), entries)];
        state.active = 0;
        self.relayout(&mut state);
        (state, Outcome::Continue)
    }

    fn resize(&self, mut state: EngineState, width: u16, height: u16) -> EngineState {
        state.width = width;
        state.height = height;
        self.relayout(&mut state);
        if let Some(preview) = state.preview.as_mut() {
            let (w, h) = preview_viewport(width, height);
            preview.resize(w, h);
        }
        state
    }

    /// Recomputes the column budget and gives every column the uniform width.
    fn relayout(&self, state: &mut EngineState) {
        state.max_columns = self.layout.max_columns(state.width);
        let width = self.layout.column_width(state.width, state.columns.len());
        for col in &mut state.columns {
            col.set_width(width);
        }
    }
}
