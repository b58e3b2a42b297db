//! Application logic for millr.
//!
//! - [engine]: the column navigation state machine ([Navigator], [EngineState], [Event]).
//! - [column]: one open directory level ([Column]).
//! - [layout]: column budget, widths and the visible window ([ColumnLayout]).
//! - [preview]: the preview viewport and its scroll offset ([PreviewState]).
//! - [keymap]: key parsing and mode dependent key to event mapping ([Keymap]).
//! - [state]: the [App] wrapper the terminal loop drives.

pub mod column;
pub mod engine;
pub mod keymap;
pub mod layout;
pub mod preview;
pub mod state;

pub use column::Column;
pub use engine::{EngineState, Event, Hit, Navigator, Outcome};
pub use keymap::{Key, Keymap, parse_key};
pub use layout::{ColumnLayout, preview_viewport, visible_window};
pub use preview::PreviewState;
pub use state::{App, KeypressResult};
