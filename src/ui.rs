//! Terminal UI for millr.
//!
//! - [render]: the top-level render entry and off-screen rendering.
//! - [panes]: drawers for columns, the preview frame and the status line.

pub mod panes;
pub mod render;

pub use render::{draw, render, render_to_string};
