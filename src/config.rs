//! Configuration for millr.
//!
//! millr.toml is split into sections, each with its own submodule:
//! - [general]: column geometry, status line timing and the log file ([General]).
//! - [preview]: read caps, image grid and syntax theme, kept in the general submodule ([PreviewOptions]).
//! - [theme]: colors and border shapes handed to the renderer ([Theme]).
//! - [input]: key bindings ([Keys]) and the external opener ([OpenerConfig]).
//! - [load]: path resolution, parsing and default file generation ([Config]).

pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use general::{General, InternalGeneral, PreviewOptions};
pub use input::{Keys, OpenerConfig};
pub use load::{Config, RawConfig};
pub use theme::{BorderShape, ColorPair, Theme};
