//! Core runtime logic for millr.
//!
//! This module contains the non-UI pieces the navigation engine is built on:
//! - [fm]: directory listing (see [Entry], [DirectoryLister], [FsLister]).
//! - [formatter]: entry ordering, time formatting and width fitting.
//! - [preview]: the [Previewer] seam and the [FilePreviewer] text/image dispatcher.
//! - [highlight]: syntect backed syntax highlighting.
//! - [ascii]: image to ASCII art conversion.
//! - [proc]: handing files to an external opener.
//! - [error]: the [BrowseError] taxonomy.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.

pub mod ascii;
pub mod error;
pub mod fm;
pub mod formatter;
pub mod highlight;
pub mod preview;
pub mod proc;
pub mod terminal;

pub use ascii::{AsciiImage, ImageConverter, image_to_ascii, is_image_file};
pub use error::BrowseError;
pub use fm::{DirectoryLister, Entry, FsLister, PARENT_LINK, browse_dir};
pub use formatter::{format_modified, sanitize_to_exact_width, sort_entries};
pub use highlight::{Highlighter, SyntectHighlighter};
pub use preview::{FilePreviewer, PreviewContent, Previewer};
pub use proc::{Opener, SystemOpener};
