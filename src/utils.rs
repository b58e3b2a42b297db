//! Miscellaneous utility functions for millr.
//!
//! This module holds the [helpers] submodule, which provides commonly used utilities such as
//! color parsing, home path handling and start directory resolution, and the [cli] submodule
//! with argument parsing and help texts.

pub mod cli;
pub mod helpers;

pub use helpers::{
    clamp_column_width, default_log_path, expand_home_path, get_home, parse_color,
    resolve_initial_dir, shorten_home_path,
};
