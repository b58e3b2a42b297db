//! Internal library crate for millr.
//!
//! The shipped application is the `millr` binary (`src/main.rs`).
//!
//! This library exists to share code between targets (binary, tests) and to keep modules organized.
//! It is not considered a stable API for external use.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
pub mod utils;
