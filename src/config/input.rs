//! Input configuration options for millr
//!
//! This module defines the `[keys]` and `[opener]` configuration options which are read from
//! the millr.toml configuration file.

use serde::Deserialize;

/// Key bindings per engine event
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Keys {
    move_up: Vec<String>,
    move_down: Vec<String>,
    descend: Vec<String>,
    ascend: Vec<String>,
    preview: Vec<String>,
    exit_preview: Vec<String>,
    scroll_up: Vec<String>,
    scroll_down: Vec<String>,
    page_up: Vec<String>,
    page_down: Vec<String>,
    open: Vec<String>,
    home: Vec<String>,
    quit: Vec<String>,
}

/// Opener configuration options
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct OpenerConfig {
    cmd: Option<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    move_up,
    move_down,
    descend,
    ascend,
    preview,
    exit_preview,
    scroll_up,
    scroll_down,
    page_up,
    page_down,
    open,
    home,
    quit,
);

/// Default input configuration options
impl Default for Keys {
    fn default() -> Self {
        Keys {
            move_up: vec!["k".into(), "Up".into()],
            move_down: vec!["j".into(), "Down".into()],
            descend: vec!["l".into(), "Right".into(), "Enter".into()],
            ascend: vec!["h".into(), "Left".into(), "Backspace".into()],
            preview: vec!["p".into()],

            exit_preview: vec!["Esc".into()],
            scroll_up: vec!["k".into(), "Up".into()],
            scroll_down: vec!["j".into(), "Down".into()],
            page_up: vec!["PgUp".into(), "Ctrl+u".into()],
            page_down: vec!["PgDown".into(), "Ctrl+d".into()],

            open: vec!["o".into()],
            home: vec!["Home".into()],
            quit: vec!["Ctrl+c".into(), "q".into()],
        }
    }
}

impl OpenerConfig {
    /// The configured opener command, `None` for the platform default.
    #[inline]
    pub fn cmd(&self) -> Option<&str> {
        self.cmd
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}
