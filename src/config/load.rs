//! The main config loading module for millr.
//!
//! Handles loading and deserializing settings from `millr.toml`.
//!
//! Provides and manages the main [Config] struct, as well as the [RawConfig] used for parsing.
//!
//! Also implements default config generation for `millr --init` and `millr --init-full`.

use crate::config::{General, InternalGeneral, Keys, OpenerConfig, PreviewOptions, Theme};
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Raw configuration as read from the toml file
/// This struct is deserialized directly from the toml file.
/// It uses owned types and is then converted into the main [Config] struct.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    preview: PreviewOptions,
    theme: Theme,
    keys: Keys,
    opener: OpenerConfig,
}

/// Main configuration struct for millr
/// This struct holds the processed configuration options.
#[derive(Debug)]
pub struct Config {
    general: InternalGeneral,
    preview: PreviewOptions,
    theme: Theme,
    keys: Keys,
    opener: OpenerConfig,
}

/// Conversion from RawConfig to Config
/// This handles any necessary processing of the raw values
impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            preview: raw.preview,
            theme: raw.theme,
            keys: raw.keys,
            opener: raw.opener,
        }
    }
}

impl Config {
    /// Load configuration from the default path
    /// If the file does not exist or fails to parse, returns the default configuration.
    ///
    /// Called by entry point to load config at startup.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from `path`, falling back to the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            eprintln!(
                "No millr.toml config file found. Using internal defaults. (Tip: run 'millr --init' to generate a config file.)"
            );
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error parsing config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses a full config from a toml string.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn preview(&self) -> &PreviewOptions {
        &self.preview
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    #[inline]
    pub fn opener(&self) -> &OpenerConfig {
        &self.opener
    }

    /// Determine the default configuration file path.
    /// Checks the MILLR_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/millr/millr.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("MILLR_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("millr/millr.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/millr/millr.toml");
        }
        PathBuf::from("millr.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path, minimal: bool) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = if minimal { MINIMAL_TOML } else { FULL_TOML };
        fs::write(path, content)?;
        println!(
            "{} Default config generated at {:?}",
            if minimal { "Minimal" } else { "Full" },
            path
        );
        Ok(())
    }
}

/// Default configuration options
impl Default for Config {
    fn default() -> Self {
        Config::from(RawConfig::default())
    }
}

const FULL_TOML: &str = r##"# millr.toml - default configuration for millr

# Note:
# Commented values are the internal defaults of millr
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan")
# Run `millr --config-help` for a description of every option.

[general]
# min_column_width = 30
# margin = 2
# status_seconds = 5
# log_file = "~/.cache/millr/millr.log"

[preview]
# max_bytes = 10485760
# max_lines = 2000
# image_width = 80
# image_height = 40
# syntax_theme = "base16-ocean.dark"
# highlight = true

[theme]
# border_shape = "square"
# preview_shape = "rounded"
# dir_prefix = "▶ "

# [theme.header]
# fg = "default"
# bg = "#303030"

# [theme.entry]
# fg = "default"
# bg = "default"

# [theme.directory]
# fg = "blue"
# bg = "default"

# selection left at "default" is drawn in reversed video
# [theme.selection]
# fg = "default"
# bg = "default"

# [theme.border]
# fg = "#444444"

# [theme.active_border]
# fg = "blue"

# [theme.preview_border]
# fg = "#444444"

# [theme.status]
# fg = "red"

# [opener]
# cmd = "xdg-open"

# [keys]
# move_up = ["k", "up"]
# move_down = ["j", "down"]
# descend = ["l", "right", "enter"]
# ascend = ["h", "left", "backspace"]
# preview = ["p"]
# open = ["o"]
# home = ["home"]
# quit = ["<c-c>", "q"]

# Keys while a preview is open
# exit_preview = ["esc"]
# scroll_up = ["k", "up"]
# scroll_down = ["j", "down"]
# page_up = ["pgup", "<c-u>"]
# page_down = ["pgdown", "<c-d>"]
"##;

const MINIMAL_TOML: &str = r##"# millr.toml - minimal configuration
# Only a few basic options. The rest uses internal defaults.
# For advanced options, see millr --config-help.

[general]
min_column_width = 30

[preview]
highlight = true

[theme]
border_shape = "square"
"##;
