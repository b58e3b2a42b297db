//! Syntax highlighting for text previews.
//!
//! Uses syntect's bundled syntaxes and themes and emits 24-bit ANSI escaped text, which the
//! preview pane turns back into styled spans with `ansi-to-tui`.

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};

use std::sync::LazyLock;

/// Theme used when the configured one is not bundled with syntect.
pub const DEFAULT_SYNTAX_THEME: &str = "base16-ocean.dark";

const ANSI_RESET: &str = "\x1b[0m";

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Turns file contents into highlighted text.
///
/// Returns `None` when the extension is unknown or highlighting fails, in which case the caller
/// shows the raw text.
pub trait Highlighter {
    fn highlight(&self, text: &str, extension: &str) -> Option<String>;
}

/// [Highlighter] backed by syntect.
#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
    theme_name: String,
}

impl SyntectHighlighter {
    pub fn new(theme_name: impl Into<String>) -> Self {
        Self {
            theme_name: theme_name.into(),
        }
    }

    fn theme(&self) -> Option<&'static Theme> {
        THEMES
            .themes
            .get(&self.theme_name)
            .or_else(|| THEMES.themes.get(DEFAULT_SYNTAX_THEME))
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_SYNTAX_THEME)
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, text: &str, extension: &str) -> Option<String> {
        if extension.is_empty() {
            return None;
        }
        let syntax = SYNTAXES.find_syntax_by_extension(extension)?;
        let theme = self.theme()?;

        let mut lines = HighlightLines::new(syntax, theme);
        let mut out = String::with_capacity(text.len() * 2);
        for line in LinesWithEndings::from(text) {
            let ranges = lines.highlight_line(line, &SYNTAXES).ok()?;
            out.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        out.push_str(ANSI_RESET);
        Some(out)
    }
}

/// Names of the themes syntect ships with, for `--config-help`.
pub fn available_themes() -> Vec<&'static str> {
    THEMES.themes.keys().map(String::as_str).collect()
}
