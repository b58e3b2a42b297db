//! Command-line argument parsing and help for millr.
//!
//! This module handles all CLI flag parsing used for config initialization and help.
//!
//! When invoked with no flags (`millr` or `millr PATH`), millr launches the TUI.

use crate::config::Config;
use crate::core::highlight::available_themes;

use clap::Parser;

/// millr - a Miller-column terminal file browser with text and image previews
#[derive(Parser, Debug)]
#[command(name = "millr", version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n  MILLR_CONFIG    Override the default config path\n  MILLR_LOG       Log filter, e.g. \"debug\" or \"millr=trace\"")]
pub struct Args {
    /// Directory to open (defaults to the current directory)
    pub path: Option<String>,

    /// Generate a minimal default configuration
    #[arg(long, conflicts_with_all = ["init_full", "path"])]
    pub init: bool,

    /// Generate the full configuration with all options
    #[arg(long = "init-full", conflicts_with = "path")]
    pub init_full: bool,

    /// Display all the configuration options
    #[arg(long = "config-help")]
    pub config_help: bool,

    /// Display all the default keybinds
    #[arg(long, visible_aliases = ["keybind", "key"])]
    pub keybinds: bool,
}

/// What `main` should do after the arguments were handled.
#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    RunApp(Option<String>),
    Exit,
}

/// Parses the process arguments and runs the informational flags.
pub fn handle_args() -> CliAction {
    handle(Args::parse())
}

pub fn handle(args: Args) -> CliAction {
    if args.config_help {
        print_config_help();
        return CliAction::Exit;
    }
    if args.keybinds {
        println!("{}", KEYBINDS_TEXT);
        return CliAction::Exit;
    }
    if args.init || args.init_full {
        let config_path = Config::default_path();
        if let Err(e) = Config::generate_default(&config_path, args.init) {
            eprintln!("Error: {}", e);
        }
        return CliAction::Exit;
    }
    CliAction::RunApp(args.path.filter(|p| !p.trim().is_empty()))
}

const KEYBINDS_TEXT: &str = r##"
=========================
 Key Bindings
=========================
[keys]
  move_up                   ["k", "up"]
  move_down                 ["j", "down"]
  descend                   ["l", "right", "enter"]
  ascend                    ["h", "left", "backspace"]
  preview                   ["p"]         (files only)
  open                      ["o"]         (default application)
  home                      ["home"]      (back to the start directory)
  quit                      ["<c-c>", "q"]

  While a preview is open:
  exit_preview              ["esc"]
  scroll_up                 ["k", "up"]
  scroll_down               ["j", "down"]
  page_up                   ["pgup", "<c-u>"]   (half a page)
  page_down                 ["pgdown", "<c-d>"]

  Syntax Reference:
    Modifiers: <c-x> (Ctrl), <m-x>/<a-x> (Alt/Meta), <s-x> (Shift)
    Standard:  ctrl+x, alt+x, shift+x, meta+x
    Special:   " ", "space", "back", "enter", "esc", "tab", "pgup", "pgdown", "home", "end"

  Note:
    - Shorthand (c-, m-, s-) only works inside brackets <>.
"##;

fn print_config_help() {
    let help_text = r##"
millr - Full Configuration Guide (millr.toml)

=========================
 General Settings
=========================
[general]
  min_column_width           Narrowest a column may get; decides how many fit [default: 30]
  margin                     Cells kept free beside the columns [default: 2]
  status_seconds             How long errors stay in the status line [default: 5]
  log_file                   Log destination [default: <cache dir>/millr/millr.log]

=========================
 Preview Settings
=========================
[preview]
  max_bytes                  Bytes read from a file for a text preview [default: 10485760]
  max_lines                  Lines of a text preview that are highlighted and shown [default: 2000]
  image_width                Columns of the ASCII image grid [default: 80]
  image_height               Rows of the ASCII image grid [default: 40]
  syntax_theme               Highlighting theme, see the list below [default: base16-ocean.dark]
  highlight                  Syntax highlight text previews [default: true]

=========================
 Theme Configuration
=========================
[theme]
  border_shape               "square", "rounded", "double" or "thick" for columns
  preview_shape              Same choices for the preview frame [default: "rounded"]
  dir_prefix                 Marker in front of directories [default: "▶ "]

Each sub-table supports fg/bg colors ("Red", "Blue", hex "#RRGGBB", or "default"):

[theme.header]               Column headers (always bold)
[theme.entry]                File entries
[theme.directory]            Directory entries
[theme.selection]            Selected entry; "default" means reversed video
[theme.border]               Column borders
[theme.active_border]        Border of the focused column
[theme.preview_border]       Preview frame
[theme.status]               Status line messages

=========================
 Opener
=========================
[opener]
  cmd                        Command used to open files [default: open / start / xdg-open]
"##;

    println!("{}{}", help_text, KEYBINDS_TEXT);
    println!("Syntax themes:\n  {}", available_themes().join("\n  "));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_argument_runs_app() -> Result<(), Box<dyn std::error::Error>> {
        let args = Args::try_parse_from(["millr", "/tmp"])?;
        assert_eq!(handle(args), CliAction::RunApp(Some("/tmp".into())));

        let args = Args::try_parse_from(["millr"])?;
        assert_eq!(handle(args), CliAction::RunApp(None));
        Ok(())
    }

    #[test]
    fn init_flags_conflict_with_path() {
        assert!(Args::try_parse_from(["millr", "--init", "/tmp"]).is_err());
        assert!(Args::try_parse_from(["millr", "--init", "--init-full"]).is_err());
        assert!(Args::try_parse_from(["millr", "--bogus"]).is_err());
    }

    #[test]
    fn keybind_aliases() -> Result<(), Box<dyn std::error::Error>> {
        let args = Args::try_parse_from(["millr", "--key"])?;
        assert!(args.keybinds);
        Ok(())
    }
}
