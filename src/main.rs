//! main.rs
//! Entry point for millr

use millr::app::App;
use millr::config::Config;
use millr::core::terminal;
use millr::utils::cli::{CliAction, handle_args};
use millr::utils::{default_log_path, resolve_initial_dir};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::event::DisableMouseCapture,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[millr] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let path_arg = match handle_args() {
        CliAction::Exit => return Ok(()),
        CliAction::RunApp(path) => path,
    };

    let config = Config::load();
    if let Some(log_path) = config
        .general()
        .log_file()
        .map(Path::to_path_buf)
        .or_else(default_log_path)
    {
        init_logging(&log_path);
    }

    let root = resolve_initial_dir(path_arg.as_deref()).with_context(|| {
        format!(
            "[millr] Path '{}' cannot be opened",
            path_arg.as_deref().unwrap_or(".")
        )
    })?;

    let (width, height) = terminal::initial_size();
    let mut app = App::new(&config, &root, width, height)
        .with_context(|| format!("[millr] cannot start in {}", root.display()))?;

    info!(root = %root.display(), "starting");
    terminal::run_terminal(&mut app, config.theme())?;
    Ok(())
}

/// Sends tracing output to `path`, filtered by `MILLR_LOG` (default `info`).
/// Logging stays off when the file cannot be opened.
fn init_logging(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };

    let filter = EnvFilter::try_from_env("MILLR_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}
