//! External process handling for millr.
//!
//! Implements the [Opener] seam and [SystemOpener], which hands a file to the platform's
//! default application (`open`, `start` or `xdg-open`) or to a configured command.
//!
//! Launching does not block the UI: the child is spawned with null stdio and kept as a
//! pending launch. [Opener::poll] reaps finished children and reports the ones that exited
//! with a failure, so `xdg-open` without a handler shows up as an error.

use crate::core::error::BrowseError;

use tracing::{debug, info, warn};

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Opens a file outside of millr.
pub trait Opener {
    fn open(&self, path: &Path) -> Result<(), BrowseError>;

    /// Reaps launches that have finished and returns the failed ones.
    fn poll(&self) -> Vec<BrowseError> {
        Vec::new()
    }
}

/// A spawned opener that has not been reaped yet.
#[derive(Debug)]
struct Launch {
    path: PathBuf,
    program: String,
    child: Child,
}

/// [Opener] that spawns the platform default opener, or `cmd` when configured.
#[derive(Debug, Default)]
pub struct SystemOpener {
    cmd: Option<String>,
    pending: RefCell<Vec<Launch>>,
}

impl SystemOpener {
    pub fn new(cmd: Option<String>) -> Self {
        let cmd = cmd.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        Self {
            cmd,
            pending: RefCell::default(),
        }
    }

    /// Number of launches still running or not yet polled.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// The program and leading arguments used to open a path.
    pub fn command_line(&self) -> Vec<String> {
        match &self.cmd {
            Some(cmd) => cmd.split_whitespace().map(str::to_string).collect(),
            None => platform_opener().iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> Result<(), BrowseError> {
        let argv = self.command_line();
        let Some((program, args)) = argv.split_first() else {
            return Err(BrowseError::launch(path, "no opener command configured"));
        };

        if which::which(program).is_err() {
            warn!(program = %program, "opener not found in PATH");
            return Err(BrowseError::launch(
                path,
                format!("'{program}' not found in PATH"),
            ));
        }

        let child = Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| BrowseError::launch(path, e.to_string()))?;

        info!(program = %program, path = %path.display(), pid = child.id(), "launched opener");
        self.pending.borrow_mut().push(Launch {
            path: path.to_path_buf(),
            program: program.clone(),
            child,
        });
        Ok(())
    }

    fn poll(&self) -> Vec<BrowseError> {
        let mut failures = Vec::new();
        self.pending
            .borrow_mut()
            .retain_mut(|launch| match launch.child.try_wait() {
                Ok(None) => true,
                Ok(Some(status)) if status.success() => {
                    debug!(program = %launch.program, "opener finished");
                    false
                }
                Ok(Some(status)) => {
                    warn!(program = %launch.program, %status, "opener failed");
                    failures.push(BrowseError::launch(
                        &launch.path,
                        format!("'{}' exited with {status}", launch.program),
                    ));
                    false
                }
                Err(e) => {
                    failures.push(BrowseError::launch(&launch.path, e.to_string()));
                    false
                }
            });
        failures
    }
}

#[cfg(target_os = "macos")]
fn platform_opener() -> &'static [&'static str] {
    &["open"]
}

#[cfg(windows)]
fn platform_opener() -> &'static [&'static str] {
    // empty title argument, otherwise `start` takes a quoted path as the window title
    &["cmd", "/C", "start", ""]
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_opener() -> &'static [&'static str] {
    &["xdg-open"]
}
