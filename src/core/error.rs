//! Error taxonomy for millr.
//!
//! Every failure the browser can recover from is a [BrowseError]. None of them are fatal:
//! the transition that produced one is aborted, the previous state is kept and the message is
//! shown in the status line and written to the log.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Recoverable failures raised by the lister, the previewers and the opener.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// A directory or file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An image file could not be decoded.
    #[error("cannot decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The external opener could not be launched or exited with a failure.
    #[error("failed to open {}: {reason}", path.display())]
    Launch { path: PathBuf, reason: String },
}

impl BrowseError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        BrowseError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn decode(path: &Path, source: image::ImageError) -> Self {
        BrowseError::Decode {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn launch(path: &Path, reason: impl Into<String>) -> Self {
        BrowseError::Launch {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// The path the failed operation was working on.
    pub fn path(&self) -> &Path {
        match self {
            BrowseError::Io { path, .. }
            | BrowseError::Decode { path, .. }
            | BrowseError::Launch { path, .. } => path,
        }
    }

    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, BrowseError::Io { .. })
    }

    #[inline]
    pub fn is_decode(&self) -> bool {
        matches!(self, BrowseError::Decode { .. })
    }

    #[inline]
    pub fn is_launch(&self) -> bool {
        matches!(self, BrowseError::Launch { .. })
    }
}
