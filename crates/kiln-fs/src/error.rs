//! Error types for kiln-fs

use std::path::PathBuf;

/// Result type for kiln-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in kiln-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No {marker} found in {start} or any parent directory")]
    MissingRoot { start: PathBuf, marker: PathBuf },

    #[error("Could not resolve {path} to an absolute path: {source}")]
    Absolutize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path the failed operation was working on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Absolutize { path, .. } => path,
            Self::MissingRoot { start, .. } => start,
        }
    }
}
