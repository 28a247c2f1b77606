//! Error types for kiln-config

use std::path::{Path, PathBuf};

use crate::document::DocumentOrigin;

/// Result type for kiln-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a project's configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The defaults document shipped beside the tool could not be read.
    /// Indicates a broken installation.
    #[error("Base defaults could not be read from {path}: {source}")]
    MissingBaseDefaults {
        path: PathBuf,
        #[source]
        source: kiln_fs::Error,
    },

    /// The defaults document is not valid TOML or lacks a recognized key.
    #[error("Base defaults from {origin} are malformed: {message}")]
    MalformedBaseDefaults {
        origin: DocumentOrigin,
        message: String,
    },

    /// A manifest is not valid TOML or does not follow the profile schema.
    #[error("Failed to parse {origin}: {message}")]
    Parse {
        origin: DocumentOrigin,
        message: String,
    },

    /// The manifest exists but could not be read.
    #[error("Could not read manifest {path}: {source}")]
    OverlayRead {
        path: PathBuf,
        #[source]
        source: kiln_fs::Error,
    },

    /// The project's env file exists but could not be read or parsed.
    #[error("Could not load env file {path}: {source}")]
    DotEnv {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// The manifest was required but does not exist.
    #[error("Manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    #[error("Profile `{name}` is not defined in the defaults or the manifest")]
    UnknownProfile { name: String },

    /// A recognized key holds a value of the wrong shape.
    #[error("`{key}` in {origin} must be {expected}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        origin: DocumentOrigin,
    },

    /// Filesystem error from kiln-fs
    #[error(transparent)]
    Fs(#[from] kiln_fs::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this is the "no project root above the start directory" case.
    ///
    /// Callers commonly fall back to the working directory in that case.
    pub fn is_missing_root(&self) -> bool {
        matches!(self, Self::Fs(kiln_fs::Error::MissingRoot { .. }))
    }

    /// The file the error refers to, when there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::MissingBaseDefaults { path, .. }
            | Self::OverlayRead { path, .. }
            | Self::DotEnv { path, .. }
            | Self::ManifestNotFound { path } => Some(path),
            Self::MalformedBaseDefaults { origin, .. }
            | Self::Parse { origin, .. }
            | Self::InvalidValue { origin, .. } => origin.path(),
            Self::Fs(e) => Some(e.path()),
            Self::UnknownProfile { .. } | Self::Json(_) => None,
        }
    }
}
