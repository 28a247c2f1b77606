//! The project root directory

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, ProjectFile, Result};

/// An absolute directory that anchors a kiln project.
///
/// Produced by [`RootLocator`](crate::RootLocator) or designated explicitly by
/// a caller. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectRoot {
    path: PathBuf,
}

impl ProjectRoot {
    /// Designate `path` as a project root.
    ///
    /// The path is made absolute (a leading `~` is expanded). It does not have
    /// to contain a manifest.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            path: absolutize(path.as_ref())?,
        })
    }

    pub(crate) fn from_absolute(path: PathBuf) -> Self {
        debug_assert!(path.is_absolute());
        Self { path }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }

    /// Join a relative segment onto the root.
    pub fn join(&self, segment: impl AsRef<Path>) -> PathBuf {
        self.path.join(segment)
    }

    /// Where this project's `kiln.toml` lives (whether or not it exists).
    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(ProjectFile::Manifest)
    }

    pub fn has_manifest(&self) -> bool {
        self.manifest_path().is_file()
    }

    /// Resolve a configured directory against the root.
    ///
    /// Absolute values are returned unchanged.
    pub fn resolve(&self, configured: impl AsRef<Path>) -> PathBuf {
        let configured = configured.as_ref();
        if configured.is_absolute() {
            configured.to_path_buf()
        } else {
            self.path.join(configured)
        }
    }
}

impl AsRef<Path> for ProjectRoot {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ProjectRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Turn `path` into an absolute path.
///
/// Existing paths are canonicalized (symlinks resolved, no `\\?\` prefix on
/// Windows). Paths that do not exist are made absolute against the current
/// directory without touching the filesystem.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_home(path);
    match dunce::canonicalize(&expanded) {
        Ok(canonical) => Ok(canonical),
        Err(_) => std::path::absolute(&expanded).map_err(|source| Error::Absolutize {
            path: expanded.clone(),
            source,
        }),
    }
}

fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
