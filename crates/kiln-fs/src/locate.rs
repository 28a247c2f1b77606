//! Upward search for the project root
//!
//! Starting from a directory, each ancestor is checked in turn for the marker
//! manifest. The first directory that contains it is the project root. The
//! walk is iterative and stops at the filesystem root, detected as the point
//! where a directory is its own parent.

use std::path::{Path, PathBuf};

use crate::root::absolutize;
use crate::{Error, ProjectFile, ProjectRoot, Result};

/// Upper bound on the number of ancestors visited by a single search.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Finds the nearest ancestor directory containing the marker manifest.
#[derive(Debug, Clone)]
pub struct RootLocator {
    marker: PathBuf,
    max_depth: usize,
}

impl Default for RootLocator {
    fn default() -> Self {
        Self {
            marker: PathBuf::from(ProjectFile::Manifest.as_str()),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RootLocator {
    /// A locator searching for `kiln.toml`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search for a different marker file name.
    pub fn with_marker(mut self, marker: impl Into<PathBuf>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Limit how many directories a search may visit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn marker(&self) -> &Path {
        &self.marker
    }

    /// Locate the project root enclosing `start`.
    ///
    /// `start` itself is checked first, then each parent in turn. Returns
    /// `None` when the filesystem root is reached without finding the marker,
    /// when `start` cannot be made absolute, or when the depth bound is hit.
    pub fn locate(&self, start: impl AsRef<Path>) -> Option<ProjectRoot> {
        let start = start.as_ref();
        let mut current = match absolutize(start) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(?start, error = %e, "Cannot resolve search start");
                return None;
            }
        };

        for _ in 0..self.max_depth {
            if current.join(&self.marker).is_file() {
                tracing::debug!(root = ?current, "Found project root");
                let root = dunce::canonicalize(&current).unwrap_or(current);
                return Some(ProjectRoot::from_absolute(root));
            }

            let parent = current
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| current.clone());
            if parent == current {
                tracing::debug!(
                    ?start,
                    marker = ?self.marker,
                    "Reached filesystem root without a match"
                );
                return None;
            }
            current = parent;
        }

        tracing::warn!(
            ?start,
            max_depth = self.max_depth,
            "Stopped root search at depth limit"
        );
        None
    }

    /// Like [`locate`](Self::locate), but absence is an error.
    pub fn require(&self, start: impl AsRef<Path>) -> Result<ProjectRoot> {
        let start = start.as_ref();
        self.locate(start).ok_or_else(|| Error::MissingRoot {
            start: start.to_path_buf(),
            marker: self.marker.clone(),
        })
    }

    /// Locate the project root, treating `start` as the root when none is found.
    pub fn locate_or_start(&self, start: impl AsRef<Path>) -> Result<ProjectRoot> {
        let start = start.as_ref();
        match self.locate(start) {
            Some(root) => Ok(root),
            None => {
                tracing::debug!(?start, "No project root found, using start directory");
                ProjectRoot::new(start)
            }
        }
    }
}
