//! Well-known file names inside a kiln project.

use std::path::Path;

/// Files whose location is fixed relative to the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFile {
    /// The `kiln.toml` manifest. Its presence marks a project root.
    Manifest,
}

impl ProjectFile {
    /// Get the string representation of the file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "kiln.toml",
        }
    }
}

impl AsRef<Path> for ProjectFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectFile {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
