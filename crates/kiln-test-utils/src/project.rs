//! [`TestProject`] builder for kiln test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the manifest file that marks a project root.
pub const MANIFEST: &str = "kiln.toml";

/// A temporary directory laid out as a kiln project.
///
/// # Example
///
/// ```rust,no_run
/// use kiln_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.write_manifest("[profile.default]\nsrc = \"contracts\"\n");
/// let nested = project.create_dir("contracts/tokens");
/// assert!(nested.is_dir());
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory without a manifest.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a temporary directory whose manifest holds `content`.
    pub fn with_manifest(content: &str) -> Self {
        let project = Self::new();
        project.write_manifest(content);
        project
    }

    /// Return the path of the temporary directory.
    ///
    /// This is the path as handed out by the OS, which may itself sit behind a
    /// symlink (macOS `/var` → `/private/var`). Use [`canonical_root`] when
    /// comparing against discovered roots.
    ///
    /// [`canonical_root`]: Self::canonical_root
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The root with symlinks resolved.
    pub fn canonical_root(&self) -> PathBuf {
        dunce::canonicalize(self.root()).unwrap()
    }

    /// Path of the project manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.root().join(MANIFEST)
    }

    /// Write `content` to the manifest at the project root.
    pub fn write_manifest(&self, content: &str) {
        fs::write(self.manifest_path(), content).unwrap();
    }

    /// Write `content` to `path` (relative to root), creating parents.
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Create `path` (relative to root) and all its parents.
    pub fn create_dir(&self, path: &str) -> PathBuf {
        let full_path = self.root().join(path);
        fs::create_dir_all(&full_path).unwrap();
        full_path
    }
}
