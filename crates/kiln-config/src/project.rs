//! A located project bound to its resolved configuration

use std::fmt;
use std::path::{Path, PathBuf};

use kiln_fs::{ProjectRoot, RootLocator};

use crate::Result;
use crate::resolved::ResolvedConfig;
use crate::resolver::{ConfigResolver, ProjectOptions};

/// A project root together with the configuration resolved for it.
///
/// The configuration is resolved once, at construction. A `Project` is never
/// built from a partially resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    root: ProjectRoot,
    config: ResolvedConfig,
}

impl Project {
    /// Open the project rooted at `root` with default options.
    ///
    /// `root` does not need to contain a `kiln.toml`; without one the
    /// configuration is the base defaults.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(root, ProjectOptions::default())
    }

    pub fn open_with(root: impl AsRef<Path>, options: ProjectOptions) -> Result<Self> {
        Self::from_root(ProjectRoot::new(root)?, options)
    }

    /// Resolve configuration for an already established root.
    pub fn from_root(root: ProjectRoot, options: ProjectOptions) -> Result<Self> {
        let config = ConfigResolver::with_options(root.clone(), options).resolve()?;
        tracing::debug!(%root, "Opened project");
        Ok(Self { root, config })
    }

    /// Search upward from `start` for a `kiln.toml` and open that project.
    ///
    /// Fails with a missing-root error (see [`Error::is_missing_root`]) when
    /// no ancestor carries a manifest.
    ///
    /// [`Error::is_missing_root`]: crate::Error::is_missing_root
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        let root = RootLocator::new().require(start)?;
        Self::from_root(root, ProjectOptions::default())
    }

    /// Like [`discover`](Self::discover), falling back to `start` itself.
    pub fn discover_or_start(start: impl AsRef<Path>) -> Result<Self> {
        let root = RootLocator::new().locate_or_start(start)?;
        Self::from_root(root, ProjectOptions::default())
    }

    pub fn root(&self) -> &ProjectRoot {
        &self.root
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.manifest_path()
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root.resolve(self.config.src())
    }

    pub fn test_dir(&self) -> PathBuf {
        self.root.resolve(self.config.test())
    }

    pub fn script_dir(&self) -> PathBuf {
        self.root.resolve(self.config.script())
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.resolve(self.config.out())
    }

    /// Dependency directories, in configured order.
    pub fn lib_dirs(&self) -> Vec<PathBuf> {
        self.config
            .libs()
            .iter()
            .map(|lib| self.root.resolve(lib))
            .collect()
    }

    pub fn into_parts(self) -> (ProjectRoot, ResolvedConfig) {
        (self.root, self.config)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Project({})", self.root)
    }
}
