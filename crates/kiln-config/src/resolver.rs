//! Configuration resolution for a project root
//!
//! The `ConfigResolver` loads the base defaults, then the project's
//! `kiln.toml` (if any), and merges them into a [`ResolvedConfig`]:
//!
//! ```text
//! Unloaded -> BaseApplied -> OverlayApplied (optional) -> Ready
//! ```
//!
//! Nothing is cached. Every call to [`ConfigResolver::resolve`] re-reads both
//! documents.

use std::collections::HashMap;
use std::path::PathBuf;

use kiln_fs::ProjectRoot;

use crate::defaults::BaseDefaults;
use crate::document::{ConfigDocument, DocumentOrigin};
use crate::dotenv::{self, DOT_ENV_FILE};
use crate::expand;
use crate::merge::merge;
use crate::profile::ProfileSelection;
use crate::resolved::ResolvedConfig;
use crate::{Error, Result};

/// What to do when the project has no `kiln.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingManifest {
    /// Resolve from the base defaults alone.
    #[default]
    UseDefaults,
    /// Fail with [`Error::ManifestNotFound`].
    Error,
}

/// Where the base defaults come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DefaultsSource {
    /// The document compiled into the crate.
    #[default]
    Packaged,
    /// A document on disk, for distributions that ship defaults separately.
    File(PathBuf),
}

/// Knobs for resolving a project's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOptions {
    /// Which profile sections are merged
    pub profile: ProfileSelection,

    /// Behaviour when the manifest does not exist
    pub missing_manifest: MissingManifest,

    /// Expand `$VAR` references in manifest strings
    pub expand_env: bool,

    /// Env file, relative to the root, whose variables feed expansion.
    /// Process variables take precedence over it.
    pub dot_env: Option<PathBuf>,

    /// Source of the base defaults
    pub defaults: DefaultsSource,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            profile: ProfileSelection::default(),
            missing_manifest: MissingManifest::default(),
            expand_env: true,
            dot_env: Some(PathBuf::from(DOT_ENV_FILE)),
            defaults: DefaultsSource::default(),
        }
    }
}

impl ProjectOptions {
    pub fn with_profile(mut self, profile: ProfileSelection) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_missing_manifest(mut self, policy: MissingManifest) -> Self {
        self.missing_manifest = policy;
        self
    }

    pub fn with_env_expansion(mut self, enabled: bool) -> Self {
        self.expand_env = enabled;
        self
    }

    /// Read expansion variables from `path` instead of `.env`.
    pub fn with_dot_env(mut self, path: impl Into<PathBuf>) -> Self {
        self.dot_env = Some(path.into());
        self
    }

    pub fn without_dot_env(mut self) -> Self {
        self.dot_env = None;
        self
    }

    pub fn with_defaults_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.defaults = DefaultsSource::File(path.into());
        self
    }
}

/// Resolves configuration by layering a project's manifest over the defaults.
pub struct ConfigResolver {
    /// Project root directory
    root: ProjectRoot,

    options: ProjectOptions,
}

impl ConfigResolver {
    /// Create a resolver with default options.
    pub fn new(root: ProjectRoot) -> Self {
        Self::with_options(root, ProjectOptions::default())
    }

    pub fn with_options(root: ProjectRoot, options: ProjectOptions) -> Self {
        Self { root, options }
    }

    /// Resolve the configuration.
    ///
    /// Loads the base defaults, then `<root>/kiln.toml`. A manifest that does
    /// not exist is handled according to [`MissingManifest`]; one that exists
    /// but cannot be read or parsed is an error.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use kiln_config::ConfigResolver;
    /// use kiln_fs::ProjectRoot;
    ///
    /// let resolver = ConfigResolver::new(ProjectRoot::new("/path/to/project")?);
    /// let config = resolver.resolve()?;
    /// println!("sources in {}", config.src());
    /// ```
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        tracing::debug!(root = %self.root, profile = %self.options.profile, "Resolving configuration");

        let base = match &self.options.defaults {
            DefaultsSource::Packaged => BaseDefaults::load()?,
            DefaultsSource::File(path) => BaseDefaults::from_path(path)?,
        };

        let mut overlay = self.load_manifest()?;
        if self.options.expand_env {
            if let Some(doc) = overlay.as_mut() {
                let file_vars = self.load_dot_env()?;
                doc.expand_env_with(&|name: &str| {
                    expand::process_env(name).or_else(|| file_vars.get(name).cloned())
                });
            }
        }

        let config = merge(&base, overlay.as_ref(), &self.options.profile)?;
        tracing::debug!(root = %self.root, "Configuration ready");
        Ok(config)
    }

    /// Load the project manifest, distinguishing "absent" from "unreadable".
    fn load_manifest(&self) -> Result<Option<ConfigDocument>> {
        let path = self.root.manifest_path();
        match kiln_fs::io::read_optional(&path) {
            Ok(Some(content)) => {
                tracing::debug!(?path, "Loading manifest");
                ConfigDocument::parse(&content, DocumentOrigin::File(path)).map(Some)
            }
            Ok(None) => match self.options.missing_manifest {
                MissingManifest::UseDefaults => {
                    tracing::debug!(?path, "No manifest found, using defaults only");
                    Ok(None)
                }
                MissingManifest::Error => Err(Error::ManifestNotFound { path }),
            },
            Err(source) => Err(Error::OverlayRead { path, source }),
        }
    }

    fn load_dot_env(&self) -> Result<HashMap<String, String>> {
        match &self.options.dot_env {
            Some(file) => dotenv::read_vars(&self.root.resolve(file)),
            None => Ok(HashMap::new()),
        }
    }

    /// Get the project root
    pub fn root(&self) -> &ProjectRoot {
        &self.root
    }

    pub fn options(&self) -> &ProjectOptions {
        &self.options
    }

    /// Check if a project manifest exists
    pub fn has_manifest(&self) -> bool {
        self.root.has_manifest()
    }
}
