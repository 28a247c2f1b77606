//! Parsed configuration documents
//!
//! A document is one TOML file (or the packaged defaults) reduced to its
//! `[profile]` table: an ordered list of named sections, each an ordered table
//! of settings. Order is preserved exactly as written because the merge is
//! order-sensitive.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::expand;
use crate::{Error, Result};

/// Name of the top-level table holding profile sections.
pub const PROFILE_TABLE: &str = "profile";

/// Where a document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOrigin {
    /// The defaults compiled into the tool.
    Packaged,
    /// A file on disk.
    File(PathBuf),
}

impl DocumentOrigin {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Packaged => None,
            Self::File(path) => Some(path),
        }
    }
}

impl fmt::Display for DocumentOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Packaged => write!(f, "packaged defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One `[profile.<name>]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSection {
    name: String,
    settings: toml::Table,
}

impl ProfileSection {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Settings in document order.
    pub fn settings(&self) -> &toml::Table {
        &self.settings
    }

    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.settings.get(key)
    }
}

/// A parsed settings file: `profile_name -> {key -> value}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    origin: DocumentOrigin,
    profiles: Vec<ProfileSection>,
}

impl ConfigDocument {
    /// Parse TOML content.
    ///
    /// Only the `[profile]` table is retained. A document without one has no
    /// sections. `profile` itself and each of its entries must be tables.
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::{ConfigDocument, DocumentOrigin};
    ///
    /// let doc = ConfigDocument::parse(r#"
    /// [profile.default]
    /// src = "contracts"
    ///
    /// [profile.ci]
    /// out = "build"
    /// "#, DocumentOrigin::Packaged).unwrap();
    ///
    /// let names: Vec<_> = doc.profiles().iter().map(|p| p.name()).collect();
    /// assert_eq!(names, ["default", "ci"]);
    /// ```
    pub fn parse(content: &str, origin: DocumentOrigin) -> Result<Self> {
        let mut table: toml::Table = toml::from_str(content).map_err(|e| Error::Parse {
            origin: origin.clone(),
            message: e.to_string(),
        })?;

        let profiles = match table.remove(PROFILE_TABLE) {
            None => Vec::new(),
            Some(toml::Value::Table(profiles)) => profiles
                .into_iter()
                .map(|(name, value)| match value {
                    toml::Value::Table(settings) => Ok(ProfileSection { name, settings }),
                    other => Err(Error::Parse {
                        origin: origin.clone(),
                        message: format!(
                            "`{PROFILE_TABLE}.{name}` must be a table, found {}",
                            other.type_str()
                        ),
                    }),
                })
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(Error::Parse {
                    origin,
                    message: format!("`{PROFILE_TABLE}` must be a table, found {}", other.type_str()),
                });
            }
        };

        Ok(Self { origin, profiles })
    }

    /// Read and parse a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = kiln_fs::io::read_text(path).map_err(|source| Error::OverlayRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, DocumentOrigin::File(path.to_path_buf()))
    }

    pub fn origin(&self) -> &DocumentOrigin {
        &self.origin
    }

    /// Profile sections in document order.
    pub fn profiles(&self) -> &[ProfileSection] {
        &self.profiles
    }

    pub fn profile(&self, name: &str) -> Option<&ProfileSection> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Whether any section sets `key`.
    pub fn defines(&self, key: &str) -> bool {
        self.profiles.iter().any(|p| p.settings.contains_key(key))
    }

    /// Expand `$VAR` and `${VAR}` references in every string value.
    pub fn expand_env_with(&mut self, lookup: &dyn Fn(&str) -> Option<String>) {
        for section in &mut self.profiles {
            for (_, value) in section.settings.iter_mut() {
                expand::expand_value(value, lookup);
            }
        }
    }
}
