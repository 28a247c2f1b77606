//! Packaged base defaults
//!
//! The baseline document is compiled into the crate from
//! `defaults/base_config.toml` and supplies a value for every recognized key.
//! It is part of the tool itself, so any problem with it is reported as a
//! broken installation rather than a user configuration mistake.

use std::path::Path;

use crate::document::{ConfigDocument, DocumentOrigin};
use crate::resolved::RECOGNIZED_KEYS;
use crate::{Error, Result};

const PACKAGED: &str = include_str!("../defaults/base_config.toml");

/// Loader for the baseline settings document.
pub struct BaseDefaults;

impl BaseDefaults {
    /// The raw packaged document.
    pub fn packaged_source() -> &'static str {
        PACKAGED
    }

    /// Load the packaged defaults.
    pub fn load() -> Result<ConfigDocument> {
        Self::parse_checked(PACKAGED, DocumentOrigin::Packaged)
    }

    /// Load defaults shipped as a separate file beside the tool.
    pub fn from_path(path: &Path) -> Result<ConfigDocument> {
        let content = kiln_fs::io::read_text(path).map_err(|source| {
            Error::MissingBaseDefaults {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::parse_checked(&content, DocumentOrigin::File(path.to_path_buf()))
    }

    fn parse_checked(content: &str, origin: DocumentOrigin) -> Result<ConfigDocument> {
        let document = ConfigDocument::parse(content, origin.clone()).map_err(|e| match e {
            Error::Parse { origin, message } => Error::MalformedBaseDefaults { origin, message },
            other => other,
        })?;

        let missing: Vec<_> = RECOGNIZED_KEYS
            .iter()
            .filter(|key| !document.defines(key))
            .collect();
        if !missing.is_empty() {
            return Err(Error::MalformedBaseDefaults {
                origin,
                message: format!("no value for {missing:?}"),
            });
        }

        tracing::trace!(%origin, sections = document.profiles().len(), "Loaded base defaults");
        Ok(document)
    }
}
