//! Which profile sections take part in a merge

use std::fmt;

use crate::document::{ConfigDocument, ProfileSection};

/// The profile every document may define as its base section.
pub const DEFAULT_PROFILE: &str = "default";

/// Environment variables consulted by [`ProfileSelection::from_env`], in order.
pub const PROFILE_ENV_VARS: [&str; 2] = ["KILN_PROFILE", "FOUNDRY_PROFILE"];

/// How profile sections are chosen from each document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileSelection {
    /// Apply every section in document order. For a key set in several
    /// sections, the last one written wins.
    #[default]
    AllSections,
    /// Apply the `default` section, then the named one. Other sections are
    /// ignored.
    Named(String),
}

impl ProfileSelection {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Select the profile named by `KILN_PROFILE` or `FOUNDRY_PROFILE`.
    ///
    /// Falls back to [`AllSections`](Self::AllSections) when neither is set.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        PROFILE_ENV_VARS
            .iter()
            .filter_map(|var| lookup(*var))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .map(Self::Named)
            .unwrap_or_default()
    }

    /// The sections of `document` to apply, in application order.
    pub fn sections<'a>(&self, document: &'a ConfigDocument) -> Vec<&'a ProfileSection> {
        match self {
            Self::AllSections => document.profiles().iter().collect(),
            Self::Named(name) => {
                let mut sections: Vec<_> = document.profile(DEFAULT_PROFILE).into_iter().collect();
                if name != DEFAULT_PROFILE {
                    sections.extend(document.profile(name));
                }
                sections
            }
        }
    }
}

impl fmt::Display for ProfileSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllSections => write!(f, "all sections"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}
