//! Overlay merge
//!
//! Flattens the base document and then the overlay into one key/value table.
//! Sections are visited in the order the [`ProfileSelection`] yields them and
//! keys in document order; each pair overwrites whatever was there before, so
//! the last write wins:
//! - overlay values beat base values
//! - within a document, later sections beat earlier ones

use std::collections::BTreeMap;

use crate::document::{ConfigDocument, DocumentOrigin};
use crate::profile::{DEFAULT_PROFILE, ProfileSelection};
use crate::resolved::ResolvedConfig;
use crate::{Error, Result};

/// Merge `overlay` (if any) on top of `base` and validate the result.
///
/// # Example
///
/// ```
/// use kiln_config::{merge, ConfigDocument, DocumentOrigin, ProfileSelection};
///
/// let base = kiln_config::BaseDefaults::load().unwrap();
/// let overlay = ConfigDocument::parse(
///     "[profile.default]\nsrc = \"contracts\"\n",
///     DocumentOrigin::Packaged,
/// ).unwrap();
///
/// let config = merge(&base, Some(&overlay), &ProfileSelection::AllSections).unwrap();
/// assert_eq!(config.src(), "contracts");
/// assert_eq!(config.out(), "out");
/// ```
pub fn merge(
    base: &ConfigDocument,
    overlay: Option<&ConfigDocument>,
    selection: &ProfileSelection,
) -> Result<ResolvedConfig> {
    if let ProfileSelection::Named(name) = selection {
        let defined = std::iter::once(base)
            .chain(overlay)
            .any(|doc| doc.profile(name).is_some());
        if name != DEFAULT_PROFILE && !defined {
            return Err(Error::UnknownProfile { name: name.clone() });
        }
    }

    let mut flat = Flattened::default();
    flat.apply(base, selection);
    tracing::debug!(origin = %base.origin(), keys = flat.values.len(), "Base applied");

    if let Some(overlay) = overlay {
        flat.apply(overlay, selection);
        tracing::debug!(origin = %overlay.origin(), keys = flat.values.len(), "Overlay applied");
    }

    ResolvedConfig::from_flat(flat.values, flat.origins, base.origin())
}

/// Last-write-wins accumulator.
#[derive(Debug, Default)]
struct Flattened {
    values: toml::Table,
    origins: BTreeMap<String, DocumentOrigin>,
}

impl Flattened {
    fn apply(&mut self, document: &ConfigDocument, selection: &ProfileSelection) {
        for section in selection.sections(document) {
            for (key, value) in section.settings() {
                tracing::trace!(profile = section.name(), key = key.as_str(), "Set");
                self.values.insert(key.clone(), value.clone());
                self.origins.insert(key.clone(), document.origin().clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::BaseDefaults;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn overlay(content: &str) -> ConfigDocument {
        ConfigDocument::parse(
            content,
            DocumentOrigin::File(PathBuf::from("/proj/kiln.toml")),
        )
        .unwrap()
    }

    #[test]
    fn base_only_yields_defaults() {
        let base = BaseDefaults::load().unwrap();
        let config = merge(&base, None, &ProfileSelection::AllSections).unwrap();

        assert_eq!(config.src(), "src");
        assert_eq!(config.test(), "tests");
        assert_eq!(config.origin("src"), Some(&DocumentOrigin::Packaged));
    }

    #[test]
    fn overlay_in_any_section_beats_defaults() {
        let base = BaseDefaults::load().unwrap();
        let doc = overlay("[profile.anything]\nsrc = \"contracts\"\n");

        let config = merge(&base, Some(&doc), &ProfileSelection::AllSections).unwrap();

        assert_eq!(config.src(), "contracts");
        assert_eq!(
            config.origin("src"),
            Some(&DocumentOrigin::File(PathBuf::from("/proj/kiln.toml")))
        );
        assert_eq!(config.origin("out"), Some(&DocumentOrigin::Packaged));
    }

    #[test]
    fn later_section_wins_within_document() {
        let base = BaseDefaults::load().unwrap();
        let doc = overlay("[profile.first]\nsrc = \"a\"\n\n[profile.second]\nsrc = \"b\"\n");

        let config = merge(&base, Some(&doc), &ProfileSelection::AllSections).unwrap();
        assert_eq!(config.src(), "b");
    }

    #[test]
    fn named_profile_ignores_other_sections() {
        let base = BaseDefaults::load().unwrap();
        let doc = overlay(
            r#"
[profile.production]
out = "dist"

[profile.default]
out = "build"

[profile.ci]
out = "ci-out"
"#,
        );

        let production = merge(&base, Some(&doc), &ProfileSelection::named("production")).unwrap();
        assert_eq!(production.out(), "dist");

        let default = merge(&base, Some(&doc), &ProfileSelection::named("default")).unwrap();
        assert_eq!(default.out(), "build");

        let all = merge(&base, Some(&doc), &ProfileSelection::AllSections).unwrap();
        assert_eq!(all.out(), "ci-out");
    }

    #[test]
    fn unknown_named_profile_is_an_error() {
        let base = BaseDefaults::load().unwrap();
        let doc = overlay("[profile.default]\nsrc = \"x\"\n");

        let err = merge(&base, Some(&doc), &ProfileSelection::named("staging")).unwrap_err();
        assert!(matches!(err, Error::UnknownProfile { ref name } if name == "staging"));
    }

    #[test]
    fn extension_keys_pass_through() {
        let base = BaseDefaults::load().unwrap();
        let doc = overlay("[profile.default]\nevm_version = \"cancun\"\noptimize = true\n");

        let config = merge(&base, Some(&doc), &ProfileSelection::AllSections).unwrap();

        assert_eq!(config.get_str("evm_version"), Some("cancun"));
        assert_eq!(config.extra().get("optimize"), Some(&toml::Value::Boolean(true)));
    }
}
