//! The flattened, read-only configuration handed to downstream tooling

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::document::DocumentOrigin;
use crate::{Error, Result};

/// Keys every resolved configuration defines.
pub const RECOGNIZED_KEYS: [&str; 6] = ["src", "test", "script", "out", "libs", "remappings"];

/// The final merged state: one value per recognized key plus any extension
/// keys found in the source documents.
///
/// Serializes flat, recognized keys first, then extension keys in the order
/// they were first written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    /// Primary source files, read by the compiler wrapper
    src: String,

    /// Test files, read by the test runner
    test: String,

    /// Deployment and automation scripts
    script: String,

    /// Build artifacts
    out: String,

    /// External dependency code
    libs: Vec<String>,

    /// Import-path substitutions, in order
    remappings: Vec<String>,

    /// Keys outside the recognized set, carried through unvalidated
    #[serde(flatten)]
    extra: toml::Table,

    /// Which document supplied each key's final value
    #[serde(skip)]
    origins: BTreeMap<String, DocumentOrigin>,
}

impl ResolvedConfig {
    /// Build the typed record from a flattened key/value table.
    ///
    /// Recognized keys are checked for shape here; everything else lands in
    /// the extension table. A recognized key with no value at all is blamed
    /// on `base`, the document that must define every one of them.
    pub(crate) fn from_flat(
        mut values: toml::Table,
        origins: BTreeMap<String, DocumentOrigin>,
        base: &DocumentOrigin,
    ) -> Result<Self> {
        let mut take = |key: &str, shape: Shape| -> Result<toml::Value> {
            let value = values.remove(key).ok_or_else(|| Error::MalformedBaseDefaults {
                origin: base.clone(),
                message: format!("no value for `{key}`"),
            })?;
            if shape.accepts(&value) {
                Ok(value)
            } else {
                Err(Error::InvalidValue {
                    key: key.to_string(),
                    expected: shape.expected(),
                    origin: origins.get(key).cloned().unwrap_or_else(|| base.clone()),
                })
            }
        };

        let src = into_string(take("src", Shape::Str)?);
        let test = into_string(take("test", Shape::Str)?);
        let script = into_string(take("script", Shape::Str)?);
        let out = into_string(take("out", Shape::Str)?);
        let libs = into_list(take("libs", Shape::StrOrList)?);
        let remappings = into_list(take("remappings", Shape::List)?);

        Ok(Self {
            src,
            test,
            script,
            out,
            libs,
            remappings,
            extra: values,
            origins,
        })
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn test(&self) -> &str {
        &self.test
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn out(&self) -> &str {
        &self.out
    }

    pub fn libs(&self) -> &[String] {
        &self.libs
    }

    pub fn remappings(&self) -> &[String] {
        &self.remappings
    }

    /// Extension keys that are not part of the recognized set.
    pub fn extra(&self) -> &toml::Table {
        &self.extra
    }

    /// Look any key up, recognized or not.
    pub fn get(&self, key: &str) -> Option<toml::Value> {
        let list = |items: &[String]| {
            toml::Value::Array(items.iter().cloned().map(toml::Value::String).collect())
        };
        match key {
            "src" => Some(toml::Value::String(self.src.clone())),
            "test" => Some(toml::Value::String(self.test.clone())),
            "script" => Some(toml::Value::String(self.script.clone())),
            "out" => Some(toml::Value::String(self.out.clone())),
            "libs" => Some(list(&self.libs)),
            "remappings" => Some(list(&self.remappings)),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Look an extension key up as a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(toml::Value::as_str)
    }

    /// The document that supplied the final value of `key`.
    pub fn origin(&self, key: &str) -> Option<&DocumentOrigin> {
        self.origins.get(key)
    }

    /// All keys, recognized first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        RECOGNIZED_KEYS
            .iter()
            .copied()
            .chain(self.extra.keys().map(String::as_str))
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ResolvedConfig(src={}, test={}, script={}, out={}, libs=[{}], remappings=[{}])",
            self.src,
            self.test,
            self.script,
            self.out,
            self.libs.join(", "),
            self.remappings.join(", ")
        )
    }
}

#[derive(Clone, Copy)]
enum Shape {
    Str,
    List,
    StrOrList,
}

impl Shape {
    fn accepts(self, value: &toml::Value) -> bool {
        let is_list = || {
            value
                .as_array()
                .is_some_and(|items| items.iter().all(toml::Value::is_str))
        };
        match self {
            Self::Str => value.is_str(),
            Self::List => is_list(),
            Self::StrOrList => value.is_str() || is_list(),
        }
    }

    fn expected(self) -> &'static str {
        match self {
            Self::Str => "a string",
            Self::List => "a list of strings",
            Self::StrOrList => "a string or a list of strings",
        }
    }
}

fn into_string(value: toml::Value) -> String {
    match value {
        toml::Value::String(s) => s,
        other => other.to_string(),
    }
}

fn into_list(value: toml::Value) -> Vec<String> {
    match value {
        toml::Value::String(s) => vec![s],
        toml::Value::Array(items) => items.into_iter().map(into_string).collect(),
        other => vec![other.to_string()],
    }
}
