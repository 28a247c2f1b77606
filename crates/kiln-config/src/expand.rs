//! Environment variable expansion for manifest values
//!
//! `$NAME` and `${NAME}` inside string values are replaced with the value of
//! the variable. References to unset variables are left as written.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static VAR_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("Invalid variable reference regex")
});

/// Look a variable up in the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Expand variable references in `input` using `lookup`.
pub fn expand_str<'a>(input: &'a str, lookup: &dyn Fn(&str) -> Option<String>) -> Cow<'a, str> {
    VAR_REFERENCE.replace_all(input, |caps: &Captures<'_>| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        lookup(name).unwrap_or_else(|| caps[0].to_string())
    })
}

/// Expand every string inside `value`, descending into arrays and tables.
pub fn expand_value(value: &mut toml::Value, lookup: &dyn Fn(&str) -> Option<String>) {
    match value {
        toml::Value::String(s) => {
            let expanded = match expand_str(s, lookup) {
                Cow::Owned(expanded) => Some(expanded),
                Cow::Borrowed(_) => None,
            };
            if let Some(expanded) = expanded {
                *s = expanded;
            }
        }
        toml::Value::Array(items) => {
            for item in items {
                expand_value(item, lookup);
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                expand_value(item, lookup);
            }
        }
        _ => {}
    }
}
