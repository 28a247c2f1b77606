//! Project `.env` files
//!
//! Variables defined in the project's env file take part in `$VAR` expansion
//! of the manifest. They are read into a map and never exported into the
//! process environment, so a variable that is already set in the process
//! keeps its value.

use std::collections::HashMap;
use std::path::Path;

use crate::{Error, Result};

/// Env file name looked up at the project root unless configured otherwise.
pub const DOT_ENV_FILE: &str = ".env";

/// Read the `KEY=value` pairs of an env file.
///
/// A file that does not exist yields an empty map.
pub fn read_vars(path: &Path) -> Result<HashMap<String, String>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            tracing::trace!(?path, "No env file");
            return Ok(HashMap::new());
        }
        Err(source) => {
            return Err(Error::DotEnv {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let vars = iter
        .collect::<std::result::Result<HashMap<_, _>, _>>()
        .map_err(|source| Error::DotEnv {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(?path, count = vars.len(), "Loaded env file");
    Ok(vars)
}
