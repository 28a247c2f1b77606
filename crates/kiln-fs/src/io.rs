//! Manifest read operations

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::{Error, Result};

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Read text content from a file that is allowed to be absent.
///
/// Returns `Ok(None)` only when the file does not exist. Every other failure
/// (permissions, invalid UTF-8, a directory in place of the file) is an error.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::trace!(?path, "file absent");
            Ok(None)
        }
        Err(e) => Err(Error::io(path, e)),
    }
}
