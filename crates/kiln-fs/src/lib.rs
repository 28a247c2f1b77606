//! Filesystem layer for kiln
//!
//! Locates the project root by walking up from a starting directory until a
//! directory containing the `kiln.toml` marker is found, and provides the
//! read helpers used to load project manifests.

pub mod constants;
pub mod error;
pub mod io;
pub mod locate;
pub mod root;

pub use constants::ProjectFile;
pub use error::{Error, Result};
pub use locate::{DEFAULT_MAX_DEPTH, RootLocator};
pub use root::ProjectRoot;
