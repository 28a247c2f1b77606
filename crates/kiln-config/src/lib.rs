//! Layered project configuration for kiln
//!
//! This crate turns a project directory into a [`Project`]: the directory
//! itself plus a [`ResolvedConfig`] built from two documents:
//!
//! - **Base defaults**: packaged with the tool, defining every recognized key
//! - **Manifest**: the project's optional `kiln.toml`, overriding the defaults
//!
//! # Architecture
//!
//! ```text
//!                     Project
//!                        |
//!                 ConfigResolver
//!                        |
//!        +---------------+---------------+
//!        |               |               |
//!   BaseDefaults   ConfigDocument      merge
//!                        |
//!                  kiln-fs (RootLocator, ProjectRoot, io)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use kiln_config::{Project, Result};
//!
//! fn example() -> Result<()> {
//!     let project = Project::discover(".")?;
//!     println!("{project}: sources in {}", project.src_dir().display());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod document;
pub mod dotenv;
pub mod error;
pub mod expand;
pub mod logging;
pub mod merge;
pub mod profile;
pub mod project;
pub mod resolved;
pub mod resolver;

pub use defaults::BaseDefaults;
pub use document::{ConfigDocument, DocumentOrigin, ProfileSection};
pub use dotenv::DOT_ENV_FILE;
pub use error::{Error, Result};
pub use merge::merge;
pub use profile::{DEFAULT_PROFILE, PROFILE_ENV_VARS, ProfileSelection};
pub use project::Project;
pub use resolved::{RECOGNIZED_KEYS, ResolvedConfig};
pub use resolver::{ConfigResolver, DefaultsSource, MissingManifest, ProjectOptions};
