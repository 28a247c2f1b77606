//! Shared test utilities for the kiln workspace.
//!
//! This crate provides temporary project fixtures so the crate test suites do
//! not each hand-roll directory setup. It is a dev-dependency only and is
//! never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`](project::TestProject) builder for on-disk
//!   project layouts

pub mod project;

pub use project::TestProject;
