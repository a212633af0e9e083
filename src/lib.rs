//! ECR Cleanup Library
//!
//! Retention cleanup for container image repositories: untagged images are
//! always removed, tagged images are optionally narrowed by a tag regex and
//! pruned down to the newest `keep` per repository.

pub mod cleanup;
pub mod cli;
pub mod error;
pub mod image;
pub mod output;
pub mod registry;
pub mod retention;

pub use error::{CleanupError, Result};
pub use output::OutputManager;
