//! Command line interface module
//!
//! Argument parsing, layered configuration and the runner that drives a
//! cleanup run against ECR.

pub mod args;
pub mod config;
pub mod runner;

pub use args::Args;
pub use config::CleanupConfig;
pub use runner::Runner;
