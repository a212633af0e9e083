//! Per-repository cleanup: fetch, plan, delete

pub mod deleter;
pub mod orchestrator;

pub use deleter::{BatchDeleter, DeleteOutcome, batch_bounds};
pub use orchestrator::{Cleaner, RepositoryReport, RunReport};
