//! Chunked, sequential deletion of a [`DeletionPlan`]

use crate::error::{CleanupError, Result};
use crate::output::OutputManager;
use crate::registry::{DeleteFailure, MAX_DELETE_BATCH, RegistryApi};
use crate::retention::DeletionPlan;
use std::ops::Range;

/// What the deleter did for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Plan was reported, nothing was deleted
    DryRun { planned: usize },
    /// Empty plan, the registry was not called
    NothingToDo,
    Deleted {
        deleted: usize,
        batches: usize,
        failures: Vec<DeleteFailure>,
    },
}

impl DeleteOutcome {
    pub fn deleted(&self) -> usize {
        match self {
            DeleteOutcome::Deleted { deleted, .. } => *deleted,
            _ => 0,
        }
    }

    pub fn failures(&self) -> &[DeleteFailure] {
        match self {
            DeleteOutcome::Deleted { failures, .. } => failures,
            _ => &[],
        }
    }
}

/// Consecutive `[start, end)` ranges of at most `batch_size` covering `0..len`
pub fn batch_bounds(len: usize, batch_size: usize) -> Vec<Range<usize>> {
    assert!(batch_size > 0, "batch size must be positive");

    let batches = len.div_ceil(batch_size);
    (0..batches)
        .map(|i| {
            let start = i * batch_size;
            start..(start + batch_size).min(len)
        })
        .collect()
}

pub struct BatchDeleter<'a, R: RegistryApi + ?Sized> {
    registry: &'a R,
    output: &'a OutputManager,
}

impl<'a, R: RegistryApi + ?Sized> BatchDeleter<'a, R> {
    pub fn new(registry: &'a R, output: &'a OutputManager) -> Self {
        Self { registry, output }
    }

    /// Delete the plan in batches of [`MAX_DELETE_BATCH`].
    ///
    /// Stops at the first failed batch. Earlier batches are not rolled back;
    /// the returned [`CleanupError::Delete`] says how many images are already gone.
    pub async fn execute(
        &self,
        repository: &str,
        plan: &DeletionPlan,
        dry_run: bool,
    ) -> Result<DeleteOutcome> {
        self.output
            .info(&format!("number of images to delete: {}", plan.len()));

        if dry_run {
            self.output.info("dry run ...");
            let items: Vec<String> = plan.images().iter().map(|i| i.describe()).collect();
            self.output
                .list(&format!("images to delete in {}", repository), &items);
            return Ok(DeleteOutcome::DryRun {
                planned: plan.len(),
            });
        }

        if plan.is_empty() {
            self.output
                .info(&format!("nothing to do so skip {}", repository));
            return Ok(DeleteOutcome::NothingToDo);
        }

        let digests = plan.digests();
        let bounds = batch_bounds(digests.len(), MAX_DELETE_BATCH);
        let mut deleted = 0;
        let mut failures = Vec::new();

        for (index, range) in bounds.iter().enumerate() {
            let batch = &digests[range.clone()];
            self.output.step(&format!(
                "Deleting batch {}/{} ({} images) from {}",
                index + 1,
                bounds.len(),
                batch.len(),
                repository
            ));

            let batch_failures = self
                .registry
                .delete_images(repository, batch)
                .await
                .map_err(|err| CleanupError::Delete {
                    repository: repository.to_string(),
                    deleted,
                    message: match err {
                        CleanupError::Delete { message, .. } => message,
                        other => other.to_string(),
                    },
                })?;

            for failure in &batch_failures {
                self.output.warning(&format!(
                    "could not delete {} in repo {}: {} {}",
                    failure.image, repository, failure.code, failure.reason
                ));
            }

            deleted += batch.len().saturating_sub(batch_failures.len());
            failures.extend(batch_failures);
        }

        self.output
            .success(&format!("deleted {} images in repo {}", deleted, repository));

        Ok(DeleteOutcome::Deleted {
            deleted,
            batches: bounds.len(),
            failures,
        })
    }
}
