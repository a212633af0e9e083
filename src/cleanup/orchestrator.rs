//! Drives the cleanup one repository at a time

use crate::cleanup::deleter::{BatchDeleter, DeleteOutcome};
use crate::error::Result;
use crate::image::Image;
use crate::output::OutputManager;
use crate::registry::RegistryApi;
use crate::retention::{RetentionPolicy, RetentionStats};

#[derive(Debug, Clone)]
pub struct RepositoryReport {
    pub repository: String,
    pub stats: RetentionStats,
    pub outcome: DeleteOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub repositories: Vec<RepositoryReport>,
}

impl RunReport {
    pub fn planned(&self) -> usize {
        self.repositories
            .iter()
            .map(|r| r.stats.untagged + r.stats.expired)
            .sum()
    }

    pub fn deleted(&self) -> usize {
        self.repositories.iter().map(|r| r.outcome.deleted()).sum()
    }

    pub fn failures(&self) -> usize {
        self.repositories
            .iter()
            .map(|r| r.outcome.failures().len())
            .sum()
    }
}

pub struct Cleaner<'a, R: RegistryApi + ?Sized> {
    registry: &'a R,
    policy: RetentionPolicy,
    dry_run: bool,
    output: OutputManager,
}

impl<'a, R: RegistryApi + ?Sized> Cleaner<'a, R> {
    pub fn new(
        registry: &'a R,
        policy: RetentionPolicy,
        dry_run: bool,
        output: OutputManager,
    ) -> Self {
        Self {
            registry,
            policy,
            dry_run,
            output,
        }
    }

    /// Clean `target`, or every repository when it is `None` or empty.
    ///
    /// The first fetch or delete error ends the run.
    pub async fn run(&self, target: Option<&str>) -> Result<RunReport> {
        let repositories = match target.filter(|t| !t.is_empty()) {
            Some(repository) => vec![repository.to_string()],
            None => self.registry.list_repositories().await?,
        };

        self.output
            .info(&format!("Repositories to process: {:?}", repositories));

        let mut report = RunReport::default();
        for repository in &repositories {
            report
                .repositories
                .push(self.clean_repository(repository).await?);
        }
        Ok(report)
    }

    /// Follow continuation tokens until the registry has no more pages
    pub async fn fetch_images(&self, repository: &str) -> Result<Vec<Image>> {
        let mut images = Vec::new();
        let mut next_token: Option<String> = None;
        let mut pages = 0;

        loop {
            let page = self.registry.list_images(repository, next_token).await?;
            pages += 1;
            images.extend(page.images);

            next_token = page.next_token;
            if next_token.is_none() {
                break;
            }
        }

        self.output.detail(&format!(
            "fetched {} images from {} in {} page(s)",
            images.len(),
            repository,
            pages
        ));
        Ok(images)
    }

    pub async fn clean_repository(&self, repository: &str) -> Result<RepositoryReport> {
        self.output.section(&format!("Repository {}", repository));

        let images = self.fetch_images(repository).await?;
        self.output
            .info(&format!("Number of images in {}: {}", repository, images.len()));

        let (plan, stats) = self.policy.build_plan(images);
        self.output.detail(&format!(
            "untagged: {}, tagged: {}, candidates: {}, keeping: {}, expired: {}",
            stats.untagged, stats.tagged, stats.candidates, stats.retained, stats.expired
        ));

        let outcome = BatchDeleter::new(self.registry, &self.output)
            .execute(repository, &plan, self.dry_run)
            .await?;

        Ok(RepositoryReport {
            repository: repository.to_string(),
            stats,
            outcome,
        })
    }
}
