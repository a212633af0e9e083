//! Wires configuration, the ECR client and the cleaner together

use crate::cleanup::{Cleaner, RunReport};
use crate::cli::args::Args;
use crate::cli::config::CleanupConfig;
use crate::error::Result;
use crate::output::OutputManager;
use crate::registry::{EcrRegistry, RegistryApi};
use crate::retention::RetentionPolicy;

pub struct Runner {
    args: Args,
    output: OutputManager,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        let output = if args.quiet {
            OutputManager::new_quiet()
        } else {
            OutputManager::new(args.verbose)
        };

        Self { args, output }
    }

    pub fn output(&self) -> &OutputManager {
        &self.output
    }

    pub async fn run(&mut self) -> Result<RunReport> {
        let (config, policy) = self.prepare()?;

        let registry = EcrRegistry::connect(config.aws_region.clone()).await;
        self.output
            .info(&format!("Using AWS region {}", registry.region()));

        self.execute(&registry, &config, policy).await
    }

    /// Resolve configuration and compile the policy. No registry calls happen here,
    /// so a bad regex or action fails the run before anything is touched.
    pub fn prepare(&mut self) -> Result<(CleanupConfig, RetentionPolicy)> {
        let config = CleanupConfig::resolve(&self.args)?;
        if config.verbose && !self.output.is_quiet() {
            self.output.verbose = true;
        }

        self.output.section("ECR Cleanup");
        let policy = config.retention_policy()?;

        self.output.verbose(&format!(
            "keep: {}, tag filter: {:?}, post-filter action: {}, dry run: {}",
            policy.keep,
            policy.tag_filter.pattern(),
            policy.action,
            config.dry_run
        ));

        Ok((config, policy))
    }

    pub async fn execute<R: RegistryApi + ?Sized>(
        &self,
        registry: &R,
        config: &CleanupConfig,
        policy: RetentionPolicy,
    ) -> Result<RunReport> {
        let cleaner = Cleaner::new(registry, policy, config.dry_run, self.output.clone());
        let report = cleaner.run(config.target_repository()).await?;

        let mut items = vec![
            ("Repositories", report.repositories.len().to_string()),
            ("Images planned for deletion", report.planned().to_string()),
        ];
        if config.dry_run {
            items.push(("Images deleted", "0 (dry run)".to_string()));
        } else {
            items.push(("Images deleted", report.deleted().to_string()));
            if report.failures() > 0 {
                items.push(("Images the registry refused", report.failures().to_string()));
            }
        }
        items.push(("Elapsed", self.output.elapsed_time()));
        self.output.summary("Cleanup summary", &items);

        Ok(report)
    }
}
