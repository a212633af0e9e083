//! Layered run configuration
//!
//! Sources are applied in order, later ones winning: built-in defaults, the
//! optional JSON file given with `--config`, `ECR_CLEANUP_*` environment
//! variables, then explicit command-line flags.

use crate::cli::args::Args;
use crate::error::{CleanupError, Result};
use crate::retention::{PostFilterAction, RetentionPolicy, TagFilter};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_KEEP: &str = "ECR_CLEANUP_KEEP";
pub const ENV_AWS_REGION: &str = "ECR_CLEANUP_AWS_REGION";
pub const ENV_REPO: &str = "ECR_CLEANUP_REPO";
pub const ENV_DRY_RUN: &str = "ECR_CLEANUP_DRY_RUN";
pub const ENV_TAG_REGEXP: &str = "ECR_CLEANUP_TAG_REGEXP";
pub const ENV_POST_FILTER_ACTION: &str = "ECR_CLEANUP_POST_FILTER_ACTION";
pub const ENV_VERBOSE: &str = "ECR_CLEANUP_VERBOSE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanupConfig {
    pub keep: usize,
    pub aws_region: Option<String>,
    pub repo: Option<String>,
    pub dry_run: bool,
    pub tag_regexp: String,
    pub post_filter_action: String,
    pub verbose: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            keep: 100,
            aws_region: None,
            repo: None,
            dry_run: false,
            tag_regexp: String::new(),
            post_filter_action: PostFilterAction::Delete.to_string(),
            verbose: false,
        }
    }
}

impl CleanupConfig {
    /// Merge every source for this invocation
    pub fn resolve(args: &Args) -> Result<Self> {
        let base = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.apply_env()?.apply_args(args))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CleanupError::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            CleanupError::config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Override fields from `lookup`, which maps a variable name to its value
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_KEEP) {
            self.keep = val.trim().parse().map_err(|_| {
                CleanupError::config(format!(
                    "{} must be a non-negative integer, got {:?}",
                    ENV_KEEP, val
                ))
            })?;
        }
        if let Some(val) = lookup(ENV_AWS_REGION) {
            self.aws_region = Some(val);
        }
        if let Some(val) = lookup(ENV_REPO) {
            self.repo = Some(val);
        }
        if let Some(val) = lookup(ENV_DRY_RUN) {
            self.dry_run = is_truthy(&val);
        }
        if let Some(val) = lookup(ENV_TAG_REGEXP) {
            self.tag_regexp = val;
        }
        if let Some(val) = lookup(ENV_POST_FILTER_ACTION) {
            self.post_filter_action = val;
        }
        if let Some(val) = lookup(ENV_VERBOSE) {
            self.verbose = is_truthy(&val);
        }

        Ok(self)
    }

    /// Explicit flags win; boolean flags can only switch a mode on
    pub fn apply_args(mut self, args: &Args) -> Self {
        if let Some(keep) = args.keep {
            self.keep = keep;
        }
        if let Some(region) = &args.aws_region {
            self.aws_region = Some(region.clone());
        }
        if let Some(repo) = &args.repo {
            self.repo = Some(repo.clone());
        }
        if let Some(pattern) = &args.tag_regexp {
            self.tag_regexp = pattern.clone();
        }
        if let Some(action) = &args.post_filter_action {
            self.post_filter_action = action.clone();
        }
        self.dry_run |= args.dry_run;
        self.verbose |= args.verbose;

        self
    }

    /// `None` means every repository in the registry
    pub fn target_repository(&self) -> Option<&str> {
        self.repo.as_deref().filter(|r| !r.is_empty())
    }

    /// Compile the tag filter and parse the action. Must succeed before the
    /// registry is contacted.
    pub fn retention_policy(&self) -> Result<RetentionPolicy> {
        let tag_filter = TagFilter::new(&self.tag_regexp)?;
        let action: PostFilterAction = self.post_filter_action.parse()?;
        Ok(RetentionPolicy::new(self.keep, tag_filter, action))
    }
}

fn is_truthy(val: &str) -> bool {
    val.eq_ignore_ascii_case("true") || val == "1"
}
