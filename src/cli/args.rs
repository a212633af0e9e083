//! Command-line argument parsing
//!
//! Value flags are optional here so the config layer can tell an explicit flag
//! apart from a default; defaults live in [`CleanupConfig`](super::CleanupConfig).

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "ecr-cleanup")]
#[command(about = "Delete untagged images and all but the newest tagged images from ECR repositories")]
#[command(version)]
pub struct Args {
    /// Tagged images to keep per repository
    #[arg(
        long = "keep",
        value_name = "N",
        help = "amount of images / repo you want to keep [default: 100]"
    )]
    pub keep: Option<usize>,

    #[arg(
        long = "aws-region",
        alias = "aws.region",
        value_name = "REGION",
        help = "AWS region [default: SDK region chain, then eu-central-1]"
    )]
    pub aws_region: Option<String>,

    #[arg(
        long = "repo",
        value_name = "NAME",
        help = "repository you want to process, empty if you want all"
    )]
    pub repo: Option<String>,

    #[arg(long = "dry-run", help = "run the code without actual deleting")]
    pub dry_run: bool,

    #[arg(
        long = "tag-regexp",
        value_name = "REGEX",
        help = "regexp for filtering images by tag, empty disables filtering"
    )]
    pub tag_regexp: Option<String>,

    #[arg(
        long = "post-filter-action",
        value_name = "ACTION",
        help = "images with regexp tags can be deleted or saved: delete | save [default: delete]"
    )]
    pub post_filter_action: Option<String>,

    #[arg(long = "config", value_name = "FILE", help = "Path to a JSON configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long = "verbose", short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long = "quiet",
        short = 'q',
        conflicts_with = "verbose",
        help = "Only print warnings and errors"
    )]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
