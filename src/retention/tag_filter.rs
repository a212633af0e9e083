//! Regex filtering over image tag lists

use crate::error::{CleanupError, Result};
use crate::image::Image;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens to images whose tags match the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostFilterAction {
    /// Matching images are the retention candidates; everything else is kept
    #[default]
    Delete,
    /// Matching images are exempt; the rest are the retention candidates
    Save,
}

impl FromStr for PostFilterAction {
    type Err = CleanupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delete" => Ok(PostFilterAction::Delete),
            "save" => Ok(PostFilterAction::Save),
            other => Err(CleanupError::config(format!(
                "Incorrect value {} . only delete and save are supported",
                other
            ))),
        }
    }
}

impl fmt::Display for PostFilterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostFilterAction::Delete => f.write_str("delete"),
            PostFilterAction::Save => f.write_str("save"),
        }
    }
}

/// Compiled tag filter. An empty pattern disables filtering entirely.
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    regex: Option<Regex>,
}

/// Result of [`TagFilter::split`], both sides in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSplit {
    pub matched: Vec<Image>,
    pub unmatched: Vec<Image>,
}

impl TagSplit {
    /// Pick the side that goes on to retention selection
    pub fn into_candidates(self, action: PostFilterAction) -> Vec<Image> {
        match action {
            PostFilterAction::Delete => self.matched,
            PostFilterAction::Save => self.unmatched,
        }
    }
}

impl TagFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Ok(Self::disabled());
        }
        Ok(Self {
            regex: Some(Regex::new(pattern)?),
        })
    }

    pub fn disabled() -> Self {
        Self { regex: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.regex.is_some()
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_ref().map(Regex::as_str).unwrap_or_default()
    }

    /// True if any tag matches. A disabled filter matches everything.
    pub fn matches(&self, image: &Image) -> bool {
        match &self.regex {
            Some(regex) => image.tags.iter().any(|tag| regex.is_match(tag)),
            None => true,
        }
    }

    /// Classify every image exactly once into matched or unmatched
    pub fn split(&self, images: Vec<Image>) -> TagSplit {
        if !self.is_enabled() {
            return TagSplit {
                matched: images,
                unmatched: Vec::new(),
            };
        }

        let mut split = TagSplit::default();
        for image in images {
            if self.matches(&image) {
                split.matched.push(image);
            } else {
                split.unmatched.push(image);
            }
        }
        split
    }
}
