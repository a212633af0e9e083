//! Retention policy: decides which images of a repository are deleted
//!
//! The pipeline for one repository is
//!
//! 1. [`partition_by_tag`] splits untagged from tagged images;
//! 2. [`TagFilter::split`] divides the tagged images by regex, and the
//!    [`PostFilterAction`] picks which side stays a deletion candidate;
//! 3. [`select_expired`] keeps the newest `keep` candidates;
//! 4. untagged images followed by the expired candidates form the [`DeletionPlan`].

pub mod plan;
pub mod selector;
pub mod tag_filter;

pub use plan::DeletionPlan;
pub use selector::{Selection, select_expired};
pub use tag_filter::{PostFilterAction, TagFilter, TagSplit};

use crate::image::{Image, partition_by_tag};

#[derive(Debug, Clone)]
pub struct RetentionPolicy {
    pub keep: usize,
    pub tag_filter: TagFilter,
    pub action: PostFilterAction,
}

/// Counts gathered while building a plan, for the per-repository summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionStats {
    pub total: usize,
    pub untagged: usize,
    pub tagged: usize,
    pub candidates: usize,
    pub expired: usize,
    pub retained: usize,
}

impl RetentionPolicy {
    pub fn new(keep: usize, tag_filter: TagFilter, action: PostFilterAction) -> Self {
        Self {
            keep,
            tag_filter,
            action,
        }
    }

    /// Build the deletion plan for one freshly fetched image list
    pub fn build_plan(&self, images: Vec<Image>) -> (DeletionPlan, RetentionStats) {
        let total = images.len();
        let (untagged, tagged) = partition_by_tag(images);
        let mut stats = RetentionStats {
            total,
            untagged: untagged.len(),
            tagged: tagged.len(),
            ..RetentionStats::default()
        };

        let candidates = self.tag_filter.split(tagged).into_candidates(self.action);
        stats.candidates = candidates.len();

        let selection = select_expired(candidates, self.keep);
        stats.expired = selection.expired.len();
        stats.retained = selection.retained.len();

        let mut plan = DeletionPlan::new();
        plan.extend(untagged);
        plan.extend(selection.expired);
        (plan, stats)
    }
}
