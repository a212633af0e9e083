//! Registry image snapshots
//!
//! An [`Image`] is a read-only copy of what the registry reported for one
//! digest during the current run. [`partition_by_tag`] is the first step of the
//! retention pipeline: untagged images are always deleted, tagged images go on
//! to tag filtering and retention selection.

pub mod digest;

pub use digest::Digest;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub digest: Digest,
    pub tags: Vec<String>,
    pub pushed_at: DateTime<Utc>,
}

impl Image {
    pub fn new(digest: Digest, tags: Vec<String>, pushed_at: DateTime<Utc>) -> Self {
        Self {
            digest,
            tags,
            pushed_at,
        }
    }

    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }

    /// One-line description used in dry-run reports
    pub fn describe(&self) -> String {
        let tags = if self.tags.is_empty() {
            "<untagged>".to_string()
        } else {
            self.tags.join(",")
        };
        format!(
            "{} [{}] pushed {}",
            self.digest,
            tags,
            self.pushed_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// Split images into `(untagged, tagged)`, keeping input order in both
pub fn partition_by_tag(images: Vec<Image>) -> (Vec<Image>, Vec<Image>) {
    let (tagged, untagged): (Vec<Image>, Vec<Image>) =
        images.into_iter().partition(Image::is_tagged);
    (untagged, tagged)
}


#[cfg(test)]
mod tests {
    use super::test_support::image;
    use super::*;

    #[test]
    fn test_partition_preserves_order() {
        let images = vec![
            image(1, &["v1"]),
            image(2, &[]),
            image(3, &["v3", "latest"]),
            image(4, &[]),
        ];

        let (untagged, tagged) = partition_by_tag(images);

        let untagged: Vec<_> = untagged.iter().map(|i| i.digest.clone()).collect();
        let tagged: Vec<_> = tagged.iter().map(|i| i.digest.clone()).collect();
        assert_eq!(untagged, vec![image(2, &[]).digest, image(4, &[]).digest]);
        assert_eq!(tagged, vec![image(1, &[]).digest, image(3, &[]).digest]);
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        let images: Vec<Image> = (0..20)
            .map(|n| if n % 3 == 0 { image(n, &[]) } else { image(n, &["t"]) })
            .collect();

        let (untagged, tagged) = partition_by_tag(images.clone());

        assert_eq!(untagged.len() + tagged.len(), images.len());
        assert!(untagged.iter().all(|i| !i.is_tagged()));
        assert!(tagged.iter().all(Image::is_tagged));
        for img in &images {
            let hits = untagged.iter().chain(tagged.iter()).filter(|i| i.digest == img.digest).count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn test_partition_empty() {
        let (untagged, tagged) = partition_by_tag(Vec::new());
        assert!(untagged.is_empty());
        assert!(tagged.is_empty());
    }

    #[test]
    fn test_describe_untagged() {
        let text = image(7, &[]).describe();
        assert!(text.contains("<untagged>"));
        assert!(text.contains("2024-01-01 00:07:00 UTC"));
    }
}
