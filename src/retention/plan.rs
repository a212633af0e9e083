//! Ordered, duplicate-free list of images to delete from one repository

use crate::image::{Digest, Image};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct DeletionPlan {
    images: Vec<Image>,
    seen: HashSet<Digest>,
}

impl DeletionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an image. Returns false if its digest is already planned.
    pub fn push(&mut self, image: Image) -> bool {
        if !self.seen.insert(image.digest.clone()) {
            return false;
        }
        self.images.push(image);
        true
    }

    pub fn extend(&mut self, images: impl IntoIterator<Item = Image>) {
        for image in images {
            self.push(image);
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn contains(&self, digest: &Digest) -> bool {
        self.seen.contains(digest)
    }

    pub fn digests(&self) -> Vec<Digest> {
        self.images.iter().map(|i| i.digest.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::test_support::image;

    #[test]
    fn test_push_keeps_order_and_rejects_duplicates() {
        let mut plan = DeletionPlan::new();
        assert!(plan.push(image(2, &[])));
        assert!(plan.push(image(1, &["a"])));
        assert!(!plan.push(image(2, &["other"])));

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.digests(), vec![image(2, &[]).digest, image(1, &[]).digest]);
        assert!(plan.contains(&image(1, &[]).digest));
        assert!(!plan.contains(&image(3, &[]).digest));
    }
}
