//! Registry module for container registry interactions
//!
//! The cleanup logic only needs three calls from a registry: list
//! repositories, list image metadata page by page, and delete images in
//! batches. [`RegistryApi`] captures exactly that so the ECR client can be
//! swapped for an in-memory registry in tests.

pub mod ecr;

pub use ecr::EcrRegistry;

use crate::error::Result;
use crate::image::{Digest, Image};
use async_trait::async_trait;
use std::fmt;

/// Upper bound on digests accepted by one delete call
pub const MAX_DELETE_BATCH: usize = 100;

/// One page of image metadata
#[derive(Debug, Clone, Default)]
pub struct ImagePage {
    pub images: Vec<Image>,
    /// Present when more pages follow
    pub next_token: Option<String>,
}

/// An image the registry refused to delete even though the batch call succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    pub image: String,
    pub code: String,
    pub reason: String,
}

impl fmt::Display for DeleteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.image, self.code, self.reason)
    }
}

#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Names of every repository in the registry
    async fn list_repositories(&self) -> Result<Vec<String>>;

    /// One page of images; call again with the returned token until it is `None`
    async fn list_images(&self, repository: &str, next_token: Option<String>)
    -> Result<ImagePage>;

    /// Delete at most [`MAX_DELETE_BATCH`] images by digest.
    ///
    /// `Err` means the whole call failed. Per-image rejections come back in `Ok`.
    async fn delete_images(
        &self,
        repository: &str,
        digests: &[Digest],
    ) -> Result<Vec<DeleteFailure>>;
}
