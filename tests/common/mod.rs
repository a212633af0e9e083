//! In-memory registry used by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use ecr_cleanup::error::{CleanupError, Result};
use ecr_cleanup::image::{Digest, Image};
use ecr_cleanup::registry::{DeleteFailure, ImagePage, MAX_DELETE_BATCH, RegistryApi};
use std::collections::HashMap;
use std::sync::Mutex;

/// Image `n`: digest derived from `n`, pushed `n` minutes after 2024-01-01
pub fn image(n: u32, tags: &[&str]) -> Image {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Image::new(
        Digest::parse(&format!("sha256:{:064x}", n)).unwrap(),
        tags.iter().map(|t| t.to_string()).collect(),
        base + chrono::Duration::minutes(n as i64),
    )
}

pub fn untagged(range: std::ops::Range<u32>) -> Vec<Image> {
    range.map(|n| image(n, &[])).collect()
}

pub fn tagged(range: std::ops::Range<u32>, prefix: &str) -> Vec<Image> {
    range
        .map(|n| image(n, &[format!("{}{}", prefix, n).as_str()]))
        .collect()
}

#[derive(Default)]
pub struct MockRegistry {
    repositories: Vec<String>,
    pages: HashMap<String, Vec<Vec<Image>>>,
    failing_listing: bool,
    failing_images: Option<String>,
    failing_delete_call: Option<usize>,
    pub list_repository_calls: Mutex<usize>,
    pub list_image_calls: Mutex<Vec<(String, Option<String>)>>,
    pub delete_calls: Mutex<Vec<(String, Vec<Digest>)>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `images` for `name` in pages of `page_size`
    pub fn with_repository(mut self, name: &str, images: Vec<Image>, page_size: usize) -> Self {
        let pages = if images.is_empty() {
            vec![Vec::new()]
        } else {
            images.chunks(page_size).map(<[Image]>::to_vec).collect()
        };
        self.repositories.push(name.to_string());
        self.pages.insert(name.to_string(), pages);
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.failing_listing = true;
        self
    }

    pub fn failing_images(mut self, repository: &str) -> Self {
        self.failing_images = Some(repository.to_string());
        self
    }

    /// Fail the delete call with this zero-based index
    pub fn failing_delete_call(mut self, index: usize) -> Self {
        self.failing_delete_call = Some(index);
        self
    }

    pub fn delete_batch_sizes(&self) -> Vec<usize> {
        self.delete_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, digests)| digests.len())
            .collect()
    }

    pub fn deleted_from(&self, repository: &str) -> Vec<Digest> {
        self.delete_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(repo, _)| repo == repository)
            .flat_map(|(_, digests)| digests.iter().cloned())
            .collect()
    }
}

#[async_trait]
impl RegistryApi for MockRegistry {
    async fn list_repositories(&self) -> Result<Vec<String>> {
        *self.list_repository_calls.lock().unwrap() += 1;
        if self.failing_listing {
            return Err(CleanupError::Fetch(
                "getting ecr repos: AccessDeniedException".to_string(),
            ));
        }
        Ok(self.repositories.clone())
    }

    async fn list_images(&self, repository: &str, next_token: Option<String>) -> Result<ImagePage> {
        self.list_image_calls
            .lock()
            .unwrap()
            .push((repository.to_string(), next_token.clone()));

        if self.failing_images.as_deref() == Some(repository) {
            return Err(CleanupError::Fetch(format!(
                "getting {} image details: ThrottlingException",
                repository
            )));
        }

        let pages = self.pages.get(repository).ok_or_else(|| {
            CleanupError::Fetch(format!(
                "getting {} image details: RepositoryNotFoundException",
                repository
            ))
        })?;

        let index = match next_token {
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| CleanupError::Fetch(format!("bad token {}", token)))?,
            None => 0,
        };

        Ok(ImagePage {
            images: pages[index].clone(),
            next_token: (index + 1 < pages.len()).then(|| format!("page-{}", index + 1)),
        })
    }

    async fn delete_images(&self, repository: &str, digests: &[Digest]) -> Result<Vec<DeleteFailure>> {
        assert!(digests.len() <= MAX_DELETE_BATCH, "batch too large: {}", digests.len());

        let mut calls = self.delete_calls.lock().unwrap();
        if self.failing_delete_call == Some(calls.len()) {
            return Err(CleanupError::Delete {
                repository: repository.to_string(),
                deleted: 0,
                message: "ServerException".to_string(),
            });
        }
        calls.push((repository.to_string(), digests.to_vec()));
        Ok(Vec::new())
    }
}
