//! Amazon ECR implementation of [`RegistryApi`]

use crate::error::handlers::SdkErrorHandler;
use crate::error::{CleanupError, Result};
use crate::image::{Digest, Image};
use crate::registry::{DeleteFailure, ImagePage, MAX_DELETE_BATCH, RegistryApi};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ecr::Client;
use aws_sdk_ecr::types::{ImageDetail, ImageFailure, ImageIdentifier};
use chrono::{DateTime, Utc};

/// Region used when neither the command line nor the environment names one
pub const DEFAULT_REGION: &str = "eu-central-1";

pub struct EcrRegistry {
    client: Client,
    region: String,
}

impl EcrRegistry {
    /// Load AWS configuration from the default credential chain.
    ///
    /// The region is the explicit one if given, then whatever the SDK's
    /// default region chain resolves, then [`DEFAULT_REGION`].
    pub async fn connect(region: Option<String>) -> Self {
        let region_provider = RegionProviderChain::first_try(region.map(Region::new))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));

        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        let region = aws_config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Self {
            client: Client::new(&aws_config),
            region,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl RegistryApi for EcrRegistry {
    async fn list_repositories(&self) -> Result<Vec<String>> {
        let mut repositories = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self.client.describe_repositories();
            if let Some(token) = next_token {
                request = request.next_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| SdkErrorHandler::handle_fetch_error(&e, "getting ecr repos"))?;

            repositories.extend(
                response
                    .repositories()
                    .iter()
                    .filter_map(|repo| repo.repository_name())
                    .map(String::from),
            );

            next_token = response.next_token().map(String::from);
            if next_token.is_none() {
                break;
            }
        }

        Ok(repositories)
    }

    async fn list_images(
        &self,
        repository: &str,
        next_token: Option<String>,
    ) -> Result<ImagePage> {
        let response = self
            .client
            .describe_images()
            .repository_name(repository)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| {
                SdkErrorHandler::handle_fetch_error(
                    &e,
                    &format!("getting {} image details", repository),
                )
            })?;

        let images = response
            .image_details()
            .iter()
            .map(image_from_detail)
            .collect::<Result<Vec<_>>>()?;

        Ok(ImagePage {
            images,
            next_token: response.next_token().map(String::from),
        })
    }

    async fn delete_images(
        &self,
        repository: &str,
        digests: &[Digest],
    ) -> Result<Vec<DeleteFailure>> {
        if digests.len() > MAX_DELETE_BATCH {
            return Err(CleanupError::Delete {
                repository: repository.to_string(),
                deleted: 0,
                message: format!(
                    "batch of {} images exceeds the limit of {}",
                    digests.len(),
                    MAX_DELETE_BATCH
                ),
            });
        }

        let image_ids: Vec<ImageIdentifier> = digests
            .iter()
            .map(|digest| ImageIdentifier::builder().image_digest(digest.as_str()).build())
            .collect();

        let response = self
            .client
            .batch_delete_image()
            .repository_name(repository)
            .set_image_ids(Some(image_ids))
            .send()
            .await
            .map_err(|e| CleanupError::Delete {
                repository: repository.to_string(),
                deleted: 0,
                message: SdkErrorHandler::describe(&e),
            })?;

        Ok(response.failures().iter().map(failure_from_sdk).collect())
    }
}

fn image_from_detail(detail: &ImageDetail) -> Result<Image> {
    let digest = detail.image_digest().ok_or_else(|| {
        CleanupError::fetch(format!(
            "image without digest in repository {}",
            detail.repository_name().unwrap_or("<unknown>")
        ))
    })?;

    let pushed_at = detail
        .image_pushed_at()
        .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos()))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    Ok(Image::new(
        Digest::parse(digest)?,
        detail.image_tags().to_vec(),
        pushed_at,
    ))
}

fn failure_from_sdk(failure: &ImageFailure) -> DeleteFailure {
    let image = failure
        .image_id()
        .and_then(|id| id.image_digest().or(id.image_tag()))
        .unwrap_or("<unknown>");

    DeleteFailure {
        image: image.to_string(),
        code: failure
            .failure_code()
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| "Unknown".to_string()),
        reason: failure.failure_reason().unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ecr::primitives::DateTime as AwsDateTime;
    use aws_sdk_ecr::types::ImageFailureCode;

    const DIGEST: &str = "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_image_from_detail() {
        let detail = ImageDetail::builder()
            .repository_name("app")
            .image_digest(DIGEST)
            .image_tags("v1")
            .image_tags("latest")
            .image_pushed_at(AwsDateTime::from_secs(1_700_000_000))
            .build();

        let image = image_from_detail(&detail).unwrap();

        assert_eq!(image.digest.as_str(), DIGEST);
        assert_eq!(image.tags, vec!["v1".to_string(), "latest".to_string()]);
        assert_eq!(image.pushed_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_missing_push_time_sorts_first() {
        let detail = ImageDetail::builder().image_digest(DIGEST).build();
        let image = image_from_detail(&detail).unwrap();
        assert_eq!(image.pushed_at, DateTime::<Utc>::UNIX_EPOCH);
        assert!(!image.is_tagged());
    }

    #[test]
    fn test_missing_digest_is_fetch_error() {
        let detail = ImageDetail::builder().repository_name("app").build();
        let err = image_from_detail(&detail).unwrap_err();
        assert!(matches!(err, CleanupError::Fetch(msg) if msg.contains("app")));
    }

    #[test]
    fn test_failure_from_sdk() {
        let failure = ImageFailure::builder()
            .image_id(ImageIdentifier::builder().image_digest(DIGEST).build())
            .failure_code(ImageFailureCode::ImageNotFound)
            .failure_reason("Requested image not found")
            .build();

        let converted = failure_from_sdk(&failure);

        assert_eq!(converted.image, DIGEST);
        assert_eq!(converted.code, "ImageNotFound");
        assert_eq!(converted.reason, "Requested image not found");
    }
}
