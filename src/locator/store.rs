//! S3 object-store reference download.

use super::{mime, ResolvedImage};
use crate::{Error, Result};
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use std::path::Path;
use tokio::sync::OnceCell;

/// Fetches `s3://bucket/key` references using ambient AWS credentials.
///
/// The SDK client is built on first use and reused for the rest of the
/// process; most invocations never touch the object store at all.
pub struct StoreClient {
    client: OnceCell<S3Client>,
}

impl StoreClient {
    pub fn new() -> Self {
        Self {
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &S3Client {
        self.client
            .get_or_init(|| async {
                let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
                S3Client::new(&config)
            })
            .await
    }

    /// Split the post-prefix remainder into bucket and key on the first `/`.
    /// Both halves must be non-empty; the key itself may nest arbitrarily.
    pub fn split_reference(rest: &str) -> Result<(&str, &str)> {
        let invalid = || {
            Error::InvalidReference(format!(
                "s3://{}: expected s3://bucket/key",
                rest
            ))
        };

        let (bucket, key) = rest.split_once('/').ok_or_else(invalid)?;
        if bucket.is_empty() || key.is_empty() {
            return Err(invalid());
        }
        Ok((bucket, key))
    }

    pub async fn fetch(&self, rest: &str, staging: &Path) -> Result<ResolvedImage> {
        let (bucket, key) = Self::split_reference(rest)?;

        tracing::debug!("Fetching s3://{}/{}", bucket, key);
        let response = self
            .client()
            .await
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Error::Download(format!("s3://{}: {}", rest, e)))?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| Error::Download(format!("s3://{}: {}", rest, e)))?;

        let filename = key.rsplit('/').find(|s| !s.is_empty()).unwrap_or("object");
        let path = staging.join(filename);
        std::fs::write(&path, bytes.to_vec())?;
        tracing::info!("Downloaded s3://{}/{} to {}", bucket, key, path.display());

        Ok(ResolvedImage {
            mime_type: mime::for_path(&path),
            path,
        })
    }
}

impl Default for StoreClient {
    fn default() -> Self {
        Self::new()
    }
}
