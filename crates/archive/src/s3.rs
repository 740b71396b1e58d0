//! S3-compatible adapter for the [`BlobStore`] contract.
//!
//! Works against AWS S3 and MinIO. Credentials, region, and an
//! optional endpoint override come from the standard AWS environment
//! variables (`AWS_ENDPOINT_URL` for MinIO deployments).

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::ArchiveError;
use crate::store::BlobStore;

/// Blob store backed by an S3 bucket.
#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3BlobStore {
    /// Build a store from the ambient AWS environment configuration.
    ///
    /// Path-style addressing is forced so bucket names resolve against
    /// MinIO endpoints without virtual-host DNS.
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: bucket.into(),
        }
    }

    /// Store with an explicit client, for wiring in tests or tooling.
    pub fn with_client(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn ensure_bucket(&self) -> Result<(), ArchiveError> {
        match self.client.create_bucket().bucket(&self.bucket).send().await {
            Ok(_) => {
                tracing::info!(bucket = %self.bucket, "Created archive bucket");
                Ok(())
            }
            Err(e) => {
                // Re-running against an existing bucket is the normal
                // restart case, not a failure.
                let already_there = e.as_service_error().is_some_and(|se| {
                    se.is_bucket_already_owned_by_you() || se.is_bucket_already_exists()
                });
                if already_there {
                    Ok(())
                } else {
                    Err(ArchiveError::Storage(e.to_string()))
                }
            }
        }
    }

    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), ArchiveError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/json")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| ArchiveError::Storage(e.to_string()))?;

        Ok(())
    }
}
