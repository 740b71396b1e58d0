use async_trait::async_trait;

use crate::error::ArchiveError;

/// Durable blob storage contract for snapshots.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Create the backing bucket if it does not exist. Idempotent;
    /// called once at startup.
    async fn ensure_bucket(&self) -> Result<(), ArchiveError>;

    /// Durably store one object. An existing object under the same
    /// key is overwritten.
    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), ArchiveError>;
}
