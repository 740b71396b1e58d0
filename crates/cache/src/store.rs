use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

/// Minimal key-value store contract needed by the cache gateway.
///
/// `put` with a TTL must be a single atomic set-with-expiry operation
/// on the backend (Valkey `SETEX`); values expire lazily.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError>;
}
