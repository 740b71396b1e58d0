//! In-memory [`BlobStore`] used by tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::ArchiveError;
use crate::store::BlobStore;

/// Process-local blob store. Objects are kept in insertion-key order
/// so tests can assert on listings deterministically.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    objects: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored object keys.
    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }

    /// Body of one stored object, if present.
    pub async fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(key).cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn ensure_bucket(&self) -> Result<(), ArchiveError> {
        Ok(())
    }

    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), ArchiveError> {
        self.objects.write().await.insert(key.to_string(), body);
        Ok(())
    }
}
