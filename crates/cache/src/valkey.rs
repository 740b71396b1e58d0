//! Valkey/Redis adapter for the [`KvStore`] contract.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;

use crate::error::CacheError;
use crate::store::KvStore;

/// Valkey/Redis backend over a connection pool.
#[derive(Clone)]
pub struct ValkeyStore {
    pool: Pool,
}

impl ValkeyStore {
    /// Build a pooled store for the given URL (e.g.
    /// `redis://valkey-service:6379`). The pool connects lazily; use
    /// [`ValkeyStore::ping`] to verify connectivity at startup.
    pub fn new(url: &str, pool_size: usize) -> Result<Self, CacheError> {
        let config = Config::from_url(url);
        let pool = config
            .builder()
            .map_err(|e| CacheError::Connection(e.to_string()))?
            .max_size(pool_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Round-trip a `PING` to verify the store is reachable.
    pub async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        redis::cmd("PING")
            .query_async::<String>(&mut *conn)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl KvStore for ValkeyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        conn.get(key)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(|e| CacheError::Backend(e.to_string()))?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(|e| CacheError::Backend(e.to_string()))?;
            }
        }

        Ok(())
    }
}
