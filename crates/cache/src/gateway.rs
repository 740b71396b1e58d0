//! The cache-aside gateway over the aggregate key.
//!
//! Read path: serve the cached average when present and unexpired.
//! Miss path: run the live compute, store the value with its TTL, and
//! stamp the freshness marker. An unreachable store never fails the
//! caller; the gateway degrades to always-live and reports the
//! condition through the metrics sink.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use meantemp_core::aggregate::classify;
use meantemp_core::types::{
    AggregateResult, Source, Timestamp, CACHE_TTL_SECS, KEY_AVERAGE_TEMPERATURE,
    KEY_CACHE_TIMESTAMP,
};
use meantemp_core::{MetricsSink, TemperatureSource};

use crate::error::CacheError;
use crate::store::KvStore;

/// Cache gateway owning the `average_temperature` and
/// `temperature_cache_timestamp` key lifecycles. No other component
/// writes these keys.
pub struct CacheGateway {
    store: Arc<dyn KvStore>,
    metrics: Arc<dyn MetricsSink>,
    ttl: Duration,
}

impl CacheGateway {
    pub fn new(store: Arc<dyn KvStore>, metrics: Arc<dyn MetricsSink>) -> Self {
        Self::with_ttl(store, metrics, Duration::from_secs(CACHE_TTL_SECS))
    }

    /// Gateway with a non-default TTL (tests shorten it).
    pub fn with_ttl(
        store: Arc<dyn KvStore>,
        metrics: Arc<dyn MetricsSink>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            metrics,
            ttl,
        }
    }

    /// Return the cached average or compute a live one.
    ///
    /// `None` means no data: the cache was empty (or unreadable) and
    /// no station delivered an in-window reading. A no-data compute
    /// writes nothing, so absence is never persisted as a number.
    pub async fn get_or_compute(&self, source: &dyn TemperatureSource) -> Option<AggregateResult> {
        let mut store_degraded = false;

        match self.store.get(KEY_AVERAGE_TEMPERATURE).await {
            Ok(Some(raw)) => match raw.parse::<f64>() {
                Ok(average) => {
                    self.metrics.cache_hit();
                    self.metrics.observe_average(average);
                    return Some(AggregateResult {
                        average,
                        status: classify(average),
                        computed_at: Utc::now(),
                        source: Source::Cache,
                    });
                }
                Err(_) => {
                    // Corrupted entry; recompute rather than guess.
                    tracing::warn!(key = KEY_AVERAGE_TEMPERATURE, %raw, "Unparseable cached value, recomputing");
                    self.metrics.cache_miss();
                }
            },
            Ok(None) => {
                self.metrics.cache_miss();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cache store unreachable, serving live");
                self.metrics.cache_error();
                store_degraded = true;
            }
        }

        let result = source.compute().await?;
        self.metrics.observe_average(result.average);

        if !store_degraded {
            self.write_back(result.average).await;
        }

        Some(result)
    }

    /// When the cache was last repopulated from a live fetch, if ever.
    pub async fn last_refresh(&self) -> Result<Option<Timestamp>, CacheError> {
        let Some(raw) = self.store.get(KEY_CACHE_TIMESTAMP).await? else {
            return Ok(None);
        };

        match raw.parse::<i64>().ok().and_then(|s| DateTime::from_timestamp(s, 0)) {
            Some(at) => Ok(Some(at)),
            None => {
                tracing::warn!(key = KEY_CACHE_TIMESTAMP, %raw, "Unparseable freshness marker");
                Ok(None)
            }
        }
    }

    /// Store the fresh average and stamp the freshness marker. Write
    /// failures are contained here; the caller already has its value.
    async fn write_back(&self, average: f64) {
        if let Err(e) = self
            .store
            .put(KEY_AVERAGE_TEMPERATURE, &average.to_string(), Some(self.ttl))
            .await
        {
            tracing::warn!(error = %e, "Failed to cache computed average");
            self.metrics.cache_error();
            return;
        }

        let epoch_secs = Utc::now().timestamp().to_string();
        if let Err(e) = self.store.put(KEY_CACHE_TIMESTAMP, &epoch_secs, None).await {
            tracing::warn!(error = %e, "Failed to stamp freshness marker");
            self.metrics.cache_error();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use meantemp_core::NoopSink;

    use crate::memory::MemoryStore;

    /// Source returning a fixed average and counting invocations.
    struct StubSource {
        average: Option<f64>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(average: Option<f64>) -> Self {
            Self {
                average,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TemperatureSource for StubSource {
        async fn compute(&self) -> Option<AggregateResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.average.map(|average| AggregateResult {
                average,
                status: classify(average),
                computed_at: Utc::now(),
                source: Source::Live,
            })
        }
    }

    /// Store where every operation fails.
    struct FailingStore;

    #[async_trait]
    impl KvStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Err(CacheError::Connection("refused".into()))
        }

        async fn put(
            &self,
            _key: &str,
            _value: &str,
            _ttl: Option<Duration>,
        ) -> Result<(), CacheError> {
            Err(CacheError::Connection("refused".into()))
        }
    }

    fn gateway(store: Arc<dyn KvStore>) -> CacheGateway {
        CacheGateway::new(store, Arc::new(NoopSink))
    }

    #[tokio::test]
    async fn cold_cache_computes_live_then_serves_cached() {
        let store = Arc::new(MemoryStore::new());
        let gateway = gateway(store.clone());
        let source = StubSource::new(Some(22.5));

        let first = gateway.get_or_compute(&source).await.unwrap();
        assert_eq!(first.average, 22.5);
        assert_eq!(first.source, Source::Live);

        let second = gateway.get_or_compute(&source).await.unwrap();
        assert_eq!(second.average, 22.5);
        assert_eq!(second.source, Source::Cache);

        // The second call must not have recomputed.
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn live_refresh_writes_value_and_marker_keys() {
        let store = Arc::new(MemoryStore::new());
        let gateway = gateway(store.clone());
        let source = StubSource::new(Some(18.25));

        gateway.get_or_compute(&source).await.unwrap();

        let value = store.get(KEY_AVERAGE_TEMPERATURE).await.unwrap().unwrap();
        assert_eq!(value, "18.25");

        let marker = gateway.last_refresh().await.unwrap().unwrap();
        assert!((Utc::now() - marker).num_seconds().abs() < 5);
    }

    #[tokio::test]
    async fn expired_entry_triggers_live_recompute() {
        let store = Arc::new(MemoryStore::new());
        let gateway = CacheGateway::with_ttl(
            store.clone(),
            Arc::new(NoopSink),
            Duration::from_millis(20),
        );
        let source = StubSource::new(Some(15.0));

        gateway.get_or_compute(&source).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        let after = gateway.get_or_compute(&source).await.unwrap();
        assert_eq!(after.source, Source::Live);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn no_data_is_not_cached() {
        let store = Arc::new(MemoryStore::new());
        let gateway = gateway(store.clone());
        let source = StubSource::new(None);

        assert!(gateway.get_or_compute(&source).await.is_none());
        assert!(store.get(KEY_AVERAGE_TEMPERATURE).await.unwrap().is_none());
        assert!(gateway.last_refresh().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unreachable_store_degrades_to_live() {
        let gateway = gateway(Arc::new(FailingStore));
        let source = StubSource::new(Some(30.0));

        let result = gateway.get_or_compute(&source).await.unwrap();
        assert_eq!(result.average, 30.0);
        assert_eq!(result.source, Source::Live);
    }

    #[tokio::test]
    async fn unreachable_store_fails_last_refresh_explicitly() {
        let gateway = gateway(Arc::new(FailingStore));
        assert!(gateway.last_refresh().await.is_err());
    }

    #[tokio::test]
    async fn corrupted_cache_entry_is_treated_as_miss() {
        let store = Arc::new(MemoryStore::new());
        store
            .put(KEY_AVERAGE_TEMPERATURE, "{\"temperature\": 50.0}", None)
            .await
            .unwrap();

        let gateway = gateway(store.clone());
        let source = StubSource::new(Some(12.0));

        let result = gateway.get_or_compute(&source).await.unwrap();
        assert_eq!(result.average, 12.0);
        assert_eq!(result.source, Source::Live);
        assert_eq!(source.calls(), 1);
    }
}
