//! Snapshot operation and the interval loop driving it.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use meantemp_cache::CacheGateway;
use meantemp_core::types::Timestamp;
use meantemp_core::{MetricsSink, TemperatureSource};

use crate::error::ArchiveError;
use crate::store::BlobStore;

/// Fixed interval between timer-driven snapshots.
pub const SNAPSHOT_INTERVAL: Duration = Duration::from_secs(300);

/// JSON body written for each snapshot.
#[derive(Debug, Serialize)]
struct SnapshotBody {
    #[serde(rename = "Average")]
    average: f64,
    status: &'static str,
}

/// Proof that one snapshot was durably written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReceipt {
    /// Object key the snapshot was stored under.
    pub key: String,
    /// When the snapshot was taken.
    pub written_at: Timestamp,
}

/// Takes snapshots of the current aggregate, on a timer and on
/// demand. Reuses the cache gateway read path, so a cold cache
/// triggers a live compute.
pub struct Archiver {
    gateway: Arc<CacheGateway>,
    source: Arc<dyn TemperatureSource>,
    blobs: Arc<dyn BlobStore>,
    metrics: Arc<dyn MetricsSink>,
}

impl Archiver {
    pub fn new(
        gateway: Arc<CacheGateway>,
        source: Arc<dyn TemperatureSource>,
        blobs: Arc<dyn BlobStore>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            gateway,
            source,
            blobs,
            metrics,
        }
    }

    /// Snapshot the current aggregate into blob storage.
    ///
    /// Object keys embed a sortable second-resolution timestamp; a
    /// second snapshot within the same second overwrites the first,
    /// which is an acceptable idempotent collision.
    pub async fn snapshot(&self) -> Result<ArchiveReceipt, ArchiveError> {
        let aggregate = self
            .gateway
            .get_or_compute(self.source.as_ref())
            .await
            .ok_or(ArchiveError::NoData)?;

        let written_at = Utc::now();
        let key = snapshot_key(written_at);
        let body = serde_json::to_vec(&SnapshotBody {
            average: aggregate.average,
            status: aggregate.status.as_str(),
        })?;

        if let Err(e) = self.blobs.put(&key, body).await {
            self.metrics.snapshot_failed();
            return Err(e);
        }

        self.metrics.snapshot_written();
        tracing::info!(%key, average = aggregate.average, "Snapshot archived");

        Ok(ArchiveReceipt { key, written_at })
    }

    /// Run the snapshot timer until `cancel` is triggered.
    ///
    /// Failed ticks are logged and dropped; the next tick retries
    /// independently.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        tracing::info!(
            interval_secs = SNAPSHOT_INTERVAL.as_secs(),
            "Archiver timer started"
        );

        let mut interval = tokio::time::interval(SNAPSHOT_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Archiver timer stopping");
                    break;
                }
                _ = interval.tick() => {
                    match self.snapshot().await {
                        Ok(receipt) => {
                            tracing::debug!(key = %receipt.key, "Timed snapshot written");
                        }
                        Err(ArchiveError::NoData) => {
                            tracing::debug!("Timed snapshot skipped, no data");
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Timed snapshot failed");
                        }
                    }
                }
            }
        }
    }
}

/// `temperature_<YYYY-MM-DD_HH-MM-SS>.json`, lexicographically
/// sortable by time.
fn snapshot_key(at: Timestamp) -> String {
    format!("temperature_{}.json", at.format("%Y-%m-%d_%H-%M-%S"))
}
