//! Fan-out over the configured stations and aggregate computation.

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;

use meantemp_core::aggregate::summarize;
use meantemp_core::types::AggregateResult;
use meantemp_core::TemperatureSource;

use crate::client::StationClient;

/// Computes the live average over a fixed set of stations.
///
/// Station calls are issued concurrently; order does not affect the
/// result, only set membership after the recency filter. A station
/// that fails or returns stale data is dropped silently.
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: StationClient,
    station_ids: Vec<String>,
}

impl Aggregator {
    pub fn new(client: StationClient, station_ids: Vec<String>) -> Self {
        Self {
            client,
            station_ids,
        }
    }

    /// Number of configured stations.
    pub fn station_count(&self) -> usize {
        self.station_ids.len()
    }

    /// Probe every configured station and count the ones that answer.
    pub async fn reachable_count(&self) -> usize {
        let probes = self.station_ids.iter().map(|id| self.client.probe(id));
        join_all(probes).await.into_iter().filter(|ok| *ok).count()
    }
}

#[async_trait]
impl TemperatureSource for Aggregator {
    /// Fetch all stations, filter by recency, and average.
    ///
    /// `None` means no station delivered a usable in-window reading.
    async fn compute(&self) -> Option<AggregateResult> {
        let fetches = self.station_ids.iter().map(|id| self.client.fetch(id));
        let readings: Vec<_> = join_all(fetches).await.into_iter().flatten().collect();

        let now = Utc::now();
        tracing::debug!(
            stations = self.station_ids.len(),
            readings = readings.len(),
            "Computing live aggregate"
        );

        summarize(&readings, now)
    }
}
