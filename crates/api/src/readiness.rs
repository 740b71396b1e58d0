//! Composite readiness evaluation for the `/readyz` probe.
//!
//! Combines the station-reachability probe with the cache freshness
//! marker. Any internal fault during evaluation maps to a not-ready
//! verdict with a descriptive reason; the probe endpoint itself never
//! fails to answer.

use std::sync::Arc;

use chrono::Utc;

use meantemp_cache::CacheGateway;
use meantemp_core::readiness::{evaluate, required_reachable};
use meantemp_core::types::ReadinessVerdict;
use meantemp_stations::Aggregator;

pub struct ReadinessEvaluator {
    aggregator: Arc<Aggregator>,
    gateway: Arc<CacheGateway>,
}

impl ReadinessEvaluator {
    pub fn new(aggregator: Arc<Aggregator>, gateway: Arc<CacheGateway>) -> Self {
        Self {
            aggregator,
            gateway,
        }
    }

    /// Evaluate the readiness gates in order: upstream reachability,
    /// then cache freshness.
    pub async fn evaluate(&self) -> ReadinessVerdict {
        let now = Utc::now();
        let total = self.aggregator.station_count();
        let reachable = self.aggregator.reachable_count().await;

        // The reachability gate fires before the freshness marker is
        // even read, so a store outage cannot mask an upstream outage.
        if reachable < required_reachable(total) {
            return evaluate(reachable, total, None, now);
        }

        match self.gateway.last_refresh().await {
            Ok(marker) => evaluate(reachable, total, marker, now),
            Err(e) => ReadinessVerdict::not_ready(format!("cache unavailable: {e}")),
        }
    }
}
