use std::sync::Arc;

use meantemp_archive::Archiver;
use meantemp_cache::CacheGateway;
use meantemp_stations::Aggregator;

use crate::config::ServiceConfig;
use crate::metrics::ServiceMetrics;
use crate::readiness::ReadinessEvaluator;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Arc<ServiceConfig>,
    /// Live aggregate producer (station fan-out).
    pub aggregator: Arc<Aggregator>,
    /// Cache-aside gateway over the aggregate key.
    pub gateway: Arc<CacheGateway>,
    /// Snapshot writer, shared with the background timer task.
    pub archiver: Arc<Archiver>,
    /// Readiness probe evaluator.
    pub evaluator: Arc<ReadinessEvaluator>,
    /// Instance-scoped counters rendered by `/metrics`.
    pub metrics: Arc<ServiceMetrics>,
}
