pub mod metrics;
pub mod ready;
pub mod store;
pub mod temperature;
pub mod version;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree:
///
/// ```text
/// GET  /temperature   average with status and source
/// POST /store         snapshot the aggregate into blob storage
/// GET  /readyz        readiness probe (200 OK / 503 reason)
/// GET  /metrics       Prometheus text exposition
/// GET  /version       running service version
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(temperature::router())
        .merge(store::router())
        .merge(ready::router())
        .merge(metrics::router())
        .merge(version::router())
}
