use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;

use meantemp_core::types::{Source, TempStatus};

use crate::state::AppState;

/// Successful `/temperature` payload.
#[derive(Debug, Serialize)]
pub struct TemperatureResponse {
    pub average: f64,
    pub status: TempStatus,
    pub source: Source,
}

/// GET /temperature -- the rolling average with its status band.
///
/// Never errors: no usable data maps to a 200 with an explicit
/// no-data payload, never to a 5xx and never to a made-up number.
async fn get_temperature(State(state): State<AppState>) -> Response {
    state.metrics.record_request();

    match state
        .gateway
        .get_or_compute(state.aggregator.as_ref())
        .await
    {
        Some(aggregate) => Json(TemperatureResponse {
            average: aggregate.average,
            status: aggregate.status,
            source: aggregate.source,
        })
        .into_response(),
        None => Json(json!({
            "message": "no temperature data available",
        }))
        .into_response(),
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/temperature", get(get_temperature))
}
