use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{routing::post, Json, Router};
use serde_json::json;

use meantemp_archive::ArchiveError;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /store -- snapshot the current aggregate on demand.
///
/// A failed put returns 500; missing data is a 200 no-data payload
/// (absence is not an error). The background timer uses the same
/// snapshot path but swallows failures until its next tick.
async fn store_snapshot(State(state): State<AppState>) -> AppResult<Response> {
    match state.archiver.snapshot().await {
        Ok(receipt) => Ok(Json(json!({
            "message": "stored",
            "key": receipt.key,
        }))
        .into_response()),
        Err(ArchiveError::NoData) => Ok(Json(json!({
            "message": "no temperature data available",
        }))
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/store", post(store_snapshot))
}
