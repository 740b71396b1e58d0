use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};

use crate::state::AppState;

/// GET /readyz -- the orchestrator-facing readiness probe.
///
/// 200 `OK` when ready, 503 with the human-readable reason otherwise.
/// The probe always answers; internal faults become not-ready
/// verdicts inside the evaluator.
async fn readyz(State(state): State<AppState>) -> Response {
    let verdict = state.evaluator.evaluate().await;

    if verdict.ready {
        (StatusCode::OK, "OK").into_response()
    } else {
        tracing::warn!(reason = %verdict.reason, "Readiness probe failed");
        (StatusCode::SERVICE_UNAVAILABLE, verdict.reason).into_response()
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/readyz", get(readyz))
}
