use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;

/// GET /version -- the running service version, for deploy checks.
async fn get_version() -> Json<serde_json::Value> {
    Json(json!({
        "Version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/version", get(get_version))
}
