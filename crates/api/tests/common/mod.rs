//! Shared helpers for the API integration tests.
//!
//! Builds the production router over in-memory cache/blob stores and
//! a local mock openSenseMap server, so tests exercise the same
//! middleware stack and wiring as `main.rs` without live backends.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::Path;
use axum::http::{Method, Request, Response, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use meantemp_api::config::ServiceConfig;
use meantemp_api::metrics::ServiceMetrics;
use meantemp_api::readiness::ReadinessEvaluator;
use meantemp_api::router::build_router;
use meantemp_api::state::AppState;
use meantemp_archive::{Archiver, BlobStore, MemoryBlobStore};
use meantemp_cache::{CacheGateway, KvStore, MemoryStore};
use meantemp_stations::{Aggregator, StationClient};

/// A fully wired test application plus handles to its backing stores.
pub struct TestApp {
    pub app: Router,
    pub store: MemoryStore,
    pub blobs: Arc<MemoryBlobStore>,
    pub metrics: Arc<ServiceMetrics>,
}

impl TestApp {
    /// Write the freshness marker as of `age_secs` ago, bypassing the
    /// gateway (tests own the store).
    pub async fn seed_freshness_marker(&self, age_secs: i64) {
        let epoch = (Utc::now().timestamp() - age_secs).to_string();
        self.store
            .put(meantemp_core::types::KEY_CACHE_TIMESTAMP, &epoch, None)
            .await
            .expect("seed marker");
    }
}

/// Mock openSenseMap box handler. Behaviour is keyed on the id
/// prefix: `fresh*` answers a current 22.5 °C reading, `warm*` a
/// current 18.5 °C one, `stale*` a years-old reading, `down*` a 404.
async fn serve_box(Path(id): Path<String>) -> axum::response::Response {
    let now = Utc::now().to_rfc3339();

    let body = if id.starts_with("fresh") {
        format!(
            r#"{{"sensors": [{{"title": "Temperatur", "lastMeasurement": {{"value": "22.5", "createdAt": "{now}"}}}}]}}"#
        )
    } else if id.starts_with("warm") {
        format!(
            r#"{{"sensors": [{{"title": "temperature", "lastMeasurement": {{"value": "18.5", "createdAt": "{now}"}}}}]}}"#
        )
    } else if id.starts_with("stale") {
        r#"{"sensors": [{"title": "Temperatur", "lastMeasurement": {"value": "19.0", "createdAt": "2020-01-01T00:00:00.000Z"}}]}"#.to_string()
    } else {
        return (StatusCode::NOT_FOUND, r#"{"message": "Box not found"}"#).into_response();
    };

    (StatusCode::OK, body).into_response()
}

/// Spawn the mock station API on an ephemeral port, returning its
/// base URL.
pub async fn spawn_mock_stations() -> String {
    let app = Router::new().route("/boxes/{id}", axum::routing::get(serve_box));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock listener addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });

    format!("http://{addr}")
}

/// Test `ServiceConfig` pointing at the mock station API.
pub fn test_config(base_url: &str, station_ids: &[&str]) -> ServiceConfig {
    ServiceConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        sensemap_base_url: base_url.to_string(),
        station_ids: station_ids.iter().map(|s| s.to_string()).collect(),
        valkey_url: "redis://unused".to_string(),
        valkey_pool_size: 1,
        archive_bucket: "temperature-archive".to_string(),
        request_timeout_secs: 30,
    }
}

/// Build the application over in-memory stores and the given station
/// set.
pub async fn build_test_app(station_ids: &[&str]) -> TestApp {
    let store = MemoryStore::new();
    let blobs = Arc::new(MemoryBlobStore::new());

    let (app, metrics) =
        build_app_with(station_ids, store.clone(), blobs.clone() as Arc<dyn BlobStore>).await;

    TestApp {
        app,
        store,
        blobs,
        metrics,
    }
}

/// Build just the router with a caller-supplied blob store (used to
/// exercise archive failures).
pub async fn build_test_app_with_blobs(
    station_ids: &[&str],
    blobs: Arc<dyn BlobStore>,
) -> Router {
    let (app, _) = build_app_with(station_ids, MemoryStore::new(), blobs).await;
    app
}

async fn build_app_with(
    station_ids: &[&str],
    store: MemoryStore,
    blobs: Arc<dyn BlobStore>,
) -> (Router, Arc<ServiceMetrics>) {
    let base_url = spawn_mock_stations().await;
    let config = test_config(&base_url, station_ids);
    let metrics = Arc::new(ServiceMetrics::new());

    let gateway = Arc::new(CacheGateway::new(Arc::new(store), metrics.clone()));

    let client = StationClient::new(config.sensemap_base_url.clone());
    let aggregator = Arc::new(Aggregator::new(client, config.station_ids.clone()));

    let archiver = Arc::new(Archiver::new(
        Arc::clone(&gateway),
        aggregator.clone(),
        blobs,
        metrics.clone(),
    ));

    let evaluator = Arc::new(ReadinessEvaluator::new(
        Arc::clone(&aggregator),
        Arc::clone(&gateway),
    ));

    let state = AppState {
        config: Arc::new(config),
        aggregator,
        gateway,
        archiver,
        evaluator,
        metrics: metrics.clone(),
    };

    (build_router(state), metrics)
}

/// Issue a GET request against the in-process app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("build request"),
    )
    .await
    .expect("infallible")
}

/// Issue a POST request against the in-process app.
pub async fn post(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .expect("build request"),
    )
    .await
    .expect("infallible")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("valid JSON body")
}

/// Collect a response body into a string.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
