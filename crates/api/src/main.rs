use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meantemp_api::config::ServiceConfig;
use meantemp_api::metrics::ServiceMetrics;
use meantemp_api::readiness::ReadinessEvaluator;
use meantemp_api::router::build_router;
use meantemp_api::state::AppState;
use meantemp_archive::{Archiver, BlobStore, S3BlobStore};
use meantemp_cache::{CacheGateway, ValkeyStore};
use meantemp_stations::{Aggregator, StationClient};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meantemp_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServiceConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        stations = config.station_ids.len(),
        "Loaded service configuration"
    );

    // --- Metrics ---
    let metrics = Arc::new(ServiceMetrics::new());

    // --- Cache store ---
    // The pool connects lazily; an unreachable store at startup only
    // degrades the cache to always-live, it must not abort boot.
    let store = ValkeyStore::new(&config.valkey_url, config.valkey_pool_size)
        .expect("Invalid VALKEY_URL configuration");
    match store.ping().await {
        Ok(()) => tracing::info!("Valkey connection verified"),
        Err(e) => tracing::warn!(error = %e, "Valkey unreachable, serving live until it returns"),
    }
    let gateway = Arc::new(CacheGateway::new(Arc::new(store), metrics.clone()));

    // --- Stations ---
    let client = StationClient::new(config.sensemap_base_url.clone());
    let aggregator = Arc::new(Aggregator::new(client, config.station_ids.clone()));

    // --- Blob storage ---
    let blobs = Arc::new(S3BlobStore::from_env(config.archive_bucket.clone()).await);
    match blobs.ensure_bucket().await {
        Ok(()) => tracing::info!(bucket = %config.archive_bucket, "Archive bucket ready"),
        Err(e) => {
            // The archiver retries every tick; a missing bucket only
            // fails snapshots, not the read path.
            tracing::error!(error = %e, "Could not ensure archive bucket");
        }
    }

    // --- Archiver ---
    let archiver = Arc::new(Archiver::new(
        Arc::clone(&gateway),
        aggregator.clone(),
        blobs,
        metrics.clone(),
    ));
    let archive_cancel = CancellationToken::new();
    let archive_handle = tokio::spawn(Arc::clone(&archiver).run(archive_cancel.clone()));
    tracing::info!("Archiver timer task started");

    // --- Readiness ---
    let evaluator = Arc::new(ReadinessEvaluator::new(
        Arc::clone(&aggregator),
        Arc::clone(&gateway),
    ));

    // --- App state & router ---
    let state = AppState {
        config: Arc::new(config.clone()),
        aggregator,
        gateway,
        archiver,
        evaluator,
        metrics,
    };
    let app = build_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    archive_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), archive_handle).await;
    tracing::info!("Archiver timer stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
