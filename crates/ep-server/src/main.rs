//! Employee Pairs Server
//!
//! HTTP front end for uploading assignment files and querying the
//! longest-working employee pair.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ep_api::AppState;
use ep_core::config::{AppConfig, StorageBackend};
use ep_db::{AssignmentStore, Database, MemoryAssignmentStore, PgAssignmentStore};
use ep_ingest::UploadPolicy;
use ep_services::EmployeePairService;

mod health;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize structured logging
    init_tracing();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        storage = ?config.storage,
        "Starting Employee Pairs server"
    );

    let (store, db) = open_store(&config).await?;
    let service = EmployeePairService::new(store, UploadPolicy::from(&config.upload));
    let state = AppState::new(service, config.clone());

    // Build router
    let app = build_router(state)?;

    // Start server
    let addr = config.server_addr();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = db {
        db.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,ep_server=debug,ep_api=debug,tower_http=debug".into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Open the configured assignment store
async fn open_store(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn AssignmentStore>, Option<Database>)> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory assignment storage");
            Ok((Arc::new(MemoryAssignmentStore::new()), None))
        }
        StorageBackend::Postgres => {
            let db = Database::connect(&config.database)
                .await
                .context("Failed to connect to database")?;
            ep_db::schema::ensure_schema(db.pool())
                .await
                .context("Failed to prepare database schema")?;
            info!("Connected to database");

            let store = PgAssignmentStore::new(db.pool().clone());
            Ok((Arc::new(store), Some(db)))
        }
    }
}

/// Build the application router
fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config.server.cors_allowed_origins)?;

    // Health check routes
    let health_routes = Router::new()
        .route("/health", get(health::liveness))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    let api_routes = ep_api::router(&state.config);

    // Main router
    Ok(Router::new()
        .merge(health_routes)
        .merge(api_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        ))
}

/// Browser access limited to the configured origins
fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin '{}'", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any))
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
