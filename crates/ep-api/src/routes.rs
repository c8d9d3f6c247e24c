//! API routes

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use ep_core::config::AppConfig;

use crate::extractors::AppState;
use crate::handlers::employees;

/// Create the complete API router
pub fn router(config: &AppConfig) -> Router<AppState> {
    Router::new().nest("/api/employees", employees_router(config))
}

fn employees_router(config: &AppConfig) -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(employees::upload)
                .layer(DefaultBodyLimit::max(config.upload.max_request_body())),
        )
        .route("/longest-pair", get(employees::longest_pair))
}
