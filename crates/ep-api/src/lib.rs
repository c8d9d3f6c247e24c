//! # ep-api
//!
//! REST API handlers for Employee Pairs.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use extractors::AppState;
pub use routes::router;
