//! API error handling
//!
//! Every failure is answered with the same JSON body:
//! `{ error, message, status, path, timestamp }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ep_core::PairError;
use serde::{Deserialize, Serialize};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What went wrong, independent of where
#[derive(Debug)]
enum ErrorKind {
    Pair(PairError),
    PayloadTooLarge,
    BadRequest(String),
    Internal(String),
}

/// API error, tagged with the request path it occurred on
#[derive(Debug)]
pub struct ApiError {
    kind: ErrorKind,
    path: String,
}

impl ApiError {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: String::new(),
        }
    }

    /// Request body exceeded the transport limit
    pub fn payload_too_large() -> Self {
        Self::new(ErrorKind::PayloadTooLarge)
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest(msg.into()))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(msg.into()))
    }

    /// Attach the request path reported in the body
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn status_code(&self) -> StatusCode {
        match &self.kind {
            ErrorKind::Pair(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::BadRequest(_) => StatusCode::BAD_REQUEST,
            ErrorKind::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn title(&self) -> &'static str {
        match &self.kind {
            ErrorKind::Pair(e) => e.error_title(),
            ErrorKind::PayloadTooLarge => "File Size Exceeded",
            ErrorKind::BadRequest(_) => "Invalid Argument",
            ErrorKind::Internal(_) => "Internal Server Error",
        }
    }

    /// Message shown to the client; internal details are never exposed
    fn message(&self) -> String {
        match &self.kind {
            ErrorKind::Pair(e) => e.to_string(),
            ErrorKind::PayloadTooLarge => {
                "The uploaded file is too large. Please upload a smaller file.".to_string()
            }
            ErrorKind::BadRequest(msg) => msg.clone(),
            ErrorKind::Internal(_) => {
                "An unexpected error occurred. Please try again later.".to_string()
            }
        }
    }
}

impl From<PairError> for ApiError {
    fn from(e: PairError) -> Self {
        Self::new(ErrorKind::Pair(e))
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
    pub path: String,
    pub timestamp: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self.kind {
            ErrorKind::Internal(detail) => {
                tracing::error!(path = %self.path, error = %detail, "Unexpected error");
            }
            _ => {
                tracing::warn!(path = %self.path, status = status.as_u16(), "{}", self.message());
            }
        }

        let body = ErrorResponse {
            error: self.title().to_string(),
            message: self.message(),
            status: status.as_u16(),
            path: self.path,
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
