//! Employee pair API handlers

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, OriginalUri, State,
    },
    http::StatusCode,
    Json,
};
use ep_ingest::UploadedFile;
use ep_models::PairOverlap;
use ep_services::UploadSummary;

use crate::error::{ApiError, ApiResult};
use crate::extractors::AppState;

/// Multipart field carrying the file
const FILE_FIELD: &str = "file";

/// Upload an assignment file, replacing the stored batch
///
/// POST /api/employees/upload
pub async fn upload(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadSummary>> {
    let path = uri.path().to_string();

    // A body that is not multipart carries no file
    let file = match multipart {
        Ok(multipart) => read_file_field(multipart)
            .await
            .map_err(|e| e.at(path.as_str()))?,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Upload without multipart body");
            None
        }
    };

    if let Some(file) = &file {
        tracing::info!(filename = file.display_name(), size = file.size(), "Received file upload");
    }

    let summary = state
        .service
        .upload(file)
        .await
        .map_err(|e| ApiError::from(e).at(path.as_str()))?;

    Ok(Json(summary))
}

/// Analyze the stored batch
///
/// GET /api/employees/longest-pair
pub async fn longest_pair(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<Json<PairOverlap>> {
    tracing::info!("Received request for longest working pair");

    let result = state
        .service
        .longest_pair()
        .await
        .map_err(|e| ApiError::from(e).at(uri.path()))?;

    Ok(Json(result))
}

/// First field named `file`; other fields are ignored
async fn read_file_field(mut multipart: Multipart) -> ApiResult<Option<UploadedFile>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content = field.bytes().await.map_err(multipart_error)?;
        return Ok(Some(UploadedFile { filename, content }));
    }

    Ok(None)
}

fn multipart_error(e: MultipartError) -> ApiError {
    let status = e.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large()
    } else if status.is_client_error() {
        ApiError::bad_request(e.body_text())
    } else {
        ApiError::internal(e.body_text())
    }
}
