//! Error types for the gateway crate.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// A required input was absent from the request.
    #[error(transparent)]
    MissingInput(#[from] idv_core::CoreError),

    /// The request body or query string could not be decoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The upload exceeded the configured body limit.
    #[error("upload exceeds the request body limit")]
    UploadTooLarge,
}

impl From<MultipartError> for GatewayError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            GatewayError::UploadTooLarge
        } else {
            GatewayError::InvalidRequest(err.body_text())
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::MissingInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::UploadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        };
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
