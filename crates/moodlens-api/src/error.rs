//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use moodlens_inference::InferenceError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The classifier never loaded; requests fail fast until restart.
    #[error("Model not loaded. Please train the model first.")]
    ModelUnavailable,

    /// No file field was present in the upload.
    #[error("No image provided")]
    MissingInput,

    /// The uploaded bytes could not be decoded as an image.
    #[error("Invalid image")]
    InvalidImage,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::MissingInput | ApiError::InvalidImage | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InferenceError> for ApiError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::Decode(_) => ApiError::InvalidImage,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose internal error details in production
        let error = match &self {
            ApiError::Internal(_) => {
                if std::env::var("ENVIRONMENT").unwrap_or_default() == "production" {
                    "An internal error occurred".to_string()
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse { error };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::ModelUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(ApiError::MissingInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidImage.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_decode_failures_map_to_invalid_image() {
        let err: ApiError = InferenceError::decode("bad bytes").into();
        assert!(matches!(err, ApiError::InvalidImage));
        assert_eq!(err.to_string(), "Invalid image");
    }

    #[test]
    fn test_session_failures_stay_internal() {
        let err: ApiError = InferenceError::session("ort exploded").into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
