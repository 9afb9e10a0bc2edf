//! API Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clinical_features::Disease;
use data_validator::ValidationError;
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the API and the server bootstrap
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unknown disease: {0}")]
    UnknownDisease(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Validation failed for {disease}: {} errors", errors.len())]
    Validation {
        disease: Disease,
        errors: Vec<ValidationError>,
    },
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Server error: {0}")]
    Server(String),
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ValidationError>,
}

impl ApiError {
    /// Stable machine readable code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::UnknownDisease(_) => "unknown_disease",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Validation { .. } => "validation_failed",
            ApiError::Inference(InferenceError::DimensionMismatch { .. }) => "dimension_mismatch",
            ApiError::Inference(InferenceError::NonFiniteFeature { .. }) => "non_finite_feature",
            ApiError::Inference(InferenceError::NumericOverflow { .. }) => "numeric_overflow",
            ApiError::Inference(_) => "inference_failed",
            ApiError::Configuration(_) | ApiError::Config(_) => "configuration",
            ApiError::Io(_) | ApiError::Server(_) => "internal",
        }
    }

    /// HTTP status for the error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownDisease(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation { .. }
            | ApiError::Inference(InferenceError::DimensionMismatch { .. })
            | ApiError::Inference(InferenceError::NonFiniteFeature { .. })
            | ApiError::Inference(InferenceError::NumericOverflow { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let code = self.code();
        let details = match self {
            ApiError::Validation { errors, .. } => errors,
            _ => Vec::new(),
        };
        (
            status,
            Json(ErrorBody {
                error: code,
                message,
                details,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::UnknownDisease("lungs".into()).status(),
            StatusCode::NOT_FOUND
        );
        let mismatch = ApiError::from(InferenceError::DimensionMismatch {
            disease: Disease::Heart,
            expected: 13,
            actual: 12,
        });
        assert_eq!(mismatch.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(mismatch.code(), "dimension_mismatch");
        let overflow = ApiError::from(InferenceError::NumericOverflow {
            disease: Disease::Heart,
            stage: "scaling",
        });
        assert_eq!(overflow.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(overflow.code(), "numeric_overflow");
        assert_eq!(
            ApiError::Server("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
