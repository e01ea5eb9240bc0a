//! Error types and error handling for the lineseek service.
//!
//! This module defines the error types used throughout the
//! application and provides conversion to HTTP status codes for
//! API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for lineseek operations
pub type Result<T> = std::result::Result<T, LineseekError>;

/// Main error type for the lineseek service
#[derive(Error, Debug)]
pub enum LineseekError {
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    #[error("Invalid index name: {0}")]
    InvalidIndexName(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl LineseekError {
    /// Convert error to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            LineseekError::IndexNotFound(_) => StatusCode::NOT_FOUND,
            LineseekError::InvalidIndexName(_) | LineseekError::ConfigError(_) => {
                StatusCode::BAD_REQUEST
            }
            LineseekError::SearchFailed(_)
            | LineseekError::IoError(_)
            | LineseekError::SerdeError(_)
            | LineseekError::TomlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing error message
    ///
    /// Messages carry the index name and operation, never a
    /// filesystem path.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Implement IntoResponse for automatic error conversion in Axum
impl IntoResponse for LineseekError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_not_found_status() {
        let err = LineseekError::IndexNotFound("hpotter".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_index_name_status() {
        let err = LineseekError::InvalidIndexName("../etc".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_search_failed_status() {
        let err = LineseekError::SearchFailed("collector error".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = LineseekError::from(io_err);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_message() {
        let err = LineseekError::IndexNotFound("my-index".to_string());
        assert!(err.message().contains("my-index"));
        assert!(err.message().contains("not found"));
    }
}
