//! Error types for the document cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::storage::StorageError;

// == Cache Error Enum ==
/// Unified error type for the document cache and its HTTP surface.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Document is larger than the configured per-file limit
    #[error("File of {size} bytes exceeds the maximum size of {max} bytes")]
    SizeLimitExceeded { size: usize, max: usize },

    /// Storage rejected the write even after dropping older documents
    #[error("Storage full: {0}")]
    StorageFull(String),

    /// No document with the given id
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Stored payload could not be decoded
    #[error("Corrupt payload: {0}")]
    CorruptPayload(String),

    /// Backend failure other than quota exhaustion
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CacheError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::SizeLimitExceeded { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            CacheError::StorageFull(_) => StatusCode::INSUFFICIENT_STORAGE,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::CorruptPayload(_) | CacheError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.to_string()));
        (self.status_code(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the document cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            CacheError::SizeLimitExceeded { size: 11, max: 10 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            CacheError::StorageFull("x".into()).status_code(),
            StatusCode::INSUFFICIENT_STORAGE
        );
        assert_eq!(
            CacheError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CacheError::InvalidRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CacheError::CorruptPayload("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_size_limit_message() {
        let err = CacheError::SizeLimitExceeded { size: 11, max: 10 };
        assert_eq!(
            err.to_string(),
            "File of 11 bytes exceeds the maximum size of 10 bytes"
        );
    }

    #[test]
    fn test_storage_error_converts() {
        let err: CacheError = StorageError::QuotaExceeded {
            requested: 2,
            quota: 1,
        }
        .into();
        assert!(matches!(err, CacheError::Storage(_)));
    }
}
