//! Storage error types.

use thiserror::Error;

/// Errors raised by a [`super::StorageBackend`].
#[derive(Error, Debug)]
pub enum StorageError {
    /// The write would push the store past its byte quota
    #[error("Quota exceeded: {requested} bytes requested, quota is {quota} bytes")]
    QuotaExceeded { requested: usize, quota: usize },

    /// The device ran out of space mid-write
    #[error("Out of space writing {requested} bytes: {source}")]
    OutOfSpace {
        requested: usize,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized for writing
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Returns true when the store refused the write for lack of space,
    /// whether from a configured quota or a full device.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(
            self,
            StorageError::QuotaExceeded { .. } | StorageError::OutOfSpace { .. }
        )
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
