//! Cache Module
//!
//! Bounded cache of uploaded documents with FIFO eviction, persisted through
//! a [`crate::storage::StorageBackend`].

mod document;
mod payload;
mod stats;
mod store;


// Re-export public types
pub use document::{current_timestamp_ms, DocumentMeta, StoredDocument};
pub use payload::{decode_data_url, encode_data_url, mime_for_name, DecodedPayload};
pub use stats::{CacheStats, CacheUsage};
pub use store::DocumentCache;

use crate::config::{
    DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE, DEFAULT_STORAGE_BUDGET, DEFAULT_STORAGE_KEY,
};

// == Cache Config ==
/// Limits a [`DocumentCache`] enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of documents resident at once
    pub max_files: usize,
    /// Maximum original size of one document in bytes
    pub max_file_size: usize,
    /// Storage ceiling reported by `usage`
    pub total_budget_bytes: usize,
    /// Key the collection is persisted under
    pub storage_key: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            total_budget_bytes: DEFAULT_STORAGE_BUDGET,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
