//! Storage Module
//!
//! Key-value persistence underneath the document cache. Values are whole
//! strings written in a single call; there is no partial write primitive.

mod error;
mod file;
mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::MemoryBackend;

// == Storage Backend ==
/// A persistent string key-value store with an optional byte quota.
///
/// Implementations must report quota exhaustion as
/// [`StorageError::QuotaExceeded`] so callers can distinguish it from I/O
/// failures.
pub trait StorageBackend: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;

    /// Short name used in logs.
    fn backend_tag(&self) -> &'static str;
}

/// Returns an error if writing `requested` bytes would exceed `quota`.
pub(crate) fn check_quota(quota: Option<usize>, requested: usize) -> StorageResult<()> {
    match quota {
        Some(quota) if requested > quota => Err(StorageError::QuotaExceeded { requested, quota }),
        _ => Ok(()),
    }
}
