//! Document Cache Module
//!
//! Bounded document store persisted as one serialized collection under a
//! single storage key, with FIFO eviction and quota recovery.

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::cache::{
    current_timestamp_ms, CacheConfig, CacheStats, CacheUsage, DocumentMeta, StoredDocument,
};
use crate::error::{CacheError, Result};
use crate::storage::{StorageBackend, StorageError};

// == Document Cache ==
/// Capacity-bounded cache of uploaded documents.
pub struct DocumentCache {
    /// Persistent key-value store holding the collection
    backend: Box<dyn StorageBackend>,
    /// Limits and storage key
    config: CacheConfig,
    /// Activity counters
    stats: CacheStats,
    /// Last id handed out, in Unix milliseconds
    last_id: u64,
}

impl std::fmt::Debug for DocumentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCache")
            .field("backend", &self.backend.backend_tag())
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish()
    }
}

impl DocumentCache {
    // == Constructor ==
    /// Creates a cache over `backend`.
    ///
    /// A `max_files` of zero is raised to one so a save can always land.
    pub fn new(backend: Box<dyn StorageBackend>, mut config: CacheConfig) -> Self {
        config.max_files = config.max_files.max(1);
        let mut cache = Self {
            backend,
            config,
            stats: CacheStats::new(),
            last_id: 0,
        };
        let resident = cache.load_meta().len();
        cache.stats.set_total_entries(resident);
        cache
    }

    /// Limits this cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Save ==
    /// Stores `content` under display name `name` and returns its new id.
    ///
    /// The oldest documents are evicted until there is room for one more.
    /// If the backend reports quota exhaustion, the write is retried with
    /// only the new document; a second quota failure is `StorageFull`.
    ///
    /// # Errors
    /// - `SizeLimitExceeded` if `content` is over `max_file_size`; storage
    ///   is not touched
    /// - `StorageFull` if even the single-document write is refused
    /// - `Storage` for any other backend failure
    pub fn save(&mut self, content: &[u8], name: &str) -> Result<String> {
        if content.len() > self.config.max_file_size {
            self.stats.record_rejected();
            warn!(
                name,
                size = content.len(),
                max = self.config.max_file_size,
                "Rejected oversized document"
            );
            return Err(CacheError::SizeLimitExceeded {
                size: content.len(),
                max: self.config.max_file_size,
            });
        }

        let mut documents = self.load_documents();

        let id = self.next_id(&documents);
        let document = StoredDocument::new(id.clone(), name, content);

        let excess = (documents.len() + 1).saturating_sub(self.config.max_files);
        for evicted in documents.drain(..excess) {
            debug!(id = %evicted.id, name = %evicted.name, "Evicting oldest document");
        }
        documents.push(document);

        match self.persist(&documents) {
            Ok(()) => self.stats.record_evictions(excess),
            Err(e) if e.is_quota_exceeded() => {
                warn!(
                    error = %e,
                    dropped = documents.len() - 1,
                    "Storage quota exceeded, retrying with only the new document"
                );
                // The new document is always last.
                let newest = documents.split_off(documents.len() - 1);
                match self.persist(&newest) {
                    Ok(()) => {
                        self.stats.record_evictions(excess + documents.len());
                        self.stats.record_quota_recovery();
                        documents = newest;
                    }
                    Err(e) if e.is_quota_exceeded() => {
                        warn!(error = %e, name, "Document does not fit in storage");
                        return Err(CacheError::StorageFull(e.to_string()));
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Err(e) => return Err(e.into()),
        }

        self.stats.record_save();
        self.stats.set_total_entries(documents.len());
        info!(id = %id, name, size = content.len(), "Saved document");
        Ok(id)
    }

    // == Get ==
    /// Looks up a document by id. Returns `None` when absent.
    pub fn get(&mut self, id: &str) -> Option<StoredDocument> {
        let found = self.load_documents().into_iter().find(|d| d.id == id);
        match found {
            Some(_) => self.stats.record_hit(),
            None => {
                self.stats.record_miss();
                debug!(id, "Document not found");
            }
        }
        found
    }

    // == Read Bytes ==
    /// Looks up a document and decodes its payload to the original bytes.
    pub fn read_bytes(&mut self, id: &str) -> Result<Option<Vec<u8>>> {
        self.get(id)
            .map(|doc| doc.decode().map(|decoded| decoded.bytes))
            .transpose()
    }

    // == List All ==
    /// Metadata of every stored document in insertion order.
    pub fn list_all(&self) -> Vec<DocumentMeta> {
        self.load_meta()
    }

    // == Clear ==
    /// Removes the whole collection. Backend failures are logged, not returned.
    pub fn clear(&mut self) {
        match self.backend.remove_item(&self.config.storage_key) {
            Ok(()) => info!("Cleared document cache"),
            Err(e) => warn!(error = %e, "Failed to clear document cache"),
        }
        let resident = self.load_meta().len();
        self.stats.set_total_entries(resident);
    }

    // == Usage ==
    /// Serialized size of the persisted collection against the budget.
    ///
    /// A failed read counts as zero bytes used.
    pub fn usage(&self) -> CacheUsage {
        let used_bytes = match self.backend.get_item(&self.config.storage_key) {
            Ok(value) => value.map_or(0, |v| v.len()),
            Err(e) => {
                warn!(error = %e, "Failed to read storage for usage, reporting zero");
                0
            }
        };
        CacheUsage {
            used_bytes,
            total_budget_bytes: self.config.total_budget_bytes,
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.len());
        stats
    }

    // == Length ==
    /// Number of documents currently stored.
    pub fn len(&self) -> usize {
        self.load_meta().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load_documents(&self) -> Vec<StoredDocument> {
        self.load_collection()
    }

    /// Reads the collection without materializing any payload.
    fn load_meta(&self) -> Vec<DocumentMeta> {
        self.load_collection()
    }

    /// Reads the persisted collection as `T` records. Missing, unreadable or
    /// corrupt values all read as empty.
    fn load_collection<T: DeserializeOwned>(&self) -> Vec<T> {
        let raw = match self.backend.get_item(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read document collection, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(documents) => documents,
            Err(e) => {
                warn!(error = %e, "Stored document collection is corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    fn persist(&mut self, documents: &[StoredDocument]) -> std::result::Result<(), StorageError> {
        let serialized = serde_json::to_string(documents)?;
        self.backend.set_item(&self.config.storage_key, &serialized)
    }

    /// Millisecond timestamp id, bumped past the last issued id and any id
    /// already in the collection.
    fn next_id(&mut self, existing: &[StoredDocument]) -> String {
        let mut candidate = current_timestamp_ms().max(self.last_id + 1);
        while existing.iter().any(|d| d.id == candidate.to_string()) {
            candidate += 1;
        }
        self.last_id = candidate;
        candidate.to_string()
    }
}
