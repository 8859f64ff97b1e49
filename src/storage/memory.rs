//! In-memory storage backend.

use std::collections::HashMap;

use super::{check_quota, StorageBackend, StorageResult};

// == Memory Backend ==
/// HashMap-backed store. Contents are lost when the value is dropped.
///
/// The quota covers the sum of key and value lengths across all items,
/// which is how browser local storage accounts for it.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryBackend {
    /// Creates an empty backend with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty backend that rejects writes beyond `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes held, excluding the entry under `skip_key`.
    fn bytes_used_excluding(&self, skip_key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != skip_key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let requested = self.bytes_used_excluding(key) + key.len() + value.len();
        check_quota(self.quota_bytes, requested)?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.items.remove(key);
        Ok(())
    }

    fn backend_tag(&self) -> &'static str {
        "memory"
    }
}
