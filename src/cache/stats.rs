//! Cache Statistics Module
//!
//! Tracks cache activity: lookups, saves, evictions and quota recoveries.

use serde::Serialize;

// == Cache Stats ==
/// Process-local counters; they are not persisted with the collection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups that found a document
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Documents accepted by `save`
    pub saves: u64,
    /// Saves refused for exceeding the size limit
    pub rejected: u64,
    /// Documents dropped by the count cap
    pub evictions: u64,
    /// Saves that only succeeded after dropping all older documents
    pub quota_recoveries: u64,
    /// Current number of documents in the cache
    pub total_entries: usize,
}

/// Storage consumption report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheUsage {
    /// Serialized size of the persisted collection, encoding overhead included
    pub used_bytes: usize,
    /// Configured storage ceiling
    pub total_budget_bytes: usize,
}

impl CacheUsage {
    /// Fraction of the budget in use, 0.0 for a zero budget.
    pub fn utilization(&self) -> f64 {
        if self.total_budget_bytes == 0 {
            0.0
        } else {
            self.used_bytes as f64 / self.total_budget_bytes as f64
        }
    }
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the lookup hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_save(&mut self) {
        self.saves += 1;
    }

    pub fn record_rejected(&mut self) {
        self.rejected += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub fn record_quota_recovery(&mut self) {
        self.quota_recoveries += 1;
    }

    // == Update Entry Count ==
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
