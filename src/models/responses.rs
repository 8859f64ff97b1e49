//! Response DTOs for the upload API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::cache::{CacheStats, CacheUsage, DocumentMeta};

/// Response body for an upload (PUT /documents/:name)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    /// Assigned document id
    pub id: String,
    /// Display filename
    pub name: String,
    /// Original size in bytes
    pub size: usize,
}

impl SaveResponse {
    pub fn new(id: impl Into<String>, name: impl Into<String>, size: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size,
        }
    }
}

/// Response body for the listing (GET /documents)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    /// Stored documents, oldest first
    pub documents: Vec<DocumentMeta>,
}

impl ListResponse {
    pub fn new(documents: Vec<DocumentMeta>) -> Self {
        Self { documents }
    }
}

/// Response body for DELETE /documents
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn cleared() -> Self {
        Self {
            message: "Document cache cleared".to_string(),
        }
    }
}

/// Response body for the usage endpoint (GET /usage)
#[derive(Debug, Clone, Serialize)]
pub struct UsageResponse {
    /// Serialized size of the stored collection
    pub used_bytes: usize,
    /// Configured storage ceiling
    pub total_budget_bytes: usize,
    /// used_bytes / total_budget_bytes
    pub utilization: f64,
}

impl From<CacheUsage> for UsageResponse {
    fn from(usage: CacheUsage) -> Self {
        Self {
            used_bytes: usage.used_bytes,
            total_budget_bytes: usage.total_budget_bytes,
            utilization: usage.utilization(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub saves: u64,
    pub rejected: u64,
    pub evictions: u64,
    pub quota_recoveries: u64,
    /// Current number of documents in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            saves: stats.saves,
            rejected: stats.rejected,
            evictions: stats.evictions,
            quota_recoveries: stats.quota_recoveries,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
