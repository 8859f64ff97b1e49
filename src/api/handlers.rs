//! API Handlers
//!
//! HTTP request handlers for each upload endpoint. Handlers only translate
//! between HTTP and [`DocumentCache`] calls.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::{CacheConfig, DocumentCache, StoredDocument};
use crate::config::{BackendKind, Config};
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, HealthResponse, ListResponse, SaveResponse, StatsResponse, UploadRequest,
    UsageResponse,
};
use crate::storage::{FileBackend, MemoryBackend, StorageBackend, StorageResult};

/// Application state shared across all handlers.
///
/// Contains the document cache wrapped in Arc<RwLock<>> for thread-safe access.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe document cache
    pub cache: Arc<RwLock<DocumentCache>>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: DocumentCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates an AppState over a fresh in-memory backend.
    pub fn in_memory(config: CacheConfig) -> Self {
        Self::new(DocumentCache::new(Box::new(MemoryBackend::new()), config))
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the configured storage backend and builds the cache over it.
    pub fn from_config(config: &Config) -> StorageResult<Self> {
        let backend: Box<dyn StorageBackend> = match config.storage_backend {
            BackendKind::File => Box::new(FileBackend::open(
                &config.storage_dir,
                config.storage_quota_bytes,
            )?),
            BackendKind::Memory => match config.storage_quota_bytes {
                Some(quota) => Box::new(MemoryBackend::with_quota(quota)),
                None => Box::new(MemoryBackend::new()),
            },
        };
        Ok(Self::new(DocumentCache::new(backend, config.cache_config())))
    }
}

/// Handler for PUT /documents/:name
///
/// Stores the raw request body as a new document.
pub async fn upload_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<SaveResponse>> {
    let req = UploadRequest::new(name, body);
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    let id = cache.save(&req.content, &req.name)?;

    Ok(Json(SaveResponse::new(id, req.name, req.content.len())))
}

/// Handler for GET /documents
pub async fn list_handler(State(state): State<AppState>) -> Json<ListResponse> {
    let cache = state.cache.read().await;
    Json(ListResponse::new(cache.list_all()))
}

/// Handler for GET /documents/:id
///
/// Returns the stored record, payload included.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredDocument>> {
    // Write lock: lookups update hit/miss counters
    let mut cache = state.cache.write().await;
    cache.get(&id).map(Json).ok_or(CacheError::NotFound(id))
}

/// Handler for GET /documents/:id/raw
///
/// Returns the decoded bytes with the MIME type recorded in the payload.
pub async fn raw_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let mut cache = state.cache.write().await;
    let doc = cache.get(&id).ok_or_else(|| CacheError::NotFound(id.clone()))?;
    let decoded = doc.decode()?;

    Ok(([(header::CONTENT_TYPE, decoded.mime)], decoded.bytes).into_response())
}

/// Handler for DELETE /documents
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    cache.clear();
    Json(ClearResponse::cleared())
}

/// Handler for GET /usage
pub async fn usage_handler(State(state): State<AppState>) -> Json<UsageResponse> {
    let cache = state.cache.read().await;
    Json(cache.usage().into())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(cache.stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
