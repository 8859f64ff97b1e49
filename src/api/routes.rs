//! API Routes
//!
//! Configures the Axum router with all upload endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, get_handler, health_handler, list_handler, raw_handler, stats_handler,
    upload_handler, usage_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /documents/:name` - Upload a document (raw body)
/// - `GET /documents` - List stored documents
/// - `DELETE /documents` - Clear the cache
/// - `GET /documents/:id` - Fetch a stored record
/// - `GET /documents/:id/raw` - Fetch the decoded file
/// - `GET /usage` - Storage usage against the budget
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Body limit: one byte over the per-file limit, so an oversized upload
///   reaches the cache and gets its structured error
/// - CORS: Allows any origin, for the browser front-end
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState, max_file_size: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/documents", get(list_handler).delete(clear_handler))
        .route("/documents/:id", put(upload_handler).get(get_handler))
        .route("/documents/:id/raw", get(raw_handler))
        .route("/usage", get(usage_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(max_file_size.saturating_add(1)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
