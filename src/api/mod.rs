//! API Module
//!
//! HTTP handlers and routing that put the document cache behind an upload
//! API for the browser front-end.
//!
//! # Endpoints
//! - `PUT /documents/:name` - Upload a document
//! - `GET /documents` - List stored documents
//! - `DELETE /documents` - Clear the cache
//! - `GET /documents/:id` - Fetch a stored record
//! - `GET /documents/:id/raw` - Fetch the decoded file
//! - `GET /usage` - Storage usage
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
