//! Paper Cache - A bounded local store for uploaded research papers
//!
//! Keeps the most recent uploads as base64 data URLs in a single persisted
//! collection, evicting the oldest first and recovering from storage quota
//! exhaustion by keeping only the newest upload.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use api::AppState;
pub use cache::{CacheConfig, DocumentCache};
pub use config::Config;
pub use error::CacheError;
