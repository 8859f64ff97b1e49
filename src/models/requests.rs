//! Request models for the upload API
//!
//! Uploads arrive as a raw body with the filename in the path, so the only
//! request type is assembled by the handler rather than deserialized.

use axum::body::Bytes;

/// Longest filename accepted, in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// A document upload (PUT /documents/:name)
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Display filename
    pub name: String,
    /// Raw file contents
    pub content: Bytes,
}

impl UploadRequest {
    pub fn new(name: impl Into<String>, content: Bytes) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    /// Size limits are left to the cache.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("File name cannot be empty".to_string());
        }
        if self.name.chars().count() > MAX_NAME_LENGTH {
            return Some(format!(
                "File name exceeds maximum length of {} characters",
                MAX_NAME_LENGTH
            ));
        }
        None
    }
}
