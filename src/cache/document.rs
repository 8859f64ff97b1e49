//! Stored Document Module
//!
//! Defines the persisted document record and its payload-free listing view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::payload::{self, DecodedPayload};
use crate::error::Result;

// == Stored Document ==
/// A single cached document as it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Unique id assigned at save time
    pub id: String,
    /// Original filename, display only
    pub name: String,
    /// Data URL carrying the base64-encoded content
    pub data: String,
    /// Insertion time
    #[serde(rename = "uploadDate")]
    pub uploaded_at: DateTime<Utc>,
    /// Length of the original content in bytes
    pub size: usize,
}

impl StoredDocument {
    // == Constructor ==
    /// Encodes `content` and builds a record stamped with the current time.
    pub fn new(id: String, name: &str, content: &[u8]) -> Self {
        Self {
            id,
            name: name.to_string(),
            data: payload::encode_data_url(content, payload::mime_for_name(name)),
            uploaded_at: Utc::now(),
            size: content.len(),
        }
    }

    /// Decodes the payload back to the original bytes and their MIME type.
    pub fn decode(&self) -> Result<DecodedPayload> {
        payload::decode_data_url(&self.data)
    }

    /// Listing view without the payload.
    pub fn meta(&self) -> DocumentMeta {
        DocumentMeta {
            id: self.id.clone(),
            name: self.name.clone(),
            uploaded_at: self.uploaded_at,
            size: self.size,
        }
    }
}

// == Document Meta ==
/// Metadata for a stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub id: String,
    pub name: String,
    #[serde(rename = "uploadDate")]
    pub uploaded_at: DateTime<Utc>,
    pub size: usize,
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
