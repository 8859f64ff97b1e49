//! Payload encoding.
//!
//! Document bytes are stored as `data:<mime>;base64,<standard base64>`.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{CacheError, Result};

pub const PDF_MIME: &str = "application/pdf";
pub const BINARY_MIME: &str = "application/octet-stream";

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// Decoded data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// MIME type implied by a filename.
pub fn mime_for_name(name: &str) -> &'static str {
    if name.to_ascii_lowercase().ends_with(".pdf") {
        PDF_MIME
    } else {
        BINARY_MIME
    }
}

pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("{}{}{},{}", DATA_PREFIX, mime, BASE64_MARKER, STANDARD.encode(bytes))
}

pub fn decode_data_url(data_url: &str) -> Result<DecodedPayload> {
    let (header, body) = data_url
        .strip_prefix(DATA_PREFIX)
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(|| CacheError::CorruptPayload("missing data URL header".to_string()))?;

    let mime = header
        .strip_suffix(BASE64_MARKER)
        .ok_or_else(|| CacheError::CorruptPayload("payload is not base64".to_string()))?;

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| CacheError::CorruptPayload(e.to_string()))?;

    Ok(DecodedPayload {
        mime: if mime.is_empty() { BINARY_MIME } else { mime }.to_string(),
        bytes,
    })
}
