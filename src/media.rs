//! Embedded image handling
//!
//! Photos and logos are stored inline as base64 data URLs, so every
//! upload is size-checked before it reaches a collection body.

use crate::error::{AppError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode image bytes as a data URL, enforcing a size limit on the raw
/// bytes.
pub fn encode_data_url(data: &[u8], mime_type: &str, max_bytes: usize) -> Result<String> {
    if data.len() > max_bytes {
        return Err(AppError::ImageTooLarge {
            max: max_bytes,
            actual: data.len(),
        });
    }

    Ok(format!("data:{};base64,{}", mime_type, STANDARD.encode(data)))
}

/// Split a data URL back into its MIME type and raw bytes.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| AppError::InvalidInput("Not a data URL".to_string()))?;

    let (mime_type, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::InvalidInput("Not a base64 data URL".to_string()))?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| AppError::InvalidInput(format!("Invalid base64 payload: {}", e)))?;

    Ok((mime_type.to_string(), bytes))
}
