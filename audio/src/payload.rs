//! Base64 audio payload decoding.

use base64::Engine;
use thiserror::Error;

/// Error decoding a base64 audio payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid base64.
    #[error("invalid base64 audio data: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Decodes a base64 audio payload into raw bytes.
///
/// Clients may send either a bare base64 string or a full data URI
/// (`data:audio/mp3;base64,...`). If the input contains `"base64,"`,
/// everything up to and including its first occurrence is stripped before
/// decoding.
pub fn decode_audio(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let encoded = match payload.find("base64,") {
        Some(pos) => &payload[pos + "base64,".len()..],
        None => payload,
    };
    Ok(base64::engine::general_purpose::STANDARD.decode(encoded)?)
}
