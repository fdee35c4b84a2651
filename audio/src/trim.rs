//! Duration capping for MP3 clips.

use std::time::Duration;

use thiserror::Error;

use crate::codec::mp3::{decode_mp3, encode_mp3, Mp3Error};

/// Default clip duration cap applied by the service.
pub const DEFAULT_MAX_DURATION: Duration = Duration::from_secs(30);

/// Error trimming an audio clip.
#[derive(Debug, Error)]
pub enum TrimError {
    /// The input could not be decoded or re-encoded as MP3.
    #[error("error trimming audio: {0}")]
    Codec(#[from] Mp3Error),
}

/// Caps an MP3 clip to at most `max` duration.
///
/// The clip is decoded, truncated from the start when it exceeds the cap (no
/// fade, no resampling), and re-encoded to MP3 in every case. Downstream
/// consumers therefore always see a LAME-normalized stream, whether or not
/// the input was already within the cap.
pub fn trim_audio(bytes: &[u8], max: Duration) -> Result<Vec<u8>, TrimError> {
    let mut clip = decode_mp3(bytes)?;
    clip.truncate_to(max);
    Ok(encode_mp3(&clip)?)
}
