//! MP3 encoding via LAME.

use mp3lame_encoder::{Bitrate, Builder, FlushNoGap, InterleavedPcm, MonoPcm, Quality};

use super::Mp3Error;
use crate::pcm::PcmClip;

/// Encodes a [`PcmClip`] to MP3 (CBR 128 kbps).
///
/// MP3 supports one or two channels; anything else is rejected.
pub fn encode_mp3(clip: &PcmClip) -> Result<Vec<u8>, Mp3Error> {
    if clip.channels == 0 || clip.channels > 2 {
        return Err(Mp3Error::Channels(clip.channels));
    }

    let mut builder =
        Builder::new().ok_or_else(|| Mp3Error::EncoderSetup("lame init failed".to_string()))?;
    builder
        .set_num_channels(clip.channels as u8)
        .map_err(|e| Mp3Error::EncoderSetup(e.to_string()))?;
    builder
        .set_sample_rate(clip.sample_rate)
        .map_err(|e| Mp3Error::EncoderSetup(e.to_string()))?;
    builder
        .set_brate(Bitrate::Kbps128)
        .map_err(|e| Mp3Error::EncoderSetup(e.to_string()))?;
    builder
        .set_quality(Quality::Good)
        .map_err(|e| Mp3Error::EncoderSetup(e.to_string()))?;

    let mut encoder = builder
        .build()
        .map_err(|e| Mp3Error::EncoderSetup(e.to_string()))?;

    let mut out = Vec::new();
    match clip.channels {
        1 => encoder
            .encode_to_vec(MonoPcm(&clip.samples), &mut out)
            .map_err(|e| Mp3Error::Encode(e.to_string()))?,
        _ => encoder
            .encode_to_vec(InterleavedPcm(&clip.samples), &mut out)
            .map_err(|e| Mp3Error::Encode(e.to_string()))?,
    };
    encoder
        .flush_to_vec::<FlushNoGap>(&mut out)
        .map_err(|e| Mp3Error::Encode(e.to_string()))?;

    Ok(out)
}
