//! MP3 decoding via symphonia.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::Mp3Error;
use crate::pcm::PcmClip;

/// Decodes an MP3 byte stream into an interleaved i16 [`PcmClip`].
///
/// Corrupt packets inside an otherwise valid stream are skipped, matching
/// typical player behavior; a stream that yields no audio at all is an error.
pub fn decode_mp3(bytes: &[u8]) -> Result<PcmClip, Mp3Error> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());

    let mut hint = Hint::new();
    hint.with_extension("mp3");

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(Mp3Error::Probe)?;
    let mut format = probed.format;

    let track = format.default_track().ok_or(Mp3Error::NoTrack)?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(Mp3Error::Decode)?;

    let mut samples: Vec<i16> = Vec::new();
    let mut sample_rate = 0u32;
    let mut channels = 0u16;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream surfaces as an unexpected EOF from the reader.
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(Mp3Error::Decode(e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = spec.rate;
                channels = spec.channels.count() as u16;

                let mut buf = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
                buf.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buf.samples());
            }
            // Skip a corrupt frame, keep going.
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(Mp3Error::Decode(e)),
        }
    }

    if samples.is_empty() || sample_rate == 0 {
        return Err(Mp3Error::Empty);
    }

    Ok(PcmClip::new(samples, sample_rate, channels))
}
