//! MP3 decode/encode.

mod decoder;
mod encoder;

pub use decoder::decode_mp3;
pub use encoder::encode_mp3;

use thiserror::Error;

/// MP3 codec error.
#[derive(Debug, Error)]
pub enum Mp3Error {
    /// The byte stream is not a recognizable MP3 container.
    #[error("mp3: unrecognized or corrupt stream: {0}")]
    Probe(#[source] symphonia::core::errors::Error),

    /// The container holds no decodable audio track.
    #[error("mp3: no audio track in stream")]
    NoTrack,

    /// Decoder construction or packet decoding failed.
    #[error("mp3: decode failed: {0}")]
    Decode(#[source] symphonia::core::errors::Error),

    /// The stream decoded to zero audio frames.
    #[error("mp3: stream contains no audio frames")]
    Empty,

    /// LAME refused the stream parameters.
    #[error("mp3: encoder setup failed: {0}")]
    EncoderSetup(String),

    /// Encoding failed mid-stream.
    #[error("mp3: encode failed: {0}")]
    Encode(String),

    /// MP3 carries at most two channels.
    #[error("mp3: unsupported channel layout ({0} channels)")]
    Channels(u16),
}
