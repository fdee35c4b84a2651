//! Audio handling for the voice-detection service.
//!
//! This crate covers the audio path between the HTTP boundary and the
//! detector:
//!
//! - `payload`: base64 request payload decoding (with data-URI prefix support)
//! - `codec`: MP3 decode/encode built on symphonia and LAME
//! - `pcm`: decoded PCM clip carrier
//! - `trim`: duration capping with MP3 re-encode normalization
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use voxcheck_audio::{payload::decode_audio, trim::trim_audio};
//!
//! let bytes = decode_audio("data:audio/mp3;base64,SUQz...")?;
//! let capped = trim_audio(&bytes, Duration::from_secs(30))?;
//! ```

pub mod codec;
pub mod payload;
pub mod pcm;
pub mod trim;

pub use payload::{decode_audio, DecodeError};
pub use pcm::PcmClip;
pub use trim::{trim_audio, TrimError, DEFAULT_MAX_DURATION};
