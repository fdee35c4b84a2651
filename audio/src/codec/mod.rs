//! Audio codec support.
//!
//! Only MP3 is needed by the service: symphonia for decoding, LAME for
//! encoding.

pub mod mp3;
