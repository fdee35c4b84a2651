//! Acoustic descriptor extraction.
//!
//! Computes the six scalar descriptors the feature-based detector sends to
//! its LLM backend instead of raw audio: pitch statistics, zero-crossing
//! rate, spectral centroid, spectral flatness, and silence ratio. All values
//! are derived from the clip's native sample rate over 2048-sample frames
//! with a 512-sample hop, mono-downmixed.
//!
//! The descriptors are stock computations; nothing here attempts forensics
//! on its own. Interpretation is entirely the LLM's job.

mod pitch;
mod silence;
mod spectral;

use thiserror::Error;

use voxcheck_audio::codec::mp3::{decode_mp3, Mp3Error};

/// Analysis frame length in samples.
pub(crate) const FRAME_LEN: usize = 2048;
/// Hop between successive frames in samples.
pub(crate) const HOP_LEN: usize = 512;

/// Pitch search band: musical notes C2..C7.
const PITCH_MIN_HZ: f64 = 65.41;
const PITCH_MAX_HZ: f64 = 2093.0;

/// Frames quieter than the clip peak by this many dB count as silence.
const SILENCE_TOP_DB: f64 = 60.0;

/// Scalar acoustic descriptors for one clip.
///
/// Hz-scale values and the duration are rounded to 2 decimal places,
/// ratio-scale values to 4.
#[derive(Debug, Clone, PartialEq)]
pub struct AcousticFeatures {
    /// Clip duration in seconds.
    pub duration_secs: f64,
    /// Mean fundamental frequency over voiced frames, 0.0 if none.
    pub pitch_mean_hz: f64,
    /// Standard deviation of the fundamental frequency, 0.0 if no voiced frames.
    pub pitch_variation_hz: f64,
    /// Mean per-frame zero-crossing rate.
    pub zero_crossing_rate: f64,
    /// Mean per-frame magnitude-weighted frequency.
    pub spectral_centroid_hz: f64,
    /// Mean per-frame geometric/arithmetic power-spectrum ratio.
    pub spectral_flatness: f64,
    /// 1 minus the fraction of samples covered by non-silent intervals.
    pub silence_ratio: f64,
}

/// Error extracting acoustic features.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// The clip could not be decoded.
    #[error("feature extraction: {0}")]
    Decode(#[from] Mp3Error),

    /// The clip decoded to nothing analyzable.
    #[error("feature extraction: clip too short for analysis")]
    TooShort,
}

/// Extracts [`AcousticFeatures`] from MP3 bytes.
///
/// The caller decides what a failure means; the feature-based detector maps
/// any error here to its fallback classification without calling the LLM.
pub fn extract_features(bytes: &[u8]) -> Result<AcousticFeatures, FeatureError> {
    let clip = decode_mp3(bytes)?;
    let signal = clip.to_mono_f32();
    if signal.is_empty() {
        return Err(FeatureError::TooShort);
    }
    let sample_rate = clip.sample_rate as f64;

    let duration_secs = signal.len() as f64 / sample_rate;

    let pitch_tracker =
        pitch::PitchTracker::new(FRAME_LEN, sample_rate, PITCH_MIN_HZ, PITCH_MAX_HZ);
    let analyzer = spectral::SpectrumAnalyzer::new(FRAME_LEN);

    let mut pitches = Vec::new();
    let mut zcr_sum = 0.0f64;
    let mut centroid_sum = 0.0f64;
    let mut centroid_frames = 0usize;
    let mut flatness_sum = 0.0f64;
    let mut frame_count = 0usize;

    let mut start = 0;
    while start < signal.len() {
        let end = (start + FRAME_LEN).min(signal.len());
        let frame = &signal[start..end];
        frame_count += 1;

        if let Some(f0) = pitch_tracker.estimate(frame) {
            pitches.push(f0);
        }

        zcr_sum += zero_crossing_rate(frame);

        let mags = analyzer.magnitudes(frame);
        if let Some(c) = spectral::centroid(&mags, sample_rate, FRAME_LEN) {
            centroid_sum += c;
            centroid_frames += 1;
        }
        flatness_sum += spectral::flatness(&mags);

        start += HOP_LEN;
    }

    let (pitch_mean_hz, pitch_variation_hz) = pitch_stats(&pitches);
    let zero_crossing_rate = zcr_sum / frame_count as f64;
    let spectral_centroid_hz = if centroid_frames > 0 {
        centroid_sum / centroid_frames as f64
    } else {
        0.0
    };
    let spectral_flatness = flatness_sum / frame_count as f64;

    let covered = silence::non_silent_samples(&signal, FRAME_LEN, HOP_LEN, SILENCE_TOP_DB);
    let silence_ratio = 1.0 - covered as f64 / signal.len() as f64;

    Ok(AcousticFeatures {
        duration_secs: round_to(duration_secs, 2),
        pitch_mean_hz: round_to(pitch_mean_hz, 2),
        pitch_variation_hz: round_to(pitch_variation_hz, 2),
        zero_crossing_rate: round_to(zero_crossing_rate, 4),
        spectral_centroid_hz: round_to(spectral_centroid_hz, 2),
        spectral_flatness: round_to(spectral_flatness, 4),
        silence_ratio: round_to(silence_ratio, 4),
    })
}

/// Mean and population standard deviation; (0, 0) when no voiced frames.
fn pitch_stats(pitches: &[f64]) -> (f64, f64) {
    if pitches.is_empty() {
        return (0.0, 0.0);
    }
    let n = pitches.len() as f64;
    let mean = pitches.iter().sum::<f64>() / n;
    let variance = pitches.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Sign changes per sample within one frame.
fn zero_crossing_rate(frame: &[f32]) -> f64 {
    if frame.len() < 2 {
        return 0.0;
    }
    let crossings = frame
        .windows(2)
        .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
        .count();
    crossings as f64 / (frame.len() - 1) as f64
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
