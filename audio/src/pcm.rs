//! Decoded PCM clip carrier.

use std::time::Duration;

/// A decoded audio clip: interleaved i16 samples plus stream parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmClip {
    /// Interleaved samples (frame = one sample per channel).
    pub samples: Vec<i16>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count (1 or 2 for MP3).
    pub channels: u16,
}

impl PcmClip {
    /// Creates a clip from interleaved samples.
    pub fn new(samples: Vec<i16>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Playback duration of the clip.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Truncates the clip to at most `max` from the start.
    ///
    /// Cuts on a frame boundary; clips already within the cap are unchanged.
    pub fn truncate_to(&mut self, max: Duration) {
        let max_frames = (max.as_secs_f64() * self.sample_rate as f64) as usize;
        let max_samples = max_frames * self.channels as usize;
        if self.samples.len() > max_samples {
            self.samples.truncate(max_samples);
        }
    }

    /// Downmixes to a mono f32 signal in [-1.0, 1.0].
    ///
    /// Multi-channel frames are averaged. Used by feature extraction, which
    /// operates on a single channel at the clip's native rate.
    pub fn to_mono_f32(&self) -> Vec<f32> {
        let channels = self.channels.max(1) as usize;
        self.samples
            .chunks_exact(channels)
            .map(|frame| {
                let sum: f32 = frame.iter().map(|&s| s as f32).sum();
                sum / channels as f32 / i16::MAX as f32
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_and_duration() {
        let clip = PcmClip::new(vec![0i16; 44100 * 2], 44100, 2);
        assert_eq!(clip.frames(), 44100);
        assert_eq!(clip.duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_truncate_to_cap() {
        let mut clip = PcmClip::new(vec![0i16; 44100 * 2 * 3], 44100, 2);
        clip.truncate_to(Duration::from_secs(2));
        assert_eq!(clip.frames(), 44100 * 2);
        assert_eq!(clip.duration(), Duration::from_secs(2));
    }

    #[test]
    fn test_truncate_shorter_clip_unchanged() {
        let mut clip = PcmClip::new(vec![0i16; 8000], 8000, 1);
        clip.truncate_to(Duration::from_secs(30));
        assert_eq!(clip.frames(), 8000);
    }

    #[test]
    fn test_mono_downmix_averages_channels() {
        let clip = PcmClip::new(vec![i16::MAX, 0, 0, 0], 44100, 2);
        let mono = clip.to_mono_f32();
        assert_eq!(mono.len(), 2);
        assert!((mono[0] - 0.5).abs() < 1e-3);
        assert_eq!(mono[1], 0.0);
    }

    #[test]
    fn test_zero_rate_duration() {
        let clip = PcmClip::new(vec![0i16; 100], 0, 1);
        assert_eq!(clip.duration(), Duration::ZERO);
    }
}
