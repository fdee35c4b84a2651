//! Spectral centroid and flatness.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Guard against log(0) in the flatness geometric mean.
const AMIN: f64 = 1e-10;

/// Computes Hann-windowed magnitude spectra for fixed-length frames.
pub(crate) struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    frame_len: usize,
}

impl SpectrumAnalyzer {
    pub(crate) fn new(frame_len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let window = (0..frame_len)
            .map(|i| {
                let x = i as f64 / frame_len as f64;
                (0.5 - 0.5 * (2.0 * std::f64::consts::PI * x).cos()) as f32
            })
            .collect();
        Self {
            fft: planner.plan_fft_forward(frame_len),
            window,
            frame_len,
        }
    }

    /// Magnitude spectrum DC..Nyquist. Short frames are zero-padded.
    pub(crate) fn magnitudes(&self, frame: &[f32]) -> Vec<f32> {
        let mut buf: Vec<Complex<f32>> = vec![Complex::new(0.0, 0.0); self.frame_len];
        for (i, &sample) in frame.iter().take(self.frame_len).enumerate() {
            buf[i].re = sample * self.window[i];
        }
        self.fft.process(&mut buf);
        buf[..self.frame_len / 2 + 1]
            .iter()
            .map(|c| c.norm())
            .collect()
    }
}

/// Magnitude-weighted mean frequency; `None` for an all-zero spectrum.
pub(crate) fn centroid(mags: &[f32], sample_rate: f64, n_fft: usize) -> Option<f64> {
    let total: f64 = mags.iter().map(|&m| m as f64).sum();
    if total <= AMIN {
        return None;
    }
    let bin_hz = sample_rate / n_fft as f64;
    let weighted: f64 = mags
        .iter()
        .enumerate()
        .map(|(k, &m)| k as f64 * bin_hz * m as f64)
        .sum();
    Some(weighted / total)
}

/// Geometric over arithmetic mean of the power spectrum.
///
/// 1.0 for a perfectly flat (noise-like) spectrum, approaching 0 for a pure
/// tone. Silence degenerates to 1.0 through the `AMIN` floor.
pub(crate) fn flatness(mags: &[f32]) -> f64 {
    if mags.is_empty() {
        return 0.0;
    }
    let n = mags.len() as f64;
    let mut log_sum = 0.0f64;
    let mut sum = 0.0f64;
    for &m in mags {
        let power = (m as f64 * m as f64).max(AMIN);
        log_sum += power.ln();
        sum += power;
    }
    (log_sum / n).exp() / (sum / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency: f64, sample_rate: f64, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let t = i as f64 / sample_rate;
                (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
            })
            .collect()
    }

    #[test]
    fn test_centroid_tracks_tone_frequency() {
        let analyzer = SpectrumAnalyzer::new(2048);
        let mags = analyzer.magnitudes(&sine(1000.0, 44100.0, 2048));
        let c = centroid(&mags, 44100.0, 2048).unwrap();
        // Hann leakage keeps the centroid near, not exactly at, the tone.
        assert!((c - 1000.0).abs() < 200.0, "centroid {}", c);
    }

    #[test]
    fn test_centroid_of_silence_is_none() {
        let analyzer = SpectrumAnalyzer::new(2048);
        let mags = analyzer.magnitudes(&vec![0.0f32; 2048]);
        assert_eq!(centroid(&mags, 44100.0, 2048), None);
    }

    #[test]
    fn test_flatness_tone_vs_flat_spectrum() {
        let analyzer = SpectrumAnalyzer::new(2048);
        let tone_mags = analyzer.magnitudes(&sine(440.0, 44100.0, 2048));
        assert!(flatness(&tone_mags) < 0.05);

        let flat_mags = vec![1.0f32; 1025];
        assert!((flatness(&flat_mags) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_flatness_of_silence_is_one() {
        let analyzer = SpectrumAnalyzer::new(2048);
        let mags = analyzer.magnitudes(&vec![0.0f32; 2048]);
        assert!((flatness(&mags) - 1.0).abs() < 1e-9);
    }
}
