//! Fundamental-frequency estimation.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Per-frame pitch estimator using FFT-accelerated autocorrelation.
///
/// The search band is fixed at construction; frames whose autocorrelation
/// peak falls outside the band or is too weak relative to the frame energy
/// report no pitch at all rather than a bad one.
pub(crate) struct PitchTracker {
    fft: Arc<dyn Fft<f32>>,
    ifft: Arc<dyn Fft<f32>>,
    fft_len: usize,
    lag_min: usize,
    lag_max: usize,
    sample_rate: f64,
}

/// Minimum normalized autocorrelation for a frame to count as voiced.
const CLARITY_THRESHOLD: f64 = 0.5;

impl PitchTracker {
    pub(crate) fn new(frame_len: usize, sample_rate: f64, min_hz: f64, max_hz: f64) -> Self {
        // Zero-pad to 2x so the circular autocorrelation is linear.
        let fft_len = (2 * frame_len).next_power_of_two();
        let mut planner = FftPlanner::new();
        Self {
            fft: planner.plan_fft_forward(fft_len),
            ifft: planner.plan_fft_inverse(fft_len),
            fft_len,
            lag_min: ((sample_rate / max_hz).floor().max(1.0)) as usize,
            lag_max: (sample_rate / min_hz).ceil() as usize,
            sample_rate,
        }
    }

    /// Estimates the fundamental frequency of one frame, if voiced.
    pub(crate) fn estimate(&self, frame: &[f32]) -> Option<f64> {
        let n = frame.len();
        let lag_max = self.lag_max.min(n.saturating_sub(1));
        if lag_max <= self.lag_min {
            return None;
        }

        let mut buf: Vec<Complex<f32>> = vec![Complex::new(0.0, 0.0); self.fft_len];
        for (slot, &sample) in buf.iter_mut().zip(frame.iter()) {
            slot.re = sample;
        }
        self.fft.process(&mut buf);
        for value in buf.iter_mut() {
            *value = Complex::new(value.norm_sqr(), 0.0);
        }
        self.ifft.process(&mut buf);

        // buf[lag].re is now the (unnormalized) autocorrelation at that lag.
        let r0 = buf[0].re as f64;
        if r0 <= 1e-10 {
            return None;
        }

        let mut best_lag = 0usize;
        let mut best = f64::MIN;
        for lag in self.lag_min..=lag_max {
            let r = buf[lag].re as f64;
            if r > best {
                best = r;
                best_lag = lag;
            }
        }

        if best_lag == 0 || best / r0 < CLARITY_THRESHOLD {
            return None;
        }
        Some(self.sample_rate / best_lag as f64)
    }
}
