//! RMS-threshold silence detection.

/// Counts samples covered by non-silent intervals.
///
/// Frames whose RMS exceeds the clip's peak frame RMS scaled down by
/// `top_db` are non-silent; each marks its full window of samples as
/// covered, and overlapping windows merge naturally.
pub(crate) fn non_silent_samples(
    signal: &[f32],
    frame_len: usize,
    hop: usize,
    top_db: f64,
) -> usize {
    if signal.is_empty() {
        return 0;
    }

    let mut frame_rms = Vec::new();
    let mut start = 0;
    while start < signal.len() {
        let end = (start + frame_len).min(signal.len());
        let frame = &signal[start..end];
        let energy: f64 = frame.iter().map(|&x| x as f64 * x as f64).sum();
        frame_rms.push((energy / frame.len() as f64).sqrt());
        start += hop;
    }

    let max_rms = frame_rms.iter().cloned().fold(0.0f64, f64::max);
    if max_rms <= 0.0 {
        return 0;
    }
    let threshold = max_rms * 10f64.powf(-top_db / 20.0);

    let mut covered = vec![false; signal.len()];
    for (i, &rms) in frame_rms.iter().enumerate() {
        if rms > threshold {
            let s = i * hop;
            let e = (s + frame_len).min(signal.len());
            for flag in &mut covered[s..e] {
                *flag = true;
            }
        }
    }
    covered.iter().filter(|&&flag| flag).count()
}
