use std::f64::consts::PI;

/// Periodic Hann window of length `n`: `0.5 - 0.5 * cos(2πi / n)`.
///
/// The periodic form divides by `n` rather than `n - 1`, so consecutive
/// half-overlapping windows sum to a constant.
///
/// # Examples
/// ```
/// use adaptive_spectrogram::signal_processing::window::hann;
/// let w = hann(4);
/// assert_eq!(w.len(), 4);
/// assert_eq!(w[0], 0.0);
/// assert!((w[2] - 1.0).abs() < 1e-12);
/// ```
pub fn hann(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / n as f64).cos())
        .collect()
}
