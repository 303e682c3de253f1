use std::fmt;
use std::sync::Arc;

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::core::error::SpectrogramError;
use crate::signal_processing::window::hann;
use crate::spectrogram::bank::ResolutionGrid;

/// Short-time magnitude analysis at one fixed window width.
///
/// The FFT plan and window are built once and reused for every block, so a
/// processor keeps one analyzer per width for its whole lifetime.
///
/// For a block of `max_width` samples the analyzer produces `max_width / width`
/// half-overlapping frames, centred in the block. Frame `i` starts at
/// `max_width/4 - width/4 + i*width/2`. Bin `j` of a frame holds the magnitude of
/// spectral index `j + 1` (DC dropped, Nyquist kept) divided by `width / 2`.
#[derive(Clone)]
pub struct FrameAnalyzer {
    width: usize,
    fft: Arc<dyn Fft<f64>>,
    window: Vec<f64>,
}

impl fmt::Debug for FrameAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameAnalyzer").field("width", &self.width).finish()
    }
}

impl FrameAnalyzer {
    /// Plans a forward FFT and Hann window for `width` samples.
    ///
    /// # Errors
    /// `InvalidParameter` if `width` is not a power of two of at least 2.
    pub fn new(width: usize) -> Result<Self, SpectrogramError> {
        if width < 2 || !width.is_power_of_two() {
            return Err(SpectrogramError::InvalidParameter(format!(
                "Window width must be a power of two >= 2, got {}",
                width
            )));
        }
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(width);
        Ok(Self {
            width,
            fft,
            window: hann(width),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Bin count of the grid this analyzer fills.
    pub fn resolution(&self) -> usize {
        self.width / 2
    }

    /// Number of frames produced from a block of `max_width` samples.
    pub fn frame_count(&self, max_width: usize) -> usize {
        max_width / self.width
    }

    /// Sample offset of frame `frame` within a block of `max_width` samples.
    pub fn frame_origin(&self, max_width: usize, frame: usize) -> usize {
        max_width / 4 - self.width / 4 + frame * self.width / 2
    }

    /// Computes the magnitude spectra of `block` into `grid`.
    ///
    /// # Parameters
    /// - `block`: one channel, exactly `max_width` samples, where `max_width` is a
    ///   power-of-two multiple of `width`.
    /// - `grid`: destination grid of shape `(block.len() / width, width / 2)`.
    ///
    /// # Errors
    /// `InvalidInput` if the block length or grid shape does not fit this width.
    pub fn analyze(&self, block: &[f32], grid: &mut ResolutionGrid) -> Result<(), SpectrogramError> {
        let max_width = block.len();
        if max_width < self.width || max_width % self.width != 0 || !max_width.is_power_of_two() {
            return Err(SpectrogramError::InvalidInput(format!(
                "Block of {} samples cannot be analysed at width {}",
                max_width, self.width
            )));
        }
        let frames = self.frame_count(max_width);
        if grid.frames() != frames || grid.bins() != self.resolution() {
            return Err(SpectrogramError::InvalidInput(format!(
                "Grid shape {}x{} does not match {} frames of {} bins",
                grid.frames(),
                grid.bins(),
                frames,
                self.resolution()
            )));
        }

        let scale = (self.width / 2) as f64;
        let mut buffer = vec![Complex::new(0.0, 0.0); self.width];
        let data = grid.data_mut();

        for i in 0..frames {
            let origin = self.frame_origin(max_width, i);
            let segment = &block[origin..origin + self.width];
            for (slot, (&sample, &w)) in buffer.iter_mut().zip(segment.iter().zip(self.window.iter())) {
                *slot = Complex::new(sample as f64 * w, 0.0);
            }
            self.fft.process(&mut buffer);
            for j in 0..self.resolution() {
                data[[i, j]] = buffer[j + 1].norm() / scale;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_rejects_bad_width() {
        assert!(matches!(FrameAnalyzer::new(0), Err(SpectrogramError::InvalidParameter(_))));
        assert!(matches!(FrameAnalyzer::new(12), Err(SpectrogramError::InvalidParameter(_))));
        assert!(FrameAnalyzer::new(16).is_ok());
    }

    #[test]
    fn test_frame_origins_are_centred() {
        let analyzer = FrameAnalyzer::new(16).unwrap();
        assert_eq!(analyzer.frame_count(64), 4);
        assert_eq!(analyzer.frame_origin(64, 0), 12);
        assert_eq!(analyzer.frame_origin(64, 3), 36);
        // last frame ends inside the block
        assert!(analyzer.frame_origin(64, 3) + 16 <= 64);

        let full = FrameAnalyzer::new(64).unwrap();
        assert_eq!(full.frame_origin(64, 0), 0);
    }

    #[test]
    fn test_sinusoid_peaks_at_its_bin() {
        let width = 64;
        let analyzer = FrameAnalyzer::new(width).unwrap();
        // 8 cycles per window lands on spectral index 8, stored at bin 7
        let block: Vec<f32> = (0..width)
            .map(|n| (2.0 * PI * 8.0 * n as f64 / width as f64).cos() as f32)
            .collect();
        let mut grid = ResolutionGrid::new(width / 2, 1);
        analyzer.analyze(&block, &mut grid).unwrap();

        let row = grid.data().row(0).to_vec();
        let peak = row
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |best, (j, &m)| if m > best.1 { (j, m) } else { best });
        assert_eq!(peak.0, 7);
        // Hann-windowed unit cosine: |X[k]| = w/4, scaled by 2/w
        assert_abs_diff_eq!(peak.1, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_silence_gives_zero_grid() {
        let analyzer = FrameAnalyzer::new(16).unwrap();
        let block = vec![0.0f32; 64];
        let mut grid = ResolutionGrid::new(8, 4);
        analyzer.analyze(&block, &mut grid).unwrap();
        assert!(grid.data().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_rejects_mismatched_grid() {
        let analyzer = FrameAnalyzer::new(16).unwrap();
        let block = vec![0.0f32; 64];
        let mut grid = ResolutionGrid::new(8, 2);
        assert!(matches!(
            analyzer.analyze(&block, &mut grid),
            Err(SpectrogramError::InvalidInput(_))
        ));
        let mut grid = ResolutionGrid::new(8, 4);
        assert!(matches!(
            analyzer.analyze(&block[..48], &mut grid),
            Err(SpectrogramError::InvalidInput(_))
        ));
    }
}
