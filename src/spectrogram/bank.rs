use ndarray::Array2;

use crate::core::config::AdaptiveConfig;
use crate::core::error::SpectrogramError;

/// Magnitudes at one window width, indexed `[[time_frame, bin]]`.
///
/// The resolution of a grid is its bin count (half its window width).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionGrid {
    resolution: usize,
    data: Array2<f64>,
}

impl ResolutionGrid {
    /// Zero-filled grid of `frames` time frames by `resolution` bins.
    pub fn new(resolution: usize, frames: usize) -> Self {
        Self {
            resolution,
            data: Array2::zeros((frames, resolution)),
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Window width the grid was analysed with.
    pub fn width(&self) -> usize {
        self.resolution * 2
    }

    pub fn frames(&self) -> usize {
        self.data.nrows()
    }

    pub fn bins(&self) -> usize {
        self.data.ncols()
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[[x, y]]
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array2<f64> {
        &mut self.data
    }
}

/// One grid per power-of-two resolution from `min_resolution` to `max_resolution`.
///
/// Level 0 is the finest time resolution (shortest window); each following
/// level doubles the bin count and halves the frame count, so every grid
/// covers the same `max_resolution / min_resolution` by `max_resolution` area
/// of the output.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrogramBank {
    min_resolution: usize,
    max_resolution: usize,
    grids: Vec<ResolutionGrid>,
}

impl SpectrogramBank {
    /// Allocates zeroed grids for every resolution in `min_resolution..=max_resolution`.
    ///
    /// # Errors
    /// `InvalidParameter` unless both bounds are powers of two with `min <= max`.
    pub fn new(min_resolution: usize, max_resolution: usize) -> Result<Self, SpectrogramError> {
        if !min_resolution.is_power_of_two()
            || !max_resolution.is_power_of_two()
            || min_resolution > max_resolution
        {
            return Err(SpectrogramError::InvalidParameter(format!(
                "Resolutions must be powers of two with min <= max, got {}..={}",
                min_resolution, max_resolution
            )));
        }
        let count = (max_resolution / min_resolution).trailing_zeros() as usize + 1;
        let grids = (0..count)
            .map(|level| {
                let resolution = min_resolution << level;
                ResolutionGrid::new(resolution, max_resolution / resolution)
            })
            .collect();
        Ok(Self {
            min_resolution,
            max_resolution,
            grids,
        })
    }

    /// Bank shaped for one block of `config`.
    pub fn for_config(config: &AdaptiveConfig) -> Result<Self, SpectrogramError> {
        Self::new(config.min_resolution(), config.max_resolution())
    }

    pub fn min_resolution(&self) -> usize {
        self.min_resolution
    }

    pub fn max_resolution(&self) -> usize {
        self.max_resolution
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn grids(&self) -> &[ResolutionGrid] {
        &self.grids
    }

    pub fn grids_mut(&mut self) -> &mut [ResolutionGrid] {
        &mut self.grids
    }

    pub fn grid(&self, level: usize) -> &ResolutionGrid {
        &self.grids[level]
    }

    pub fn grid_mut(&mut self, level: usize) -> &mut ResolutionGrid {
        &mut self.grids[level]
    }

    /// Number of halvings from `resolution` down to the minimum resolution.
    pub fn level_of(&self, resolution: usize) -> usize {
        let mut level = 0;
        let mut r = resolution;
        while r > self.min_resolution {
            r /= 2;
            level += 1;
        }
        level
    }

    /// Grid holding `resolution`.
    pub fn grid_for(&self, resolution: usize) -> &ResolutionGrid {
        &self.grids[self.level_of(resolution)]
    }
}
