use crate::core::error::SpectrogramError;

/// Accepted range for `min_exponent`.
pub const MIN_EXPONENT_RANGE: (u32, u32) = (1, 14);

/// Accepted range for `resolution_count`.
pub const RESOLUTION_COUNT_RANGE: (u32, u32) = (1, 10);

/// Immutable, validated parameters of one adaptive spectrogram analysis.
///
/// Two integers determine every size used by the analysis:
/// - `min_exponent` selects the smallest window width, `min_width = 2 << min_exponent`.
/// - `resolution_count` is the number of consecutive power-of-two widths, so
///   `max_width = min_width << (resolution_count - 1)`.
///
/// The resolution of a width `w` is its bin count `w / 2`.
///
/// # Examples
/// ```
/// use adaptive_spectrogram::AdaptiveConfig;
/// let config = AdaptiveConfig::new(8, 2).unwrap();
/// assert_eq!(config.min_width(), 512);
/// assert_eq!(config.max_width(), 1024);
/// assert_eq!(config.output_rows(), 2);
/// assert_eq!(config.output_bins(), 512);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveConfig {
    min_exponent: u32,
    resolution_count: u32,
    threaded: bool,
    refine_finest: bool,
}

impl AdaptiveConfig {
    /// Builds a configuration, rejecting out-of-range parameters.
    ///
    /// # Parameters
    /// - `min_exponent`: 1..=14, selects `min_width = 2 << min_exponent`.
    /// - `resolution_count`: 1..=10, number of resolutions analysed.
    ///
    /// # Returns
    /// - `Ok(AdaptiveConfig)`: threaded configuration with the given shape.
    /// - `Err(SpectrogramError::InvalidParameter)`: parameter out of range.
    pub fn new(min_exponent: u32, resolution_count: u32) -> Result<Self, SpectrogramError> {
        let (lo, hi) = MIN_EXPONENT_RANGE;
        if !(lo..=hi).contains(&min_exponent) {
            return Err(SpectrogramError::InvalidParameter(format!(
                "min_exponent must be in {}..={}, got {}",
                lo, hi, min_exponent
            )));
        }
        let (lo, hi) = RESOLUTION_COUNT_RANGE;
        if !(lo..=hi).contains(&resolution_count) {
            return Err(SpectrogramError::InvalidParameter(format!(
                "resolution_count must be in {}..={}, got {}",
                lo, hi, resolution_count
            )));
        }
        Ok(Self {
            min_exponent,
            resolution_count,
            threaded: true,
            refine_finest: false,
        })
    }

    /// Returns a copy with multi-threaded processing switched on or off.
    pub fn with_threaded(self, threaded: bool) -> Self {
        Self { threaded, ..self }
    }

    /// Returns a copy that, at the finest resolution, keeps halving regions
    /// vertically until every leaf is a single grid cell.
    ///
    /// Off by default: a region that reaches the finest resolution becomes one
    /// leaf holding the magnitude of its first cell.
    pub fn with_finest_refinement(self, refine_finest: bool) -> Self {
        Self { refine_finest, ..self }
    }

    pub fn min_exponent(&self) -> u32 {
        self.min_exponent
    }

    pub fn resolution_count(&self) -> usize {
        self.resolution_count as usize
    }

    pub fn threaded(&self) -> bool {
        self.threaded
    }

    pub fn refine_finest(&self) -> bool {
        self.refine_finest
    }

    /// Shortest analysis window, in samples.
    pub fn min_width(&self) -> usize {
        2usize << self.min_exponent
    }

    /// Longest analysis window, in samples. Also the block length of one `process` call.
    pub fn max_width(&self) -> usize {
        self.min_width() << (self.resolution_count - 1)
    }

    /// Bin count of the shortest window.
    pub fn min_resolution(&self) -> usize {
        self.min_width() / 2
    }

    /// Bin count of the longest window.
    pub fn max_resolution(&self) -> usize {
        self.max_width() / 2
    }

    /// Window widths from shortest to longest.
    pub fn widths(&self) -> impl Iterator<Item = usize> + use<> {
        let min_width = self.min_width();
        (0..self.resolution_count as usize).map(move |i| min_width << i)
    }

    /// Number of output rows (time steps) produced per block.
    pub fn output_rows(&self) -> usize {
        self.max_width() / self.min_width()
    }

    /// Number of output columns (frequency bins) per row.
    pub fn output_bins(&self) -> usize {
        self.max_width() / 2
    }
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            min_exponent: 8,
            resolution_count: 4,
            threaded: true,
            refine_finest: false,
        }
    }
}
