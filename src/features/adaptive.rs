use ndarray::Array2;

use crate::concurrency::{Coordinator, CUT_WORKERS};
use crate::core::config::AdaptiveConfig;
use crate::core::error::SpectrogramError;
use crate::signal_processing::frame_analysis::FrameAnalyzer;
use crate::spectrogram::{assemble, Cutting, CuttingEngine, SpectrogramBank};

/// Adaptive spectrogram processor.
///
/// Each block of `max_width` samples is analysed at every configured window
/// width, partitioned by [`CuttingEngine`], and rendered into a matrix of
/// `max_width / min_width` rows (time) by `max_width / 2` columns (bins).
///
/// FFT plans and worker pools are created once here and reused for every
/// block. With `threaded` configuration the per-width analyses run on a pool
/// with one worker per width, and sub-cuts on a pool of [`CUT_WORKERS`]
/// workers. Threaded and sequential processing give bit-identical output.
///
/// # Examples
/// ```
/// use adaptive_spectrogram::{AdaptiveConfig, AdaptiveSpectrogram};
/// let config = AdaptiveConfig::new(3, 3).unwrap();
/// let processor = AdaptiveSpectrogram::new(config).unwrap();
/// let block = vec![0.0f32; processor.preferred_block_size()];
/// let out = processor.process(&block).unwrap();
/// assert_eq!(out.dim(), (4, 32));
/// ```
#[derive(Debug)]
pub struct AdaptiveSpectrogram {
    config: AdaptiveConfig,
    analyzers: Vec<FrameAnalyzer>,
    analysis: Coordinator,
    cutting: Coordinator,
    step_size: usize,
}

impl AdaptiveSpectrogram {
    /// Builds the per-width analyzers and, when threaded, the worker pools.
    ///
    /// # Errors
    /// `ThreadPool` if worker threads cannot be spawned.
    pub fn new(config: AdaptiveConfig) -> Result<Self, SpectrogramError> {
        let analyzers = config
            .widths()
            .map(FrameAnalyzer::new)
            .collect::<Result<Vec<_>, _>>()?;
        let (analysis, cutting) = if config.threaded() {
            (
                Coordinator::threaded(config.resolution_count())?,
                Coordinator::threaded(CUT_WORKERS)?,
            )
        } else {
            (Coordinator::sequential(), Coordinator::sequential())
        };
        log::debug!(
            "Adaptive spectrogram: widths {}..={}, {} resolutions, threaded={}",
            config.min_width(),
            config.max_width(),
            config.resolution_count(),
            config.threaded()
        );
        Ok(Self {
            config,
            analyzers,
            analysis,
            cutting,
            step_size: config.max_width() / 2,
        })
    }

    pub fn config(&self) -> &AdaptiveConfig {
        &self.config
    }

    /// Samples per `process` call.
    pub fn preferred_block_size(&self) -> usize {
        self.config.max_width()
    }

    pub fn preferred_step_size(&self) -> usize {
        self.config.max_width() / 2
    }

    /// Step between consecutive blocks in [`analyze`](Self::analyze).
    pub fn step_size(&self) -> usize {
        self.step_size
    }

    /// Columns of every output row.
    pub fn bin_count(&self) -> usize {
        self.config.output_bins()
    }

    /// Output rows per second of input at `sample_rate` Hz.
    pub fn output_row_rate(&self, sample_rate: f32) -> f32 {
        sample_rate / (self.config.min_width() / 2) as f32
    }

    /// Validates the host's stream layout.
    ///
    /// # Parameters
    /// - `channels`: must be 1.
    /// - `step_size`: samples between block starts, `1..=block_size`.
    /// - `block_size`: must equal [`preferred_block_size`](Self::preferred_block_size).
    ///
    /// # Returns
    /// - `Ok(())`: `step_size` is recorded for [`analyze`](Self::analyze).
    /// - `Err(SpectrogramError)`: the processor is left unchanged.
    pub fn initialise(
        &mut self,
        channels: usize,
        step_size: usize,
        block_size: usize,
    ) -> Result<(), SpectrogramError> {
        if channels != 1 {
            return Err(SpectrogramError::UnsupportedChannelCount(channels));
        }
        let expected = self.preferred_block_size();
        if block_size != expected {
            return Err(SpectrogramError::BlockSizeMismatch {
                expected,
                actual: block_size,
            });
        }
        if step_size == 0 || step_size > block_size {
            return Err(SpectrogramError::InvalidStepSize {
                step: step_size,
                block: block_size,
            });
        }
        self.step_size = step_size;
        Ok(())
    }

    /// Analyses `block` at every width into a fresh bank.
    ///
    /// # Errors
    /// `BlockSizeMismatch` unless `block` holds exactly `max_width` samples.
    pub fn spectrogram_bank(&self, block: &[f32]) -> Result<SpectrogramBank, SpectrogramError> {
        let expected = self.preferred_block_size();
        if block.len() != expected {
            return Err(SpectrogramError::BlockSizeMismatch {
                expected,
                actual: block.len(),
            });
        }
        let mut bank = SpectrogramBank::for_config(&self.config)?;
        let analyzers = &self.analyzers;
        self.analysis
            .try_for_each_mut(bank.grids_mut(), |level, grid| analyzers[level].analyze(block, grid))?;
        Ok(bank)
    }

    /// Partition tree of a filled bank.
    pub fn partition(&self, bank: &SpectrogramBank) -> Cutting {
        CuttingEngine::new(bank, &self.cutting)
            .with_finest_refinement(self.config.refine_finest())
            .cut_all()
    }

    /// Adaptive spectrogram of one block of `max_width` samples.
    ///
    /// # Returns
    /// Matrix of shape `(max_width / min_width, max_width / 2)`, one row per time step.
    pub fn process(&self, block: &[f32]) -> Result<Array2<f32>, SpectrogramError> {
        let bank = self.spectrogram_bank(block)?;
        let cutting = self.partition(&bank);
        Ok(assemble(&cutting, self.config.output_rows(), self.config.output_bins()))
    }

    /// Adaptive spectrogram of a whole signal.
    ///
    /// Blocks of `max_width` samples start every [`step_size`](Self::step_size)
    /// samples; blocks running past the end are zero-padded. Rows of all blocks
    /// are stacked in order.
    ///
    /// # Errors
    /// `InvalidInput` for an empty signal.
    pub fn analyze(&self, signal: &[f32]) -> Result<Array2<f32>, SpectrogramError> {
        if signal.is_empty() {
            return Err(SpectrogramError::InvalidInput("Signal is empty".to_string()));
        }
        let block_size = self.preferred_block_size();
        let rows = self.config.output_rows();
        let bins = self.config.output_bins();
        let starts: Vec<usize> = (0..signal.len()).step_by(self.step_size).collect();

        log::debug!(
            "Analysing {} samples in {} blocks of {} (step {})",
            signal.len(),
            starts.len(),
            block_size,
            self.step_size
        );

        let mut data = Vec::with_capacity(starts.len() * rows * bins);
        let mut block = vec![0.0f32; block_size];
        for &start in &starts {
            let end = (start + block_size).min(signal.len());
            block.fill(0.0);
            block[..end - start].copy_from_slice(&signal[start..end]);
            if end - start < block_size {
                log::warn!(
                    "Zero-padding block at sample {} ({} of {} samples present)",
                    start,
                    end - start,
                    block_size
                );
            }
            data.extend(self.process(&block)?.iter().copied());
        }

        Ok(Array2::from_shape_vec((starts.len() * rows, bins), data)?)
    }
}
