use ndarray::ShapeError;
use rayon::ThreadPoolBuildError;
use thiserror::Error;

/// Enumerates error conditions for adaptive spectrogram analysis.
///
/// Variants cover configuration validation, host-side block negotiation and
/// the runtime resources (thread pools, matrix shapes) the analysis depends on.
#[derive(Error, Debug)]
pub enum SpectrogramError {
    /// Configuration parameter outside its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Input samples unusable for the requested operation (e.g., empty signal, wrong block length).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Host supplied a channel count the analysis cannot handle.
    #[error("Unsupported channel count: {0} (expected 1)")]
    UnsupportedChannelCount(usize),

    /// Host block size differs from the analysis block size.
    #[error("Block size mismatch: expected {expected}, got {actual}")]
    BlockSizeMismatch { expected: usize, actual: usize },

    /// Host step size is zero or exceeds the block size.
    #[error("Invalid step size {step} for block size {block}")]
    InvalidStepSize { step: usize, block: usize },

    /// Worker pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),

    /// Array shape mismatch from `ndarray` operations.
    #[error("Shape mismatch: {0}")]
    ShapeError(#[from] ShapeError),
}
