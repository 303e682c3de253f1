//! # Adaptive Spectrogram
//!
//! Computes a time-frequency representation of an audio block whose local
//! resolution adapts to the signal. The block is analysed with a family of
//! short-time Fourier transforms whose window widths double from `min_width`
//! to `max_width`. The time-frequency plane is then recursively partitioned,
//! each region taking whichever resolution concentrates its energy best
//! according to an entropy-like cost, and the chosen tiles are painted into a
//! regular output matrix at the finest time and frequency spacing.
//!
//! ## Key Features
//! - Per-width STFT analysis with a periodic Hann window (`rustfft`).
//! - Cost-driven recursive partition of the resolution bank.
//! - Optional `rayon` worker pools for analysis and cutting, with output
//!   identical to sequential processing.
//! - Whole-signal analysis with configurable step size.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! adaptive-spectrogram = "0.1.0"
//! ```
//!
//! ```rust
//! use adaptive_spectrogram::{AdaptiveConfig, AdaptiveSpectrogram};
//! let config = AdaptiveConfig::new(4, 3).unwrap().with_threaded(false);
//! let processor = AdaptiveSpectrogram::new(config).unwrap();
//! let block: Vec<f32> = (0..processor.preferred_block_size())
//!     .map(|n| (n as f32 * 0.2).sin())
//!     .collect();
//! let out = processor.process(&block).unwrap();
//! assert_eq!(out.dim(), (4, processor.bin_count()));
//! ```

/// Configuration and error types.
pub mod core;

/// Windowing and per-width frame analysis.
///
/// Turns a block of samples into one magnitude grid per window width.
pub mod signal_processing;

/// Resolution bank, cost function, partition tree and output assembly.
pub mod spectrogram;

/// Scheduling of independent tasks on `rayon` worker pools.
pub mod concurrency;

/// The block-level adaptive spectrogram processor.
pub mod features;

pub use crate::core::{AdaptiveConfig, SpectrogramError};
pub use concurrency::Coordinator;
pub use features::AdaptiveSpectrogram;
pub use spectrogram::{assemble, CutKind, Cutting, CuttingEngine, SpectrogramBank};
