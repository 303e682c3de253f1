pub mod config;
pub mod error;

pub use config::{AdaptiveConfig, MIN_EXPONENT_RANGE, RESOLUTION_COUNT_RANGE};
pub use error::SpectrogramError;
