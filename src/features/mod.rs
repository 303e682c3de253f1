pub mod adaptive;

pub use adaptive::AdaptiveSpectrogram;
