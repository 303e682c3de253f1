pub mod frame_analysis;
pub mod window;

pub use frame_analysis::FrameAnalyzer;
pub use window::hann;
