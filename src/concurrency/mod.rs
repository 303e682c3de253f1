pub mod coordinator;

pub use coordinator::{Coordinator, CUT_WORKERS, DEFAULT_FORK_DEPTH};
