pub mod assemble;
pub mod bank;
pub mod cost;
pub mod cutting;
pub mod partition;

pub use assemble::{assemble, assemble_into, visit_tiles, Tile};
pub use bank::{ResolutionGrid, SpectrogramBank};
pub use cost::{cell_cost, cell_value, normalized_cost, xlogx};
pub use cutting::{select_split, CuttingEngine};
pub use partition::{CutKind, Cutting};
