//! Grid geometry and cell state.

mod partition;
mod state;

pub use partition::{compute_sizes, CellRect, NoisePartition, Partition, WEIGHT_EPSILON};
pub use state::GridState;

/// Column/row coordinate of a cell
pub type Cell = (usize, usize);
