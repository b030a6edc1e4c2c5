//! Layout calculation for tiling
//!
//! This module handles all the geometric calculations:
//! - Grid layout (working area, cell dimensions)
//! - Tile planning (uniform scale, centering, placement order)

mod grid;
mod plan;
mod types;

pub use grid::*;
pub use plan::*;
pub use types::*;
