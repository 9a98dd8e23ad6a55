//! Position types for level objects
//!
//! Level files store every position in raw editor units. The editor grid is
//! 30 raw units per cell; the codec never applies that scale itself.

use serde::{Deserialize, Serialize};

/// Raw editor units per grid cell
pub const RAW_UNITS_PER_CELL: i32 = 30;

/// Position along the level's horizontal axis, in raw units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RawPosition(pub i32);

impl RawPosition {
    pub const fn new(x: i32) -> Self {
        Self(x)
    }

    /// Convert raw units to grid cells (floors toward negative infinity)
    pub const fn to_cells(self) -> CellPosition {
        CellPosition(self.0.div_euclid(RAW_UNITS_PER_CELL))
    }
}

/// Position along the level's horizontal axis, in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPosition(pub i32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_to_cell_conversion() {
        assert_eq!(RawPosition::new(90).to_cells(), CellPosition(3));
        assert_eq!(RawPosition::new(119).to_cells(), CellPosition(3));
        assert_eq!(RawPosition::new(-1).to_cells(), CellPosition(-1));
    }
}
