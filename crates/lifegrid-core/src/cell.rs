//! Cell coordinates.

use std::fmt;

/// Coordinates of a single cell: `x` is the column, `y` the row.
///
/// Cells reported by the engine are always in range for the grid that
/// produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl Cell {
    /// Construct a cell coordinate.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
