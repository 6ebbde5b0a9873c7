//! Standard patterns, anchored at the origin.
//!
//! - [`glider`]: period 4, moves one cell down-right per period.
//! - [`blinker`]: period 2 oscillator, horizontal phase.
//! - [`block`]: still life.

use lifegrid_core::Cell;

/// The south-east glider.
///
/// ```text
/// .#.
/// ..#
/// ###
/// ```
pub fn glider() -> Vec<Cell> {
    vec![
        Cell::new(1, 0),
        Cell::new(2, 1),
        Cell::new(0, 2),
        Cell::new(1, 2),
        Cell::new(2, 2),
    ]
}

/// Horizontal blinker occupying `(0..3, 0)`.
pub fn blinker() -> Vec<Cell> {
    vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]
}

/// 2x2 block.
pub fn block() -> Vec<Cell> {
    vec![
        Cell::new(0, 0),
        Cell::new(1, 0),
        Cell::new(0, 1),
        Cell::new(1, 1),
    ]
}
