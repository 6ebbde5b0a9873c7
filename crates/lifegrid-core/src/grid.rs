//! Toroidal boolean grid with wraparound coordinate access.
//!
//! Storage is column-major: cell `(x, y)` lives at `x * height + y`. A
//! contiguous column range is therefore one contiguous slice, which is
//! what lets the engine hand each worker a disjoint `&mut` strip without
//! any locking or `unsafe`.

use std::ops::Range;

use crate::cell::Cell;
use crate::error::{ConfigError, GridError};

/// Pixel value for a live cell in load/save buffers.
pub const ALIVE_PIXEL: u8 = 255;

/// Pixel value for a dead cell in load/save buffers.
pub const DEAD_PIXEL: u8 = 0;

/// All 8 neighbour offsets as `(dx, dy)`.
const OFFSETS_8: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A fixed-size rectangular grid of cells whose edges wrap around.
///
/// Dimensions are strictly positive and never change after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid.
    ///
    /// Returns `Err(ConfigError::EmptyDimension)` if either dimension is 0,
    /// or `Err(ConfigError::CellCountOverflow)` if `width * height` does
    /// not fit in `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        let len = cell_len(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; len],
        })
    }

    /// Build a grid from a row-major pixel buffer.
    ///
    /// [`ALIVE_PIXEL`] marks a live cell; every other value is dead.
    pub fn from_pixels(width: u32, height: u32, pixels: &[u8]) -> Result<Self, GridError> {
        let expected = cell_len(width, height)?;
        if pixels.len() != expected {
            return Err(GridError::PixelCountMismatch {
                expected,
                found: pixels.len(),
            });
        }
        let mut grid = Self::new(width, height)?;
        let w = width as usize;
        for (i, &p) in pixels.iter().enumerate() {
            grid.set_alive((i % w) as u32, (i / w) as u32, p == ALIVE_PIXEL);
        }
        Ok(grid)
    }

    /// Serialize to a row-major pixel buffer (all columns of row 0 first).
    pub fn to_pixels(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.get(x, y) { ALIVE_PIXEL } else { DEAD_PIXEL });
            }
        }
        out
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (x as usize) * (self.height as usize) + (y as usize)
    }

    #[inline]
    fn get(&self, x: u32, y: u32) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Read the cell at `(x, y)` after toroidal wraparound.
    ///
    /// Accepts any coordinate, however negative or large.
    #[inline]
    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        self.get(wrap(x, self.width), wrap(y, self.height))
    }

    /// Write the cell at literal coordinates `(x, y)`.
    ///
    /// Coordinates must already be in `[0, width) x [0, height)`; nothing
    /// about out-of-range writes is guaranteed.
    #[inline]
    pub fn set_alive(&mut self, x: u32, y: u32, alive: bool) {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of range");
        let i = self.index(x, y);
        self.cells[i] = alive;
    }

    /// Count live cells among the 8 wrapped neighbours of `(x, y)`.
    pub fn live_neighbours(&self, x: u32, y: u32) -> u8 {
        let (x, y) = (x as i64, y as i64);
        OFFSETS_8
            .iter()
            .filter(|(dx, dy)| self.is_alive(x + dx, y + dy))
            .count() as u8
    }

    /// Next-generation state of `(x, y)` under the B3/S23 rule.
    #[inline]
    pub fn next_state(&self, x: u32, y: u32) -> bool {
        match self.live_neighbours(x, y) {
            3 => true,
            2 => self.get(x, y),
            _ => false,
        }
    }

    /// Full scan counting live cells.
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// All live cells in row-major order.
    pub fn alive_cells(&self) -> Vec<Cell> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    out.push(Cell::new(x, y));
                }
            }
        }
        out
    }

    /// Split the grid into disjoint mutable column strips.
    ///
    /// `bounds` must be ascending, non-overlapping, and within
    /// `[0, width)`; gaps between ranges are allowed and left untouched.
    ///
    /// # Panics
    ///
    /// Panics if the ranges are out of order or exceed the grid width.
    pub fn column_strips_mut(&mut self, bounds: &[Range<u32>]) -> Vec<ColumnStrip<'_>> {
        let (width, height) = (self.width, self.height);
        let h = height as usize;
        let mut rest: &mut [bool] = &mut self.cells;
        let mut next_col = 0u32;
        let mut strips = Vec::with_capacity(bounds.len());
        for columns in bounds {
            assert!(
                columns.start >= next_col && columns.start <= columns.end && columns.end <= width,
                "column range {columns:?} out of order or beyond width {width}"
            );
            let skip = (columns.start - next_col) as usize * h;
            let take = (columns.end - columns.start) as usize * h;
            let (_, tail) = std::mem::take(&mut rest).split_at_mut(skip);
            let (cells, tail) = tail.split_at_mut(take);
            rest = tail;
            next_col = columns.end;
            strips.push(ColumnStrip {
                columns: columns.clone(),
                height,
                cells,
            });
        }
        strips
    }

    /// Copy the given columns from `other`, which must have the same
    /// dimensions.
    pub fn copy_columns_from(&mut self, other: &Grid, columns: Range<u32>) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        let h = self.height as usize;
        let span = columns.start as usize * h..columns.end as usize * h;
        self.cells[span.clone()].copy_from_slice(&other.cells[span]);
    }
}

/// Cell count for `width x height`, validated without allocating.
fn cell_len(width: u32, height: u32) -> Result<usize, ConfigError> {
    if width == 0 {
        return Err(ConfigError::EmptyDimension { name: "width" });
    }
    if height == 0 {
        return Err(ConfigError::EmptyDimension { name: "height" });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(ConfigError::CellCountOverflow { width, height })
}

/// Normalize a raw coordinate onto `[0, dim)`.
#[inline]
fn wrap(raw: i64, dim: u32) -> u32 {
    let n = dim as i64;
    if raw >= 0 && raw < n {
        return raw as u32;
    }
    (((raw % n) + n) % n) as u32
}

/// Exclusive write access to a contiguous range of columns of a [`Grid`].
///
/// Produced by [`Grid::column_strips_mut`]; each strip can be moved to a
/// different worker thread.
#[derive(Debug)]
pub struct ColumnStrip<'a> {
    columns: Range<u32>,
    height: u32,
    cells: &'a mut [bool],
}

impl ColumnStrip<'_> {
    /// Columns covered by this strip.
    pub fn columns(&self) -> Range<u32> {
        self.columns.clone()
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Write cell `(x, y)`, where `x` is a grid column inside
    /// [`columns()`](Self::columns).
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, alive: bool) {
        let col = (x - self.columns.start) as usize;
        self.cells[col * self.height as usize + y as usize] = alive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid_with(width: u32, height: u32, live: &[(u32, u32)]) -> Grid {
        let mut g = Grid::new(width, height).unwrap();
        for &(x, y) in live {
            g.set_alive(x, y, true);
        }
        g
    }

    // ── Constructor tests ───────────────────────────────────────

    #[test]
    fn new_is_all_dead() {
        let g = Grid::new(7, 5).unwrap();
        assert_eq!(g.cell_count(), 35);
        assert_eq!(g.alive_count(), 0);
        assert!(g.alive_cells().is_empty());
    }

    #[test]
    fn new_zero_width_returns_error() {
        assert_eq!(
            Grid::new(0, 5),
            Err(ConfigError::EmptyDimension { name: "width" })
        );
    }

    #[test]
    fn new_zero_height_returns_error() {
        assert_eq!(
            Grid::new(5, 0),
            Err(ConfigError::EmptyDimension { name: "height" })
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn from_pixels_rejects_short_payload_before_allocating() {
        // 2^62 cells would abort on allocation; the length check comes first.
        let err = Grid::from_pixels(1 << 31, 1 << 31, &[]).unwrap_err();
        assert_eq!(
            err,
            GridError::PixelCountMismatch {
                expected: 1 << 62,
                found: 0,
            }
        );
    }

    // ── Wraparound ──────────────────────────────────────────────

    #[test]
    fn wraps_far_negative_coordinates() {
        let g = grid_with(4, 3, &[(3, 2)]);
        assert!(g.is_alive(-1, -1));
        assert!(g.is_alive(-5, -4));
        assert!(g.is_alive(-4001, 2));
        assert_eq!(g.is_alive(i64::MIN, 2), g.is_alive(i64::MIN.rem_euclid(4), 2));
    }

    #[test]
    fn single_cell_neighbours_are_itself() {
        let g = grid_with(1, 1, &[(0, 0)]);
        assert_eq!(g.live_neighbours(0, 0), 8);
        // 8 neighbours: overpopulated.
        assert!(!g.next_state(0, 0));
    }

    // ── Rule ────────────────────────────────────────────────────

    #[test]
    fn birth_survival_and_death() {
        // Horizontal blinker centred at (2, 2).
        let g = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        assert!(g.next_state(2, 2), "centre survives with 2");
        assert!(g.next_state(2, 1), "birth with 3");
        assert!(g.next_state(2, 3), "birth with 3");
        assert!(!g.next_state(1, 2), "end dies with 1");
        assert!(!g.next_state(0, 0), "empty stays dead");
    }

    // ── Pixels ──────────────────────────────────────────────────

    #[test]
    fn pixels_are_row_major() {
        let g = grid_with(3, 2, &[(2, 0), (0, 1)]);
        assert_eq!(g.to_pixels(), vec![0, 0, 255, 255, 0, 0]);
        assert_eq!(Grid::from_pixels(3, 2, &g.to_pixels()).unwrap(), g);
    }

    #[test]
    fn from_pixels_treats_non_255_as_dead() {
        let g = Grid::from_pixels(2, 1, &[254, 255]).unwrap();
        assert_eq!(g.alive_cells(), vec![Cell::new(1, 0)]);
    }

    #[test]
    fn from_pixels_rejects_wrong_length() {
        assert_eq!(
            Grid::from_pixels(2, 2, &[0, 0, 0]),
            Err(GridError::PixelCountMismatch {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn alive_cells_row_major() {
        let g = grid_with(4, 4, &[(3, 0), (0, 2), (1, 0)]);
        assert_eq!(
            g.alive_cells(),
            vec![Cell::new(1, 0), Cell::new(3, 0), Cell::new(0, 2)]
        );
    }

    // ── Column strips ───────────────────────────────────────────

    #[test]
    fn strips_write_disjoint_columns() {
        let mut g = Grid::new(5, 3).unwrap();
        {
            let mut strips = g.column_strips_mut(&[0..2, 2..5]);
            strips[0].set(1, 2, true);
            strips[1].set(2, 0, true);
            strips[1].set(4, 1, true);
        }
        assert_eq!(
            g.alive_cells(),
            vec![Cell::new(2, 0), Cell::new(4, 1), Cell::new(1, 2)]
        );
    }

    #[test]
    fn strips_allow_gaps_and_empty_ranges() {
        let mut g = Grid::new(6, 2).unwrap();
        {
            let mut strips = g.column_strips_mut(&[1..1, 3..5]);
            assert_eq!(strips[0].columns(), 1..1);
            strips[1].set(4, 1, true);
        }
        assert_eq!(g.alive_cells(), vec![Cell::new(4, 1)]);
    }

    #[test]
    #[should_panic]
    fn strips_reject_overlap() {
        let mut g = Grid::new(6, 2).unwrap();
        let _ = g.column_strips_mut(&[0..3, 2..6]);
    }

    #[test]
    fn copy_columns_only_touches_range() {
        let src = grid_with(4, 2, &[(0, 0), (1, 1), (3, 0)]);
        let mut dst = Grid::new(4, 2).unwrap();
        dst.copy_columns_from(&src, 1..3);
        assert_eq!(dst.alive_cells(), vec![Cell::new(1, 1)]);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn wraparound_matches_opposite_edge(
            width in 1u32..20,
            height in 1u32..20,
            live in proptest::collection::vec((0u32..20, 0u32..20), 0..30),
        ) {
            let mut g = Grid::new(width, height).unwrap();
            for (x, y) in live {
                g.set_alive(x % width, y % height, true);
            }
            let w = width as i64;
            for y in 0..height as i64 {
                prop_assert_eq!(g.is_alive(-1, y), g.is_alive(w - 1, y));
                prop_assert_eq!(g.is_alive(w, y), g.is_alive(0, y));
                prop_assert_eq!(g.is_alive(-3 * w - 1, y), g.is_alive(w - 1, y));
            }
        }

        #[test]
        fn wrap_agrees_with_rem_euclid(raw in any::<i64>(), dim in 1u32..10_000) {
            prop_assert_eq!(wrap(raw, dim) as i64, raw.rem_euclid(dim as i64));
        }
    }
}
