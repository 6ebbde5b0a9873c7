//! Test utilities for lifegrid development.
//!
//! Provides standard patterns ([`glider`], [`blinker`], [`block`]),
//! helpers to place them on a [`Grid`], and seeded random grids
//! ([`random_grid`]) so property tests stay reproducible.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{blinker, block, glider};

use lifegrid_core::{Cell, Event, Grid};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shift every cell by `(dx, dy)` without wrapping.
pub fn translate(cells: &[Cell], dx: u32, dy: u32) -> Vec<Cell> {
    cells.iter().map(|c| Cell::new(c.x + dx, c.y + dy)).collect()
}

/// Mark `cells`, offset by `(dx, dy)` and wrapped onto the torus, alive.
pub fn place(grid: &mut Grid, cells: &[Cell], dx: u32, dy: u32) {
    let (w, h) = (grid.width(), grid.height());
    for c in cells {
        let x = ((c.x as u64 + dx as u64) % w as u64) as u32;
        let y = ((c.y as u64 + dy as u64) % h as u64) as u32;
        grid.set_alive(x, y, true);
    }
}

/// A `width x height` grid with each cell alive with probability
/// `density`, deterministic for a given `seed`.
///
/// # Panics
///
/// Panics if either dimension is zero.
pub fn random_grid(width: u32, height: u32, seed: u64, density: f64) -> Grid {
    let mut grid = Grid::new(width, height).expect("random_grid needs non-zero dimensions");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for y in 0..height {
        for x in 0..width {
            // 53 random bits give a uniform f64 in [0, 1).
            let sample = (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
            if sample < density {
                grid.set_alive(x, y, true);
            }
        }
    }
    grid
}

/// Cells reported as flipped for `turn`, in stream order.
pub fn flips_for_turn(events: &[Event], turn: u64) -> Vec<Cell> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::CellFlipped { turn: t, cell } if *t == turn => Some(*cell),
            _ => None,
        })
        .collect()
}

/// Rebuild a board by toggling every flipped cell up to and including
/// `turn`, starting from an all-dead grid.
pub fn replay_flips(events: &[Event], width: u32, height: u32, turn: u64) -> Grid {
    let mut grid = Grid::new(width, height).expect("replay_flips needs non-zero dimensions");
    for e in events {
        if let Event::CellFlipped { turn: t, cell } = e {
            if *t <= turn {
                let alive = grid.is_alive(cell.x as i64, cell.y as i64);
                grid.set_alive(cell.x, cell.y, !alive);
            }
        }
    }
    grid
}
