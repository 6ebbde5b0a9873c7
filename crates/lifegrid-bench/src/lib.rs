//! Benchmark profiles for the lifegrid simulator.
//!
//! - [`reference_profile`]: 512x512 grid at 25% density.
//! - [`stress_profile`]: 2048x2048 grid at 25% density.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use lifegrid_core::Grid;
use lifegrid_engine::SimulationEngine;
use lifegrid_test_utils::random_grid;

/// Initial density used by every profile.
pub const DENSITY: f64 = 0.25;

/// Worker counts swept by the stepping benchmarks.
pub const WORKER_COUNTS: [usize; 5] = [1, 2, 4, 8, 16];

/// Build the reference starting board: 512x512 (262K cells).
pub fn reference_profile(seed: u64) -> Grid {
    random_grid(512, 512, seed, DENSITY)
}

/// Build the stress starting board: 2048x2048 (~4.2M cells).
pub fn stress_profile(seed: u64) -> Grid {
    random_grid(2048, 2048, seed, DENSITY)
}

/// An engine over `grid` that has already run `warmup` steps, so
/// benchmarks measure a settled population rather than the random soup.
pub fn warmed_engine(grid: Grid, workers: usize, warmup: u64) -> SimulationEngine {
    let mut engine =
        SimulationEngine::with_grid(grid, workers).expect("benchmark worker count must be >= 1");
    for _ in 0..warmup {
        engine.step();
    }
    engine
}
