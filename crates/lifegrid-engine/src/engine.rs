//! Double-buffered, strip-parallel generation stepping.
//!
//! [`SimulationEngine`] owns two grids. During a step, `current` is the
//! shared read-only source and `scratch` is split into disjoint column
//! strips, one per worker:
//!
//! ```text
//! current (read by all)   scratch (written per strip)
//! ┌──────────────┐        ┌────┬────┬────────┐
//! │              │  ───►  │ w0 │ w1 │ w2     │   last strip absorbs
//! │              │        │    │    │        │   the remainder
//! └──────────────┘        └────┴────┴────────┘
//! ```
//!
//! Workers run on scoped threads; leaving the scope is the barrier.
//! After the barrier the two grids swap roles by moving ownership, not
//! by copying cells, so the old `current` becomes the next `scratch`.

use std::ops::Range;

use lifegrid_core::{ColumnStrip, ConfigError, Grid};

use crate::config::EngineConfig;
use crate::partition::strip_bounds;

/// Computes Game of Life generations over a toroidal grid.
///
/// The turn counter starts at 0 and increments once per completed step.
/// Dimensions and worker count are fixed for the engine's lifetime.
#[derive(Debug)]
pub struct SimulationEngine {
    current: Grid,
    scratch: Grid,
    workers: usize,
    turn: u64,
}

impl SimulationEngine {
    /// Create an engine over an all-dead grid.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;
        Self::with_grid(grid, config.workers)
    }

    /// Create an engine whose first generation is `grid`.
    ///
    /// Returns `Err(ConfigError::NoWorkers)` if `workers` is 0.
    pub fn with_grid(grid: Grid, workers: usize) -> Result<Self, ConfigError> {
        if workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        let scratch = Grid::new(grid.width(), grid.height())?;
        Ok(Self {
            current: grid,
            scratch,
            workers,
            turn: 0,
        })
    }

    /// The current generation.
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    /// The generation before the most recent step.
    ///
    /// Before the first step this is an all-dead grid, so diffing it
    /// against [`grid()`](Self::grid) yields every initially live cell.
    pub fn previous(&self) -> &Grid {
        &self.scratch
    }

    /// Number of completed steps.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Worker count used per step.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Grid width.
    pub fn width(&self) -> u32 {
        self.current.width()
    }

    /// Grid height.
    pub fn height(&self) -> u32 {
        self.current.height()
    }

    /// Number of live cells in the current generation. O(width * height).
    pub fn alive_count(&self) -> usize {
        self.current.alive_count()
    }

    /// Advance the whole grid by one generation.
    pub fn step(&mut self) {
        let width = self.width();
        self.step_range(0..width);
    }

    /// Advance one generation, computing only columns `start..=end`.
    ///
    /// Columns outside the range are carried into the next generation
    /// unchanged. The range is further split across the engine's workers.
    ///
    /// Returns `Err(ConfigError::InvalidPartition)` unless
    /// `start <= end < width`.
    pub fn step_partition(&mut self, start: u32, end: u32) -> Result<(), ConfigError> {
        let width = self.width();
        if start > end || end >= width {
            return Err(ConfigError::InvalidPartition { start, end, width });
        }
        self.step_range(start..end + 1);
        Ok(())
    }

    fn step_range(&mut self, columns: Range<u32>) {
        let width = self.width();
        let bounds = busy_strips(columns.clone(), self.workers);

        let current = &self.current;
        let mut strips = self.scratch.column_strips_mut(&bounds);
        std::thread::scope(|scope| {
            for strip in strips.iter_mut() {
                scope.spawn(move || compute_strip(current, strip));
            }
        });
        drop(strips);

        if columns.start > 0 {
            self.scratch.copy_columns_from(&self.current, 0..columns.start);
        }
        if columns.end < width {
            self.scratch.copy_columns_from(&self.current, columns.end..width);
        }

        std::mem::swap(&mut self.current, &mut self.scratch);
        self.turn += 1;
    }

    /// Consume the engine, returning the current generation.
    pub fn into_grid(self) -> Grid {
        self.current
    }
}

/// Non-empty strips of `columns`; only these get a worker thread.
fn busy_strips(columns: Range<u32>, workers: usize) -> Vec<Range<u32>> {
    let mut bounds = strip_bounds(columns, workers);
    bounds.retain(|b| !b.is_empty());
    bounds
}

fn compute_strip(current: &Grid, strip: &mut ColumnStrip<'_>) {
    let height = strip.height();
    for x in strip.columns() {
        for y in 0..height {
            strip.set(x, y, current.next_state(x, y));
        }
    }
}
