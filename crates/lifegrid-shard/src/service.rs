//! The stateless compute operation.
//!
//! A call runs `turns` restricted steps over a private engine built from
//! the supplied grid, so concurrent calls share nothing.

use lifegrid_core::{ConfigError, Grid};
use lifegrid_engine::SimulationEngine;
use tracing::debug;

use crate::error::ShardError;

/// Input to [`ComputeShard::execute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShardRequest {
    /// Starting generation.
    pub grid: Grid,
    /// Workers to split the column range across. Must be at least 1.
    pub workers: usize,
    /// Number of generations to compute.
    pub turns: u64,
    /// First column to compute, inclusive.
    pub start_column: u32,
    /// Last column to compute, inclusive.
    pub end_column: u32,
}

/// Output of [`ComputeShard::execute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShardResponse {
    /// The grid after `turns` restricted steps.
    pub grid: Grid,
    /// Number of steps performed.
    pub turns: u64,
}

/// Executes partitioned generation steps for remote callers.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComputeShard;

impl ComputeShard {
    /// Create a shard.
    pub fn new() -> Self {
        Self
    }

    /// Run `request.turns` steps restricted to columns
    /// `start_column..=end_column`.
    ///
    /// Columns outside the range are returned unchanged. The bounds and
    /// worker count are validated before any step, including when
    /// `turns` is 0.
    pub fn execute(&self, request: ShardRequest) -> Result<ShardResponse, ShardError> {
        let ShardRequest {
            grid,
            workers,
            turns,
            start_column,
            end_column,
        } = request;
        let width = grid.width();
        if start_column > end_column || end_column >= width {
            return Err(ConfigError::InvalidPartition {
                start: start_column,
                end: end_column,
                width,
            }
            .into());
        }

        let mut engine = SimulationEngine::with_grid(grid, workers)?;
        for _ in 0..turns {
            engine.step_partition(start_column, end_column)?;
        }
        debug!(
            target: "lifegrid::shard",
            width,
            height = engine.height(),
            workers,
            turns,
            start_column,
            end_column,
            "partition computed"
        );
        Ok(ShardResponse {
            turns: engine.turn(),
            grid: engine.into_grid(),
        })
    }
}
