//! Engine and scheduler configuration.
//!
//! Both structs are plain builder-inputs with a `validate()` pass that
//! runs at construction. Invalid values are rejected, never clamped.

use std::time::Duration;

use lifegrid_core::ConfigError;

// ── EngineConfig ───────────────────────────────────────────────────

/// Dimensions and parallelism of a [`SimulationEngine`](crate::SimulationEngine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Grid width (columns). Must be at least 1.
    pub width: u32,
    /// Grid height (rows). Must be at least 1.
    pub height: u32,
    /// Number of column strips computed in parallel per step. Must be at
    /// least 1. Values above `width` are allowed; the surplus strips are
    /// empty.
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            workers: 8,
        }
    }
}

impl EngineConfig {
    /// Check that every dimension and the worker count are positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::EmptyDimension { name: "width" });
        }
        if self.height == 0 {
            return Err(ConfigError::EmptyDimension { name: "height" });
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }
}

// ── SchedulerConfig ────────────────────────────────────────────────

/// Turn budget and reporting cadence for a
/// [`ControlScheduler`](crate::ControlScheduler).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Number of turns to run before finishing. Default: `u64::MAX`.
    pub turns: u64,
    /// Wall-clock interval between `AliveCellsCount` reports. Default: 2s.
    pub report_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            turns: u64::MAX,
            report_interval: Duration::from_secs(2),
        }
    }
}

impl SchedulerConfig {
    /// Check that the report interval is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report_interval.is_zero() {
            return Err(ConfigError::InvalidReportInterval);
        }
        Ok(())
    }
}
