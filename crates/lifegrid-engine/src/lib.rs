//! Simulation engine, event reporting, and turn scheduling for lifegrid.
//!
//! - [`SimulationEngine`] owns the double-buffered grids and computes one
//!   generation per [`step()`](SimulationEngine::step), fanning column
//!   strips out to scoped worker threads.
//! - [`EventReporter`] diffs consecutive generations into the ordered
//!   event stream and owns the stream's single close.
//! - [`ControlScheduler`] drives turns, interleaving interactive commands
//!   and a periodic population report.
//! - [`GridStore`] is the load/save seam for initial images and snapshots.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod command;
pub mod config;
pub mod engine;
pub mod partition;
pub mod reporter;
pub mod scheduler;
pub mod store;

pub use command::Command;
pub use config::{EngineConfig, SchedulerConfig};
pub use engine::SimulationEngine;
pub use lifegrid_core::ConfigError;
pub use partition::strip_bounds;
pub use reporter::{diff, EventReporter};
pub use scheduler::{ControlScheduler, Outcome, RunReport, SchedulerError};
pub use store::{
    initial_name, load_initial, save_snapshot, snapshot_name, GridStore, MemoryStore, PgmStore,
    StoreError,
};
