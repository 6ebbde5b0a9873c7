//! lifegrid: a parallel Game of Life engine on a toroidal grid.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all lifegrid sub-crates. For most users, adding `lifegrid` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::time::Duration;
//! use lifegrid::prelude::*;
//!
//! // A 16x16 board with a blinker, stored as the initial image.
//! let mut grid = Grid::new(16, 16).unwrap();
//! for x in 4..7 {
//!     grid.set_alive(x, 8, true);
//! }
//! let store = MemoryStore::new();
//! store.insert(initial_name(16, 16), grid.to_pixels());
//!
//! let mut loader = store.clone();
//! let start = load_initial(&mut loader, 16, 16).unwrap();
//! let engine = SimulationEngine::with_grid(start, 4).unwrap();
//!
//! let (_keys, key_rx) = crossbeam_channel::unbounded();
//! let (event_tx, events) = crossbeam_channel::unbounded();
//! let config = SchedulerConfig { turns: 10, report_interval: Duration::from_secs(2) };
//! let scheduler = ControlScheduler::new(engine, Box::new(store.clone()), key_rx, event_tx, config)
//!     .unwrap();
//!
//! let report = scheduler.run().unwrap();
//! assert_eq!(report.outcome, Outcome::Completed);
//! assert!(events.iter().any(|e| matches!(e, Event::FinalTurnComplete { turn: 10, .. })));
//! assert!(store.get("16x16x10").is_some());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lifegrid-core` | Grid, cells, events, configuration errors |
//! | [`engine`] | `lifegrid-engine` | Stepping engine, reporter, scheduler, stores |
//! | [`shard`] | `lifegrid-shard` | Remote partitioned compute: codec, server, client |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid, cell, and event types (`lifegrid-core`).
pub use lifegrid_core as types;

/// Stepping engine, event reporting, scheduling, and stores
/// (`lifegrid-engine`).
///
/// [`engine::SimulationEngine`] computes generations;
/// [`engine::ControlScheduler`] drives them interactively.
pub use lifegrid_engine as engine;

/// Remote partitioned compute (`lifegrid-shard`).
///
/// [`shard::ComputeShard`] runs in-process; [`shard::ShardServer`] and
/// [`shard::ShardClient`] carry it over TCP.
pub use lifegrid_shard as shard;

/// Common imports for typical lifegrid usage.
pub mod prelude {
    // Core types
    pub use lifegrid_core::{Cell, Event, Grid, State};

    // Errors
    pub use lifegrid_core::{ConfigError, GridError};
    pub use lifegrid_engine::{SchedulerError, StoreError};
    pub use lifegrid_shard::ShardError;

    // Engine
    pub use lifegrid_engine::{
        initial_name, load_initial, ControlScheduler, EngineConfig, GridStore, MemoryStore,
        Outcome, PgmStore, RunReport, SchedulerConfig, SimulationEngine,
    };

    // Shard
    pub use lifegrid_shard::{ComputeShard, ShardClient, ShardRequest, ShardResponse, ShardServer};
}
