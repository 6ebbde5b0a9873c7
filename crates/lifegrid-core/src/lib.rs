//! Core types for the lifegrid simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the toroidal [`Grid`], cell coordinates, the event stream vocabulary,
//! and the error types shared by the engine and the compute shard.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod event;
pub mod grid;

pub use cell::Cell;
pub use error::{ConfigError, GridError};
pub use event::{Event, State};
pub use grid::{ColumnStrip, Grid, ALIVE_PIXEL, DEAD_PIXEL};
