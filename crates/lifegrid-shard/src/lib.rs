//! Remote partitioned compute for lifegrid.
//!
//! A shard runs generation steps restricted to a column range on a grid
//! supplied by the caller and returns the result. It keeps no state
//! between calls.
//!
//! - [`ComputeShard`] performs the computation in-process.
//! - [`codec`] defines the binary wire format.
//! - [`ShardServer`] serves the format over TCP, one thread per
//!   connection; [`ShardClient`] is the matching blocking client.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod client;
pub mod codec;
pub mod error;
pub mod server;
pub mod service;

pub use client::ShardClient;
pub use error::ShardError;
pub use server::ShardServer;
pub use service::{ComputeShard, ShardRequest, ShardResponse};

/// Magic bytes opening every frame.
pub const MAGIC: [u8; 4] = *b"LGSH";

/// Wire protocol version.
pub const PROTOCOL_VERSION: u8 = 1;

/// Largest grid, in cells, a request may carry.
pub const MAX_CELLS: u64 = 1 << 28;

/// Largest worker count a request may ask for.
pub const MAX_WORKERS: u32 = 1024;

/// Most turns a single request may ask for.
pub const MAX_TURNS: u64 = 1 << 20;

/// Response status codes.
pub mod status {
    /// The request succeeded; pixels follow.
    pub const OK: u8 = 0;
    /// The request was well-formed but invalid; a message follows.
    pub const INVALID_REQUEST: u8 = 1;
}

/// Ports the shard binary listens on when none are given.
pub const DEFAULT_PORTS: [u16; 8] = [10001, 10002, 10003, 10004, 10005, 10006, 10007, 10008];
