//! Error types for the compute shard.

use std::fmt;
use std::io;

use lifegrid_core::{ConfigError, GridError};

/// Errors from executing, encoding, or transporting shard calls.
#[derive(Debug)]
pub enum ShardError {
    /// Invalid worker count or partition bounds.
    Config(ConfigError),
    /// The request pixels do not describe a grid of the stated size.
    Grid(GridError),
    /// A request field exceeds what this build accepts.
    LimitExceeded {
        /// Which field.
        what: &'static str,
        /// The value received.
        value: u64,
        /// The largest accepted value.
        max: u64,
    },
    /// An I/O error on the connection.
    Io(io::Error),
    /// The frame does not start with `b"LGSH"`.
    InvalidMagic,
    /// The protocol version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the frame.
        found: u8,
    },
    /// A frame could not be decoded.
    Malformed {
        /// What went wrong.
        detail: String,
    },
    /// The server rejected the request.
    Remote {
        /// Non-zero status code from the response.
        status: u8,
        /// Error message sent by the server.
        message: String,
    },
}

impl ShardError {
    /// Whether this error describes a well-framed but invalid request.
    ///
    /// Such errors are answered with an error response; every other
    /// error ends the connection.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Grid(_) | Self::LimitExceeded { .. }
        )
    }
}

impl fmt::Display for ShardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid request: {e}"),
            Self::Grid(e) => write!(f, "invalid request: {e}"),
            Self::LimitExceeded { what, value, max } => {
                write!(f, "invalid request: {what} {value} exceeds maximum {max}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"LGSH\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported protocol version {found}")
            }
            Self::Malformed { detail } => write!(f, "malformed frame: {detail}"),
            Self::Remote { status, message } => {
                write!(f, "remote error (status {status}): {message}")
            }
        }
    }
}

impl std::error::Error for ShardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ShardError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConfigError> for ShardError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GridError> for ShardError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
