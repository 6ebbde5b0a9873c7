//! Error types shared across the lifegrid workspace.
//!
//! Configuration problems are fatal at construction time and are never
//! silently clamped; grid conversion problems surface from the pixel
//! load path.

use std::error::Error;
use std::fmt;

/// Errors detected while validating grid, engine, scheduler, or shard
/// parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A grid dimension is zero.
    EmptyDimension {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
    },
    /// The worker count is zero.
    NoWorkers,
    /// `width * height` does not fit in `usize`.
    CellCountOverflow {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// A column partition does not satisfy `start <= end < width`.
    InvalidPartition {
        /// First column of the partition (inclusive).
        start: u32,
        /// Last column of the partition (inclusive).
        end: u32,
        /// Width of the grid the partition applies to.
        width: u32,
    },
    /// The periodic report interval is zero.
    InvalidReportInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimension { name } => write!(f, "grid {name} must be at least 1"),
            Self::NoWorkers => write!(f, "worker count must be at least 1"),
            Self::CellCountOverflow { width, height } => {
                write!(f, "cell count {width}x{height} overflows usize")
            }
            Self::InvalidPartition { start, end, width } => write!(
                f,
                "column partition [{start}, {end}] invalid for width {width}"
            ),
            Self::InvalidReportInterval => write!(f, "report interval must be non-zero"),
        }
    }
}

impl Error for ConfigError {}

/// Errors converting between grids and pixel buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Invalid dimensions.
    Config(ConfigError),
    /// The pixel buffer length does not equal `width * height`.
    PixelCountMismatch {
        /// Expected number of pixels.
        expected: usize,
        /// Number of pixels supplied.
        found: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::PixelCountMismatch { expected, found } => {
                write!(f, "expected {expected} pixels, found {found}")
            }
        }
    }
}

impl Error for GridError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for GridError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
