//! # Cave Generation Error Types
//!
//! Everything that can stop a generation run. All of it is detected before
//! the grid is allocated, so a failed run never leaves a partial map behind.

use thiserror::Error;

/// Errors that can occur while configuring or running the cave generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaveError {
    /// Width or height is zero.
    #[error("invalid grid dimensions: {width}x{height} (both must be at least 1)")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Fill percent outside `0..=100`.
    #[error("fill percent {0} out of range (expected 0..=100)")]
    InvalidFillPercent(u8),

    /// Requested grid exceeds the supported cell count.
    #[error("grid too large: {width}x{height} exceeds {max_cells} cells")]
    GridTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Maximum number of cells per grid.
        max_cells: u64,
    },

    /// Requested more smoothing passes than the generator supports.
    #[error("too many smoothing iterations: {requested} exceeds {max}")]
    TooManyIterations {
        /// Requested pass count.
        requested: u32,
        /// Maximum number of passes per run.
        max: u32,
    },

    /// Configuration file could not be read.
    #[error("failed to read config file {path}: {reason}")]
    ConfigIo {
        /// Path that was read.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },

    /// Configuration text is not valid TOML or has wrongly typed fields.
    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    /// Configuration could not be written back out as TOML.
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(String),

    /// A random seed was requested but the wall clock could not be read.
    #[error("could not derive a random seed: {0}")]
    SeedResolution(String),
}

impl CaveError {
    /// Returns true if the caller supplied bad configuration.
    ///
    /// Seed resolution is the only failure that is not the caller's fault.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        !matches!(self, Self::SeedResolution(_))
    }
}

/// Result type for cave generation operations.
pub type CaveResult<T> = Result<T, CaveError>;
