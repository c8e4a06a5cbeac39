//! Error types for bonsai generation.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while growing or exporting a tree.
#[derive(Error, Debug)]
pub enum Error {
    /// Canvas is too small to hold a pot and a trunk.
    #[error("Invalid dimensions: {width}x{height} (minimum {min_width}x{min_height})")]
    InvalidDimensions {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },

    /// The caller raised the cancel flag between stages.
    #[error("Generation cancelled")]
    Cancelled,

    /// The worker did not finish within the allotted time.
    #[error("Generation timed out after {0:?}")]
    TimedOut(std::time::Duration),

    /// The worker thread exited without handing back a tree.
    #[error("Generation worker for seed {seed} failed")]
    WorkerFailed { seed: u64 },

    /// I/O error (saving a tree, terminal output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
