// error.rs - Error kinds surfaced by the simulation core

use std::path::PathBuf;
use thiserror::Error;

/// Everything the core can report back to its host.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("malformed saved state at line {line}: {reason}")]
    MalformedState { line: usize, reason: String },
    #[error("no saved game found at {}", path.display())]
    NoSavedState { path: PathBuf },
    #[error("grid dimensions {found:?} do not match expected {expected:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("live seed probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LifeError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        LifeError::MalformedState { line, reason: reason.into() }
    }
}

pub type Result<T, E = LifeError> = std::result::Result<T, E>;
