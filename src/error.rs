//! Error types for the simulation engine and its exporters

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the engine, the history codec and the exporters
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("{name} must be positive, got {value}")]
    InvalidParameter { name: &'static str, value: usize },

    #[error("frame count {frames} is out of range for a history of {steps} steps")]
    FrameCount { frames: usize, steps: usize },

    #[error(
        "shape mismatch: expected {expected_rows}x{expected_cols}, got {actual_rows}x{actual_cols}"
    )]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    #[error("cell ({row}, {col}) is out of bounds for a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("simulation is not finished, run `simulate()` first")]
    NotFinished,

    #[error("destination {} must have a `.{expected}` extension", .path.display())]
    InvalidDestination {
        path: PathBuf,
        expected: &'static str,
    },

    #[error("cell buffer holds {actual} values, expected {expected}")]
    CellCount { expected: usize, actual: usize },

    #[error("cannot reshape {total_rows} rows into {steps} steps")]
    InvalidReshape { total_rows: usize, steps: usize },

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("image of {width}x{height} pixels is too large for a GIF frame")]
    ImageTooLarge { width: usize, height: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to encode animation: {0}")]
    Animation(#[from] gif::EncodingError),

    #[error("failed to serialize history metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

impl LifeError {
    pub(crate) fn shape(expected: (usize, usize), actual: (usize, usize)) -> Self {
        LifeError::ShapeMismatch {
            expected_rows: expected.0,
            expected_cols: expected.1,
            actual_rows: actual.0,
            actual_cols: actual.1,
        }
    }
}

pub type LifeResult<T> = Result<T, LifeError>;
