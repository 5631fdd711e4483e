//! Error types for the calcium measurement pipeline
//!
//! Only malformed input aborts a run. Flat histograms and empty masks are
//! ordinary outcomes and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons an intensity array is rejected before any stage runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("image has no pixels ({width}x{height})")]
    Empty { width: usize, height: usize },

    #[error("row {row} has {found} pixels, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("intensity at row {row}, column {col} is outside 0..=255")]
    IntensityOutOfRange { row: usize, col: usize },

    #[error("image dimensions {width}x{height} overflow the addressable pixel count")]
    TooLarge { width: usize, height: usize },

    #[error("buffer holds {len} pixels but {width}x{height} requires {expected}")]
    BufferSize {
        len: usize,
        width: usize,
        height: usize,
        expected: usize,
    },
}

/// Top-level error for configured pipeline runs and output writing
#[derive(Error, Debug)]
pub enum CalciumError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, CalciumError>;
