//! Error types for partviz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in partviz operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Input magnitudes sum to zero, so proportional shares are undefined.
    #[error("Input sum is zero: proportional shares are undefined")]
    ZeroTotal,

    /// Negative or non-finite magnitude in the input.
    #[error("Invalid magnitude {value} at index {index}: must be finite and non-negative")]
    InvalidValue {
        /// Position of the offending entry.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Invalid dimensions for a framebuffer or chart.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}
