//! The error type shared by every operation in this crate

use core::fmt;

/// A validation failure. None of these are retryable: the same input fails the same way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A seed was not exactly the length the parameter set requires
    InvalidSeedLength { expected: usize, actual: usize },
    /// A byte buffer was the wrong length for the matrix it should hold
    InvalidBufferLength { expected: usize, actual: usize },
    /// A plaintext was not exactly `Params::message_len` bytes
    InvalidInputLength { expected: usize, actual: usize },
    /// Two matrices, or a matrix and a requested shape, disagree. Shapes are (rows, cols)
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSeedLength { expected, actual } => {
                write!(f, "invalid seed length: expected {expected} bytes, got {actual}")
            }
            Error::InvalidBufferLength { expected, actual } => {
                write!(f, "invalid buffer length: expected {expected} bytes, got {actual}")
            }
            Error::InvalidInputLength { expected, actual } => {
                write!(f, "invalid input length: expected {expected} bytes, got {actual}")
            }
            Error::DimensionMismatch { left, right } => write!(
                f,
                "dimension mismatch: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
        }
    }
}

impl core::error::Error for Error {}

/// Result type for every fallible operation in this crate
pub type Result<T> = core::result::Result<T, Error>;
