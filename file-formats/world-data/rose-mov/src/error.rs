//! Error handling for MOV parsing

use std::io;
use thiserror::Error;

/// Errors that can occur when working with MOV files
#[derive(Debug, Error)]
pub enum MovError {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error from the underlying binary stream
    #[error(transparent)]
    Data(#[from] rose_data::Error),

    /// The header declares a negative dimension
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Declared width
        width: i32,
        /// Declared height
        height: i32,
    },

    /// The in-memory grid is smaller than the fixed size written on save
    #[error("Walkability grid is {width}x{height}, at least {required}x{required} is required")]
    GridTooSmall {
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
        /// Required edge length
        required: usize,
    },
}

/// Type alias for Results from MOV operations
pub type Result<T> = std::result::Result<T, MovError>;
