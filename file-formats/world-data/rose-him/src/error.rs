//! Error handling for HIM parsing

use std::io;
use thiserror::Error;

/// Errors that can occur when working with HIM files
#[derive(Debug, Error)]
pub enum HimError {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error from the underlying binary stream
    #[error(transparent)]
    Data(#[from] rose_data::Error),

    /// The header declares a negative or unaddressable grid
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Declared width
        width: i32,
        /// Declared height
        height: i32,
    },

    /// The in-memory grid is smaller than the fixed size written on save
    #[error("Height grid is {width}x{height}, at least {required}x{required} is required")]
    GridTooSmall {
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
        /// Required edge length
        required: usize,
    },

    /// A quadrant table does not describe 85 ranges inside the patch grid
    #[error("Invalid quadrant layout: {0}")]
    InvalidQuadrantLayout(String),

    /// The bounding-height trailer is malformed
    #[error("Invalid bounds trailer: {0}")]
    InvalidTrailer(String),
}

/// Type alias for Results from HIM operations
pub type Result<T> = std::result::Result<T, HimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = HimError::GridTooSmall {
            width: 64,
            height: 65,
            required: 65,
        };
        assert_eq!(
            format!("{}", error),
            "Height grid is 64x65, at least 65x65 is required"
        );

        let error = HimError::InvalidQuadrantLayout("expected 85 ranges, found 3".to_string());
        assert_eq!(
            format!("{}", error),
            "Invalid quadrant layout: expected 85 ranges, found 3"
        );
    }
}
