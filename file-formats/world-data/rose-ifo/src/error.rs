//! Error handling for IFO parsing

use std::io;
use thiserror::Error;

use crate::types::BlockType;

/// Errors that can occur when working with IFO files
#[derive(Debug, Error)]
pub enum IfoError {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error from the underlying binary stream
    #[error(transparent)]
    Data(#[from] rose_data::Error),

    /// A count field is negative
    #[error("Invalid {what} count: {count}")]
    InvalidCount {
        /// The field being read
        what: &'static str,
        /// The stored value
        count: i32,
    },

    /// An offset table entry points before the start of the file
    #[error("Invalid offset {offset} for block {block}")]
    InvalidOffset {
        /// Raw block tag
        block: i32,
        /// Stored offset
        offset: i32,
    },

    /// A block would start beyond the range an offset can describe
    #[error("Block offset {0} does not fit in 32 bits")]
    OffsetOverflow(u64),

    /// An object carries a payload that its block cannot store
    #[error("{block} block cannot hold a {payload} payload")]
    PayloadMismatch {
        /// Block the object belongs to
        block: BlockType,
        /// Kind of payload found
        payload: &'static str,
    },

    /// Objects can only be added to object list blocks
    #[error("{0} block does not hold scene objects")]
    NotAnObjectList(BlockType),

    /// Data validation failed
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Type alias for Results from IFO operations
pub type Result<T> = std::result::Result<T, IfoError>;
