//! Reader and writer for ROSE MOV walkability files.
//!
//! A MOV file accompanies each map block and marks which terrain cells can
//! be walked on. The grid is read at whatever size the header declares and
//! always written back as 32x32.
//!
//! # Examples
//!
//! ```no_run
//! use rose_mov::Walkability;
//!
//! let mut grid = Walkability::load("30_30.mov")?;
//! grid.set_cell(4, 9, 1);
//! grid.save("30_30.mov")?;
//! # Ok::<(), rose_mov::MovError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod parser;
pub mod walkability;

pub use error::{MovError, Result};
pub use parser::MovParser;
pub use walkability::{MOV_GRID_SIZE, Walkability};
