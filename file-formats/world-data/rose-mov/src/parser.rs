//! Reading and writing MOV files

use std::io::{Read, Write};

use log::debug;
use rose_data::io_ext::{ReadExt, WriteExt};

use crate::error::{MovError, Result};
use crate::walkability::{MOV_GRID_SIZE, Walkability};

/// Parser for MOV walkability files
///
/// The layout is `i32 height, i32 width` followed by `height * width`
/// bytes in row-major order.
#[derive(Debug, Default, Clone, Copy)]
pub struct MovParser;

impl MovParser {
    /// Creates a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parses a MOV file from a reader
    pub fn parse<R: Read>(&self, reader: &mut R) -> Result<Walkability> {
        let height = reader.read_i32_le()?;
        let width = reader.read_i32_le()?;
        if height < 0 || width < 0 {
            return Err(MovError::InvalidDimensions { width, height });
        }

        let (w, h) = (width as usize, height as usize);
        let count = w
            .checked_mul(h)
            .ok_or(MovError::InvalidDimensions { width, height })?;
        debug!("Reading {}x{} walkability grid", w, h);

        let cells = reader.read_bytes(count)?;
        Ok(Walkability {
            width: w,
            height: h,
            cells,
        })
    }

    /// Writes a grid as a fixed 32x32 MOV file
    ///
    /// Only the top-left 32x32 cells are written; a smaller grid is rejected
    /// before any bytes reach the writer.
    pub fn write<W: Write>(&self, writer: &mut W, grid: &Walkability) -> Result<()> {
        grid.ensure_writable()?;

        writer.write_i32_le(MOV_GRID_SIZE as i32)?;
        writer.write_i32_le(MOV_GRID_SIZE as i32)?;
        for row in grid.rows().take(MOV_GRID_SIZE) {
            writer.write_all(&row[..MOV_GRID_SIZE])?;
        }

        debug!("Wrote {}x{} walkability grid", MOV_GRID_SIZE, MOV_GRID_SIZE);
        Ok(())
    }
}
