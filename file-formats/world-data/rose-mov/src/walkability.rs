//! In-memory walkability grid

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{MovError, Result};
use crate::parser::MovParser;

/// Cells per edge of the grid written on save
pub const MOV_GRID_SIZE: usize = 32;

/// Per-cell walkability flags for one map block
///
/// Cells are stored row-major; a non-zero byte marks a walkable cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Walkability {
    /// Cells per row
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Row-major cell flags (`cells[y * width + x]`)
    pub cells: Vec<u8>,
}

impl Default for Walkability {
    fn default() -> Self {
        Self::new(MOV_GRID_SIZE, MOV_GRID_SIZE)
    }
}

impl Walkability {
    /// Creates a grid with every cell blocked
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Creates a grid from row-major cells
    ///
    /// Returns `None` when `cells` does not hold exactly `width * height` values.
    pub fn from_cells(width: usize, height: usize, cells: Vec<u8>) -> Option<Self> {
        (cells.len() == width * height).then_some(Self {
            width,
            height,
            cells,
        })
    }

    /// Reads a MOV file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        MovParser::new().parse(&mut reader)
    }

    /// Writes the grid to disk as a 32x32 MOV file
    ///
    /// An undersized grid is rejected before the target file is touched.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.ensure_writable()?;
        let mut writer = BufWriter::new(File::create(path)?);
        MovParser::new().write(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Raw flag at a cell
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x).copied()
        } else {
            None
        }
    }

    /// Sets the raw flag at a cell, ignoring coordinates outside the grid
    pub fn set_cell(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = value;
        }
    }

    /// Whether a cell can be walked on
    pub fn is_walkable(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(|v| v != 0)
    }

    /// Number of walkable cells
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Checks that the grid covers the 32x32 cells written on save
    pub(crate) fn ensure_writable(&self) -> Result<()> {
        if self.width < MOV_GRID_SIZE
            || self.height < MOV_GRID_SIZE
            || self.cells.len() < self.width * self.height
        {
            return Err(MovError::GridTooSmall {
                width: self.width,
                height: self.height,
                required: MOV_GRID_SIZE,
            });
        }
        Ok(())
    }

    /// Iterates over rows
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width.max(1))
    }
}

impl fmt::Display for Walkability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MOV walkability ({}x{} cells, {} walkable)",
            self.width,
            self.height,
            self.walkable_count()
        )
    }
}
