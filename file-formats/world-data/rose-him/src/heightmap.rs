//! In-memory terrain heightmap

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::bounds::TerrainBounds;
use crate::error::{HimError, Result};
use crate::parser::HimParser;

pub use rose_data::types::UNITS_PER_METER;

/// Samples per edge of the grid written on save
pub const HIM_GRID_SIZE: usize = 65;
/// Value written to the header's grid count field
pub const HIM_GRID_COUNT: i32 = 4;
/// Value written to the header's grid size field
pub const HIM_GRID_SPACING: f32 = 250.0;

/// Terrain heights for one map block
///
/// Heights are kept in meters; the file stores centimeters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heightmap {
    /// Samples per row
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Grid count field from the header
    pub grid_count: i32,
    /// Grid size field from the header
    pub grid_size: f32,
    /// Row-major heights in meters (`heights[y * width + x]`)
    pub heights: Vec<f32>,
    /// Bounding heights stored after the grid, when the file had them
    pub bounds: Option<TerrainBounds>,
}

impl Default for Heightmap {
    fn default() -> Self {
        Self::new(HIM_GRID_SIZE, HIM_GRID_SIZE)
    }
}

impl Heightmap {
    /// Creates a flat heightmap at height zero
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid_count: HIM_GRID_COUNT,
            grid_size: HIM_GRID_SPACING,
            heights: vec![0.0; width * height],
            bounds: None,
        }
    }

    /// Creates a heightmap from row-major heights in meters
    ///
    /// Returns `None` when `heights` does not hold exactly `width * height` values.
    pub fn from_heights(width: usize, height: usize, heights: Vec<f32>) -> Option<Self> {
        if heights.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            heights,
            ..Self::new(0, 0)
        })
    }

    /// Reads a HIM file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        HimParser::new().parse(&mut reader)
    }

    /// Writes the heightmap to disk using the default quadrant layout
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        HimParser::new().save(path, self)
    }

    /// Height in meters at a sample
    pub fn height_at(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            self.heights.get(y * self.width + x).copied()
        } else {
            None
        }
    }

    /// Sets the height in meters at a sample, ignoring coordinates outside the grid
    pub fn set_height(&mut self, x: usize, y: usize, value: f32) {
        if x < self.width && y < self.height {
            self.heights[y * self.width + x] = value;
        }
    }

    /// Lowest and highest sample, or `None` for an empty grid
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.heights.iter().fold(None, |range, &h| match range {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
    }

    /// Checks that the grid covers the 65x65 samples written on save
    pub(crate) fn ensure_writable(&self) -> Result<()> {
        if self.width < HIM_GRID_SIZE
            || self.height < HIM_GRID_SIZE
            || self.heights.len() < self.width * self.height
        {
            return Err(HimError::GridTooSmall {
                width: self.width,
                height: self.height,
                required: HIM_GRID_SIZE,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Heightmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HIM heightmap ({}x{} samples)", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let map = Heightmap::default();
        assert_eq!(map.width, 65);
        assert_eq!(map.height, 65);
        assert_eq!(map.heights.len(), 65 * 65);
        assert_eq!(map.grid_count, 4);
        assert_eq!(map.grid_size, 250.0);
    }

    #[test]
    fn test_height_access() {
        let mut map = Heightmap::new(3, 2);
        map.set_height(2, 1, 12.5);
        assert_eq!(map.height_at(2, 1), Some(12.5));
        assert_eq!(map.heights[5], 12.5);
        assert_eq!(map.height_at(3, 0), None);
        assert_eq!(map.height_range(), Some((0.0, 12.5)));
    }

    #[test]
    fn test_from_heights() {
        let map = Heightmap::from_heights(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(map.width, 2);
        assert_eq!(map.height_at(1, 1), Some(4.0));
        assert!(Heightmap::from_heights(2, 2, vec![1.0]).is_none());
    }

    #[test]
    fn test_empty_range() {
        assert_eq!(Heightmap::new(0, 0).height_range(), None);
    }
}
