//! Bounding heights derived from the height grid on save
//!
//! The 65x65 grid is cut into a 16x16 array of patches. Each patch is a 5x5
//! window of samples, so neighbouring patches share their border row and
//! column (16 * 4 + 1 = 65). Every patch is reduced to its highest and lowest
//! sample, and 85 quadrants then reduce rectangular ranges of patches.
//!
//! All values are in stored units (centimeters).

use crate::error::{HimError, Result};
use crate::heightmap::{HIM_GRID_SIZE, Heightmap};

/// Patches per edge of the patch grid
pub const PATCH_GRID_SIZE: usize = 16;
/// Number of patches written to the trailer
pub const PATCH_COUNT: usize = PATCH_GRID_SIZE * PATCH_GRID_SIZE;
/// Samples per edge of a patch
pub const PATCH_SAMPLES: usize = 5;
/// Distance between the first samples of neighbouring patches
pub const PATCH_STRIDE: usize = PATCH_SAMPLES - 1;
/// Number of quadrants written to the trailer
pub const QUADRANT_COUNT: usize = 85;

/// Starting value for a quadrant's maximum height
pub const QUADRANT_MAXIMUM_SEED: f32 = -10.0;
/// Starting value for a quadrant's minimum height
pub const QUADRANT_MINIMUM_SEED: f32 = 10_000.0;

/// A maximum/minimum height pair as stored in the trailer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeightBounds {
    /// Highest height
    pub maximum_height: f32,
    /// Lowest height
    pub minimum_height: f32,
}

/// One 5x5 window of the height grid
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainPatch {
    /// Samples, `heights[k * 5 + l]` for row `k` and column `l`
    pub heights: [f32; PATCH_SAMPLES * PATCH_SAMPLES],
    /// Highest of the 25 samples
    pub maximum_height: f32,
    /// Lowest of the 25 samples
    pub minimum_height: f32,
}

impl TerrainPatch {
    /// Builds a patch from its samples and scans them for the height range
    ///
    /// The result is the true highest and lowest sample, so written patch
    /// bounds can differ from files saved by the original map editor.
    pub fn from_heights(heights: [f32; PATCH_SAMPLES * PATCH_SAMPLES]) -> Self {
        let mut maximum_height = f32::MIN;
        let mut minimum_height = f32::MAX;
        for &h in &heights {
            if h > maximum_height {
                maximum_height = h;
            }
            if h < minimum_height {
                minimum_height = h;
            }
        }

        Self {
            heights,
            maximum_height,
            minimum_height,
        }
    }

    /// The patch's height range
    pub fn bounds(&self) -> HeightBounds {
        HeightBounds {
            maximum_height: self.maximum_height,
            minimum_height: self.minimum_height,
        }
    }
}

/// Half-open rectangle of patch indices covered by a quadrant
///
/// `x` indexes patch columns and `y` indexes patch rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadrantRange {
    /// First patch column
    pub x_start: usize,
    /// One past the last patch column
    pub x_end: usize,
    /// First patch row
    pub y_start: usize,
    /// One past the last patch row
    pub y_end: usize,
}

impl QuadrantRange {
    /// Creates a range covering columns `x_start..x_end` and rows `y_start..y_end`
    pub fn new(x_start: usize, x_end: usize, y_start: usize, y_end: usize) -> Self {
        Self {
            x_start,
            x_end,
            y_start,
            y_end,
        }
    }

    /// Whether the range covers no patch
    pub fn is_empty(&self) -> bool {
        self.x_start >= self.x_end || self.y_start >= self.y_end
    }

    /// Number of patches covered
    pub fn patch_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.x_end - self.x_start) * (self.y_end - self.y_start)
        }
    }
}

/// The table assigning a patch range to each of the 85 quadrants
///
/// The format does not record how quadrants map onto patches; the table is
/// supplied by the caller. [`QuadrantLayout::unpopulated`] leaves every
/// range empty, so each quadrant keeps its seed values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadrantLayout {
    ranges: Vec<QuadrantRange>,
}

impl Default for QuadrantLayout {
    fn default() -> Self {
        Self::unpopulated()
    }
}

impl QuadrantLayout {
    /// A layout where no quadrant references any patch
    pub fn unpopulated() -> Self {
        Self {
            ranges: vec![QuadrantRange::default(); QUADRANT_COUNT],
        }
    }

    /// A four-level quad tree over the patch grid
    ///
    /// Quadrant 0 covers all 16x16 patches, followed by 4 quadrants of 8x8,
    /// 16 of 4x4 and 64 of 2x2, each level in row-major order.
    pub fn quad_tree() -> Self {
        let mut ranges = Vec::with_capacity(QUADRANT_COUNT);
        for level in 0..4 {
            let divisions = 1usize << level;
            let span = PATCH_GRID_SIZE / divisions;
            for qy in 0..divisions {
                for qx in 0..divisions {
                    ranges.push(QuadrantRange::new(
                        qx * span,
                        (qx + 1) * span,
                        qy * span,
                        (qy + 1) * span,
                    ));
                }
            }
        }
        Self { ranges }
    }

    /// Builds a layout from an explicit table
    pub fn from_ranges(ranges: Vec<QuadrantRange>) -> Result<Self> {
        if ranges.len() != QUADRANT_COUNT {
            return Err(HimError::InvalidQuadrantLayout(format!(
                "expected {} ranges, found {}",
                QUADRANT_COUNT,
                ranges.len()
            )));
        }

        for (index, range) in ranges.iter().enumerate() {
            if range.x_end > PATCH_GRID_SIZE || range.y_end > PATCH_GRID_SIZE {
                return Err(HimError::InvalidQuadrantLayout(format!(
                    "quadrant {} extends past the {}x{} patch grid: {:?}",
                    index, PATCH_GRID_SIZE, PATCH_GRID_SIZE, range
                )));
            }
        }

        Ok(Self { ranges })
    }

    /// The 85 ranges in trailer order
    pub fn ranges(&self) -> &[QuadrantRange] {
        &self.ranges
    }
}

/// A quadrant and its aggregated height range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainQuadrant {
    /// Patches covered by the quadrant
    pub range: QuadrantRange,
    /// Largest patch maximum in range, never below the seed
    pub maximum_height: f32,
    /// Smallest patch minimum in range, never above the seed
    pub minimum_height: f32,
}

impl TerrainQuadrant {
    /// The quadrant's height range
    pub fn bounds(&self) -> HeightBounds {
        HeightBounds {
            maximum_height: self.maximum_height,
            minimum_height: self.minimum_height,
        }
    }
}

/// Patch and quadrant aggregates as they appear in the `quad` trailer
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainBounds {
    /// Patch aggregates, row-major over the 16x16 patch grid
    pub patches: Vec<HeightBounds>,
    /// Quadrant aggregates in layout order
    pub quadrants: Vec<HeightBounds>,
}

/// Returns the 65x65 grid in centimeters, flipped vertically
///
/// Row `64 - y` of the result holds row `y` of the heightmap. Patch rows are
/// laid out from the bottom of the in-memory grid.
pub fn flipped_samples(heightmap: &Heightmap) -> Result<Vec<f32>> {
    heightmap.ensure_writable()?;

    let mut samples = vec![0f32; HIM_GRID_SIZE * HIM_GRID_SIZE];
    for y in 0..HIM_GRID_SIZE {
        for x in 0..HIM_GRID_SIZE {
            samples[(HIM_GRID_SIZE - 1 - y) * HIM_GRID_SIZE + x] =
                heightmap.heights[y * heightmap.width + x] * crate::heightmap::UNITS_PER_METER;
        }
    }
    Ok(samples)
}

/// Cuts a flipped 65x65 sample grid into 16x16 patches
///
/// Within a patch the row index is mirrored again:
/// `patch[i][j].heights[k * 5 + l] = samples[i * 4 + (4 - k)][j * 4 + l]`.
/// The result is row-major, `patches[i * 16 + j]`.
pub fn compute_patches(samples: &[f32]) -> Vec<TerrainPatch> {
    let mut patches = Vec::with_capacity(PATCH_COUNT);
    for i in 0..PATCH_GRID_SIZE {
        for j in 0..PATCH_GRID_SIZE {
            let mut heights = [0f32; PATCH_SAMPLES * PATCH_SAMPLES];
            for k in 0..PATCH_SAMPLES {
                let row = i * PATCH_STRIDE + (PATCH_STRIDE - k);
                for l in 0..PATCH_SAMPLES {
                    let column = j * PATCH_STRIDE + l;
                    heights[k * PATCH_SAMPLES + l] = samples[row * HIM_GRID_SIZE + column];
                }
            }
            patches.push(TerrainPatch::from_heights(heights));
        }
    }
    patches
}

/// Aggregates patches into quadrants
///
/// Each quadrant takes the largest patch maximum and the smallest patch
/// minimum over its range, starting from the seed values.
pub fn compute_quadrants(patches: &[TerrainPatch], layout: &QuadrantLayout) -> Vec<TerrainQuadrant> {
    layout
        .ranges()
        .iter()
        .map(|&range| {
            let mut maximum_height = QUADRANT_MAXIMUM_SEED;
            let mut minimum_height = QUADRANT_MINIMUM_SEED;
            for y in range.y_start..range.y_end {
                for x in range.x_start..range.x_end {
                    let patch = &patches[y * PATCH_GRID_SIZE + x];
                    maximum_height = maximum_height.max(patch.maximum_height);
                    minimum_height = minimum_height.min(patch.minimum_height);
                }
            }
            TerrainQuadrant {
                range,
                maximum_height,
                minimum_height,
            }
        })
        .collect()
}

/// Computes the trailer aggregates for a heightmap
pub fn compute_bounds(heightmap: &Heightmap, layout: &QuadrantLayout) -> Result<TerrainBounds> {
    let samples = flipped_samples(heightmap)?;
    Ok(bounds_from_samples(&samples, layout))
}

pub(crate) fn bounds_from_samples(samples: &[f32], layout: &QuadrantLayout) -> TerrainBounds {
    let patches = compute_patches(samples);
    let quadrants = compute_quadrants(&patches, layout);
    TerrainBounds {
        patches: patches.iter().map(TerrainPatch::bounds).collect(),
        quadrants: quadrants.iter().map(TerrainQuadrant::bounds).collect(),
    }
}
