//! Reading and writing HIM files
//!
//! ```text
//! i32 height, i32 width, i32 grid_count, f32 grid_size
//! f32[height * width]            row-major, centimeters
//! "quad"                         bounding-height trailer
//! i32 256, {f32 max, f32 min}[256]
//! i32 85,  {f32 max, f32 min}[85]
//! ```

use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

use log::{debug, warn};
use rose_data::io_ext::{ReadExt, WriteExt};

use crate::bounds::{
    HeightBounds, PATCH_COUNT, QUADRANT_COUNT, QuadrantLayout, TerrainBounds,
    bounds_from_samples, flipped_samples,
};
use crate::error::{HimError, Result};
use crate::heightmap::{HIM_GRID_COUNT, HIM_GRID_SIZE, HIM_GRID_SPACING, Heightmap, UNITS_PER_METER};

/// Tag opening the bounding-height trailer
pub const QUAD_TAG: [u8; 4] = *b"quad";

/// Parser for HIM heightmap files
///
/// Reading accepts any grid size. Writing always emits a 65x65 grid followed
/// by freshly computed patch and quadrant bounds; the quadrant table used for
/// the latter is configured with [`HimParser::with_quadrant_layout`].
///
/// # Examples
///
/// ```rust,no_run
/// use rose_him::{Heightmap, HimParser, QuadrantLayout};
///
/// let heightmap = Heightmap::load("30_30.him")?;
/// HimParser::new()
///     .with_quadrant_layout(QuadrantLayout::quad_tree())
///     .save("30_30.him", &heightmap)?;
/// # Ok::<(), rose_him::HimError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HimParser {
    layout: QuadrantLayout,
}

impl HimParser {
    /// Creates a parser with an unpopulated quadrant layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `layout` when computing quadrant bounds on write
    pub fn with_quadrant_layout(mut self, layout: QuadrantLayout) -> Self {
        self.layout = layout;
        self
    }

    /// The quadrant layout used on write
    pub fn quadrant_layout(&self) -> &QuadrantLayout {
        &self.layout
    }

    /// Parses a HIM file from a reader
    ///
    /// Heights are converted from centimeters to meters. A `quad` trailer, if
    /// present and well formed, is kept in [`Heightmap::bounds`].
    pub fn parse<R: Read>(&self, reader: &mut R) -> Result<Heightmap> {
        let height = reader.read_i32_le()?;
        let width = reader.read_i32_le()?;
        let grid_count = reader.read_i32_le()?;
        let grid_size = reader.read_f32_le()?;

        if height < 0 || width < 0 {
            return Err(HimError::InvalidDimensions { width, height });
        }
        let (w, h) = (width as usize, height as usize);
        let count = w
            .checked_mul(h)
            .ok_or(HimError::InvalidDimensions { width, height })?;
        debug!("Reading {}x{} height grid", w, h);

        let mut heights = Vec::with_capacity(count.min(HIM_GRID_SIZE * HIM_GRID_SIZE));
        for _ in 0..count {
            heights.push(reader.read_f32_le()? / UNITS_PER_METER);
        }

        let mut rest = Vec::new();
        reader.read_to_end(&mut rest)?;
        let bounds = if rest.is_empty() {
            None
        } else {
            match parse_trailer(&rest) {
                Ok(bounds) => Some(bounds),
                Err(e) => {
                    warn!("Ignoring unreadable bounds trailer: {}", e);
                    None
                }
            }
        };

        Ok(Heightmap {
            width: w,
            height: h,
            grid_count,
            grid_size,
            heights,
            bounds,
        })
    }

    /// Writes a heightmap as a 65x65 HIM file with its bounds trailer
    pub fn write<W: Write>(&self, writer: &mut W, heightmap: &Heightmap) -> Result<()> {
        let samples = flipped_samples(heightmap)?;

        writer.write_i32_le(HIM_GRID_SIZE as i32)?;
        writer.write_i32_le(HIM_GRID_SIZE as i32)?;
        writer.write_i32_le(HIM_GRID_COUNT)?;
        writer.write_f32_le(HIM_GRID_SPACING)?;

        // Samples are flipped, so file rows come out bottom row first
        for row in samples.chunks_exact(HIM_GRID_SIZE).rev() {
            for &value in row {
                writer.write_f32_le(value)?;
            }
        }

        let bounds = bounds_from_samples(&samples, &self.layout);
        write_trailer(writer, &bounds)?;

        debug!(
            "Wrote {}x{} height grid with {} patch and {} quadrant bounds",
            HIM_GRID_SIZE,
            HIM_GRID_SIZE,
            bounds.patches.len(),
            bounds.quadrants.len()
        );
        Ok(())
    }

    /// Writes a heightmap to disk
    ///
    /// An undersized grid is rejected before the target file is touched.
    pub fn save(&self, path: impl AsRef<Path>, heightmap: &Heightmap) -> Result<()> {
        heightmap.ensure_writable()?;
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer, heightmap)?;
        writer.flush()?;
        Ok(())
    }
}

fn write_trailer<W: Write>(writer: &mut W, bounds: &TerrainBounds) -> Result<()> {
    writer.write_tag(&QUAD_TAG)?;
    write_bounds(writer, &bounds.patches)?;
    write_bounds(writer, &bounds.quadrants)?;
    Ok(())
}

fn write_bounds<W: Write>(writer: &mut W, bounds: &[HeightBounds]) -> Result<()> {
    writer.write_i32_le(bounds.len() as i32)?;
    for b in bounds {
        writer.write_f32_le(b.maximum_height)?;
        writer.write_f32_le(b.minimum_height)?;
    }
    Ok(())
}

fn parse_trailer(data: &[u8]) -> Result<TerrainBounds> {
    let mut cursor = Cursor::new(data);
    let tag = cursor.read_tag()?;
    if tag != QUAD_TAG {
        return Err(HimError::InvalidTrailer(format!(
            "expected tag 'quad', found {:?}",
            String::from_utf8_lossy(&tag)
        )));
    }

    let patches = read_bounds(&mut cursor, data.len())?;
    let quadrants = read_bounds(&mut cursor, data.len())?;
    if patches.len() != PATCH_COUNT || quadrants.len() != QUADRANT_COUNT {
        debug!(
            "Bounds trailer holds {} patches and {} quadrants",
            patches.len(),
            quadrants.len()
        );
    }

    Ok(TerrainBounds { patches, quadrants })
}

fn read_bounds(cursor: &mut Cursor<&[u8]>, len: usize) -> Result<Vec<HeightBounds>> {
    let count = cursor.read_i32_le()?;
    let remaining = len.saturating_sub(cursor.position() as usize);
    if count < 0 || count as usize > remaining / 8 {
        return Err(HimError::InvalidTrailer(format!(
            "bounds count {} does not fit in {} remaining bytes",
            count, remaining
        )));
    }

    let mut bounds = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let maximum_height = cursor.read_f32_le()?;
        let minimum_height = cursor.read_f32_le()?;
        bounds.push(HeightBounds {
            maximum_height,
            minimum_height,
        });
    }
    Ok(bounds)
}
