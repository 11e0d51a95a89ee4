//! Reader and writer for ROSE HIM terrain heightmaps.
//!
//! Each map block stores its terrain as a grid of heights in centimeters,
//! followed by a `quad` trailer with the bounding heights of every 5x5 patch
//! and of 85 quadrants built over the patch grid. This crate keeps heights
//! in meters and recomputes the trailer whenever a heightmap is written.
//!
//! # Examples
//!
//! ```no_run
//! use rose_him::Heightmap;
//!
//! let mut heightmap = Heightmap::load("30_30.him")?;
//! heightmap.set_height(32, 32, 12.5);
//! heightmap.save("30_30.him")?;
//! # Ok::<(), rose_him::HimError>(())
//! ```
//!
//! The bounding heights can also be inspected without writing:
//!
//! ```
//! use rose_him::{Heightmap, QuadrantLayout, compute_bounds};
//!
//! let heightmap = Heightmap::default();
//! let bounds = compute_bounds(&heightmap, &QuadrantLayout::quad_tree())?;
//! assert_eq!(bounds.patches.len(), 256);
//! assert_eq!(bounds.quadrants.len(), 85);
//! # Ok::<(), rose_him::HimError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bounds;
pub mod error;
pub mod heightmap;
pub mod parser;

pub use bounds::{
    HeightBounds, PATCH_COUNT, PATCH_GRID_SIZE, QUADRANT_COUNT, QuadrantLayout, QuadrantRange,
    TerrainBounds, TerrainPatch, TerrainQuadrant, compute_bounds, compute_patches,
    compute_quadrants, flipped_samples,
};
pub use error::{HimError, Result};
pub use heightmap::{HIM_GRID_SIZE, Heightmap};
pub use parser::HimParser;
