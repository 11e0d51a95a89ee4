//! Reader and writer for ROSE IFO scene files.
//!
//! Every map block has an IFO file listing what is placed on it: map
//! metadata, decorations, NPCs, buildings, sounds, effects, animated
//! models, monster spawn points, water planes, warp gates, collision
//! volumes and event triggers. The file is a table of thirteen blocks
//! addressed through absolute offsets.
//!
//! Objects are modelled as a shared [`ObjectHeader`] plus an
//! [`ObjectPayload`] chosen by the block they live in. An [`ObjectHandle`]
//! names an object by block and index, in place of a pointer to its owner.
//!
//! # Examples
//!
//! ```no_run
//! use glam::Vec3;
//! use rose_ifo::{BlockType, IfoFile, SceneObject};
//!
//! let mut ifo = IfoFile::load("30_30.ifo")?;
//! let handle = ifo.push(
//!     BlockType::Decoration,
//!     SceneObject::new(BlockType::Decoration)
//!         .with_object_id(12)
//!         .with_position(Vec3::new(5200.0, 5200.0, 10.0)),
//! )?;
//! println!("added {}", handle);
//! ifo.save("30_30.ifo")?;
//! # Ok::<(), rose_ifo::IfoError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod file;
pub mod object;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{IfoError, Result};
pub use file::IfoFile;
pub use object::{ObjectHeader, ObjectPayload, SceneObject};
pub use parser::{BlockEntry, IfoParser, read_block_table};
pub use types::{
    BLOCK_COUNT, BlockType, MapInfo, MonsterEntry, MonsterSpawn, ObjectHandle, ObjectType,
    WaterBlock, WaterPlane, WideWaterBlock, WideWaterCell,
};
pub use validation::validate_ifo_file;
