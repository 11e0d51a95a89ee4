//! Binary stream helpers shared by the ROSE map file crates.
//!
//! Every map format is little-endian with fixed-width fields, one-byte
//! length-prefixed strings and centimeter-scaled positions. This crate owns
//! those primitives so the format crates only describe layouts.

#![forbid(unsafe_code)]

pub mod error;
pub mod io_ext;
pub mod string;
pub mod types;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::io_ext::{ReadExt, WriteExt};
    pub use crate::string::{read_string, write_string};
    pub use crate::types::{
        read_ivec2, read_mat4, read_position, read_quat, read_vec3, read_water_position,
        write_ivec2, write_mat4, write_position, write_quat, write_vec3, write_water_position,
    };
    pub use std::io::{Read, Seek, SeekFrom, Write};
}
