//! Composite field types shared by the map formats.
//!
//! Vectors, quaternions and matrices are plain sequences of little-endian
//! `f32` values. World positions are stored in centimeters, with X and Y
//! shifted by [`POSITION_OFFSET`] so that the map origin sits at the
//! centre of the zone grid.

use std::io::{Read, Write};

use glam::{IVec2, Mat4, Quat, Vec3};

use crate::error::Result;
use crate::io_ext::{ReadExt, WriteExt};

/// Offset applied to X and Y when a position is stored (centimeters)
pub const POSITION_OFFSET: f32 = 520_000.0;

/// Stored units per in-memory unit (centimeters per meter)
pub const UNITS_PER_METER: f32 = 100.0;

/// Converts a stored position (centimeters, offset X/Y) to meters
pub fn decode_position(raw: Vec3) -> Vec3 {
    let offset = f64::from(POSITION_OFFSET);
    let scale = f64::from(UNITS_PER_METER);
    Vec3::new(
        ((f64::from(raw.x) + offset) / scale) as f32,
        ((f64::from(raw.y) + offset) / scale) as f32,
        (f64::from(raw.z) / scale) as f32,
    )
}

/// Converts a position in meters to its stored form
pub fn encode_position(position: Vec3) -> Vec3 {
    let offset = f64::from(POSITION_OFFSET);
    let scale = f64::from(UNITS_PER_METER);
    Vec3::new(
        (f64::from(position.x) * scale - offset) as f32,
        (f64::from(position.y) * scale - offset) as f32,
        (f64::from(position.z) * scale) as f32,
    )
}

pub fn read_vec3<R: Read>(reader: &mut R) -> Result<Vec3> {
    let x = reader.read_f32_le()?;
    let y = reader.read_f32_le()?;
    let z = reader.read_f32_le()?;
    Ok(Vec3::new(x, y, z))
}

pub fn write_vec3<W: Write>(writer: &mut W, v: Vec3) -> Result<()> {
    writer.write_f32_le(v.x)?;
    writer.write_f32_le(v.y)?;
    writer.write_f32_le(v.z)?;
    Ok(())
}

/// Reads a quaternion stored as x, y, z, w
pub fn read_quat<R: Read>(reader: &mut R) -> Result<Quat> {
    let x = reader.read_f32_le()?;
    let y = reader.read_f32_le()?;
    let z = reader.read_f32_le()?;
    let w = reader.read_f32_le()?;
    Ok(Quat::from_xyzw(x, y, z, w))
}

pub fn write_quat<W: Write>(writer: &mut W, q: Quat) -> Result<()> {
    writer.write_f32_le(q.x)?;
    writer.write_f32_le(q.y)?;
    writer.write_f32_le(q.z)?;
    writer.write_f32_le(q.w)?;
    Ok(())
}

/// Reads a 4x4 matrix stored as sixteen floats, M11 through M44.
///
/// The file uses the row-vector convention, so each stored row becomes a
/// glam column and the translation ends up in `w_axis`.
pub fn read_mat4<R: Read>(reader: &mut R) -> Result<Mat4> {
    let mut values = [0f32; 16];
    for value in &mut values {
        *value = reader.read_f32_le()?;
    }
    Ok(Mat4::from_cols_array(&values))
}

pub fn write_mat4<W: Write>(writer: &mut W, m: &Mat4) -> Result<()> {
    for value in m.to_cols_array() {
        writer.write_f32_le(value)?;
    }
    Ok(())
}

pub fn read_ivec2<R: Read>(reader: &mut R) -> Result<IVec2> {
    let x = reader.read_i32_le()?;
    let y = reader.read_i32_le()?;
    Ok(IVec2::new(x, y))
}

pub fn write_ivec2<W: Write>(writer: &mut W, v: IVec2) -> Result<()> {
    writer.write_i32_le(v.x)?;
    writer.write_i32_le(v.y)?;
    Ok(())
}

/// Reads a world position stored in X, Y, Z order
pub fn read_position<R: Read>(reader: &mut R) -> Result<Vec3> {
    Ok(decode_position(read_vec3(reader)?))
}

pub fn write_position<W: Write>(writer: &mut W, position: Vec3) -> Result<()> {
    write_vec3(writer, encode_position(position))
}

/// Reads a water-plane corner, which is stored in X, Z, Y order
pub fn read_water_position<R: Read>(reader: &mut R) -> Result<Vec3> {
    let x = reader.read_f32_le()?;
    let z = reader.read_f32_le()?;
    let y = reader.read_f32_le()?;
    Ok(decode_position(Vec3::new(x, y, z)))
}

pub fn write_water_position<W: Write>(writer: &mut W, position: Vec3) -> Result<()> {
    let raw = encode_position(position);
    writer.write_f32_le(raw.x)?;
    writer.write_f32_le(raw.z)?;
    writer.write_f32_le(raw.y)?;
    Ok(())
}
