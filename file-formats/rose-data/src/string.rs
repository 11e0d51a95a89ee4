//! Length-prefixed strings in the legacy single-byte text encoding.
//!
//! A string is stored as a `u8` byte count followed by that many bytes. Each
//! byte maps to the code point with the same value (ISO-8859-1), so any byte
//! sequence read from a file can be written back unchanged.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::io_ext::{ReadExt, WriteExt};

/// Longest string body the one-byte length prefix can describe
pub const MAX_STRING_LEN: usize = u8::MAX as usize;

/// Decodes legacy single-byte text
pub fn decode_legacy(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encodes text into the legacy single-byte encoding
pub fn encode_legacy(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| {
                Error::Encoding(format!(
                    "character {:?} (U+{:04X}) has no single-byte representation",
                    c,
                    u32::from(c)
                ))
            })
        })
        .collect()
}

/// Reads a length-prefixed legacy string
pub fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    let len = reader.read_u8()? as usize;
    let bytes = reader.read_bytes(len)?;
    Ok(decode_legacy(&bytes))
}

/// Writes a length-prefixed legacy string
pub fn write_string<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    let bytes = encode_legacy(text)?;
    let len = u8::try_from(bytes.len()).map_err(|_| {
        Error::Encoding(format!(
            "string of {} bytes exceeds the {} byte limit",
            bytes.len(),
            MAX_STRING_LEN
        ))
    })?;
    writer.write_u8(len)?;
    writer.write_all(&bytes)?;
    Ok(())
}
