use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};

/// Extension trait for reading little-endian values from a reader
pub trait ReadExt: Read {
    fn read_u8(&mut self) -> Result<u8> {
        Ok(ReadBytesExt::read_u8(self)?)
    }

    fn read_i16_le(&mut self) -> Result<i16> {
        Ok(ReadBytesExt::read_i16::<LittleEndian>(self)?)
    }

    fn read_i32_le(&mut self) -> Result<i32> {
        Ok(ReadBytesExt::read_i32::<LittleEndian>(self)?)
    }

    fn read_u32_le(&mut self) -> Result<u32> {
        Ok(ReadBytesExt::read_u32::<LittleEndian>(self)?)
    }

    fn read_f32_le(&mut self) -> Result<f32> {
        Ok(ReadBytesExt::read_f32::<LittleEndian>(self)?)
    }

    /// Reads a four-byte tag such as `b"quad"`
    fn read_tag(&mut self) -> Result<[u8; 4]> {
        let mut tag = [0u8; 4];
        self.read_exact(&mut tag)?;
        Ok(tag)
    }

    /// Reads `count` raw bytes.
    ///
    /// The buffer grows with the data actually present, so a corrupt count
    /// fails with a truncation error instead of a huge allocation.
    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(count.min(64 * 1024));
        Read::take(&mut *self, count as u64).read_to_end(&mut buf)?;
        if buf.len() != count {
            return Err(Error::StreamTruncated);
        }
        Ok(buf)
    }
}

/// Extension trait for writing little-endian values to a writer
pub trait WriteExt: Write {
    fn write_u8(&mut self, n: u8) -> Result<()> {
        Ok(WriteBytesExt::write_u8(self, n)?)
    }

    fn write_i16_le(&mut self, n: i16) -> Result<()> {
        Ok(WriteBytesExt::write_i16::<LittleEndian>(self, n)?)
    }

    fn write_i32_le(&mut self, n: i32) -> Result<()> {
        Ok(WriteBytesExt::write_i32::<LittleEndian>(self, n)?)
    }

    fn write_u32_le(&mut self, n: u32) -> Result<()> {
        Ok(WriteBytesExt::write_u32::<LittleEndian>(self, n)?)
    }

    fn write_f32_le(&mut self, n: f32) -> Result<()> {
        Ok(WriteBytesExt::write_f32::<LittleEndian>(self, n)?)
    }

    fn write_tag(&mut self, tag: &[u8; 4]) -> Result<()> {
        Ok(self.write_all(tag)?)
    }
}

impl<R: Read + ?Sized> ReadExt for R {}
impl<W: Write + ?Sized> WriteExt for W {}

#[cfg(test)]
mod tests {
    use super::{ReadExt, WriteExt};
    use crate::error::Error;
    use std::io::Cursor;

    #[test]
    fn test_little_endian_layout() {
        let mut buf = Vec::new();
        buf.write_i32_le(0x0102_0304).unwrap();
        buf.write_i16_le(-2).unwrap();
        buf.write_f32_le(250.0).unwrap();
        assert_eq!(&buf[..4], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&buf[4..6], &[0xFE, 0xFF]);

        let mut cursor = Cursor::new(buf);
        assert_eq!(cursor.read_i32_le().unwrap(), 0x0102_0304);
        assert_eq!(cursor.read_i16_le().unwrap(), -2);
        assert_eq!(cursor.read_f32_le().unwrap(), 250.0);
    }

    #[test]
    fn test_read_bytes_truncated() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3]);
        assert!(matches!(cursor.read_bytes(4), Err(Error::StreamTruncated)));

        let mut cursor = Cursor::new(vec![1u8, 2, 3]);
        assert_eq!(cursor.read_bytes(2).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_short_read_is_truncation() {
        let mut cursor = Cursor::new(vec![1u8, 2]);
        assert!(matches!(cursor.read_i32_le(), Err(Error::StreamTruncated)));
    }
}
