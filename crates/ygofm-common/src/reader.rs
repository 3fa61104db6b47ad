//! Little-endian cursor over an image.
//!
//! A failed read returns [`Error::UnexpectedEof`] and does not move the
//! cursor, so callers can stop a table walk at the first short entry and keep
//! what they already have.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// Cursor over a borrowed image slice.
///
/// ```
/// use ygofm_common::BinaryReader;
///
/// // two u16 pointer entries, then a short tail
/// let table = [0x10, 0x00, 0x2A, 0x01, 0xFF];
/// let mut reader = BinaryReader::new(&table);
///
/// assert_eq!(reader.read_u16().unwrap(), 0x0010);
/// assert_eq!(reader.read_u16().unwrap(), 0x012A);
/// assert!(reader.read_u16().is_err());
/// assert_eq!(reader.remaining(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self::new_at(data, 0)
    }

    /// Start at an absolute offset. An offset past the end is allowed; every
    /// read then fails.
    #[inline]
    pub const fn new_at(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take the next `count` bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if available < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available,
            });
        }
        let start = self.position;
        self.position += count;
        Ok(&self.data[start..start + count])
    }

    /// Take the next `N` bytes as an array.
    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_array::<1>().map(|[b]| b)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a fixed-layout record through zerocopy.
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let raw = self.read_bytes(size)?;
        T::read_from_bytes(raw).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: raw.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_record_fields() {
        // cost 999, code 0xFFFFFFFE
        let data = [0xE7, 0x03, 0x00, 0x00, 0xFE, 0xFF, 0xFF, 0xFF];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u32().unwrap(), 999);
        assert_eq!(reader.read_u8().unwrap(), 0xFE);
        assert_eq!(reader.read_bytes(3).unwrap(), &[0xFF, 0xFF, 0xFF]);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_short_read_keeps_position() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = BinaryReader::new_at(&data, 1);

        assert!(matches!(
            reader.read_u32(),
            Err(Error::UnexpectedEof { needed: 4, available: 2 })
        ));
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_u16().unwrap(), 0x0302);
    }

    #[test]
    fn test_start_past_end() {
        let mut reader = BinaryReader::new_at(&[0x01], 10);

        assert_eq!(reader.remaining(), 0);
        assert!(reader.read_u8().is_err());
    }
}
