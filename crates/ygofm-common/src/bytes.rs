//! Bounded reads at absolute offsets.
//!
//! Every offset in the game images is a pre-known constant or a value read
//! out of the image itself, so nothing here trusts it: all helpers check the
//! whole region against the buffer length with overflow-safe arithmetic and
//! report [`Error::OffsetOutOfRange`] instead of panicking.

use crate::{Error, Result};

/// Check whether `len` bytes starting at `offset` fit in a buffer of
/// `buffer_len` bytes.
#[inline]
pub fn fits(buffer_len: usize, offset: usize, len: usize) -> bool {
    offset
        .checked_add(len)
        .is_some_and(|end| end <= buffer_len)
}

/// Borrow `len` bytes starting at `offset`.
#[inline]
pub fn slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    if !fits(data.len(), offset, len) {
        return Err(out_of_range(data.len(), offset, len));
    }
    Ok(&data[offset..offset + len])
}

/// Mutably borrow `len` bytes starting at `offset`.
#[inline]
pub fn slice_mut(data: &mut [u8], offset: usize, len: usize) -> Result<&mut [u8]> {
    if !fits(data.len(), offset, len) {
        return Err(out_of_range(data.len(), offset, len));
    }
    Ok(&mut data[offset..offset + len])
}

/// Borrow up to `len` bytes starting at `offset`, clipped to the buffer end.
///
/// Returns an empty slice when `offset` is past the end.
#[inline]
pub fn slice_clipped(data: &[u8], offset: usize, len: usize) -> &[u8] {
    let start = offset.min(data.len());
    let end = offset.saturating_add(len).min(data.len());
    &data[start..end]
}

/// Read a little-endian u16 at an absolute offset.
#[inline]
pub fn u16_le_at(data: &[u8], offset: usize) -> Result<u16> {
    let b = slice(data, offset, 2)?;
    Ok(u16::from_le_bytes([b[0], b[1]]))
}

/// Read a little-endian u32 at an absolute offset.
#[inline]
pub fn u32_le_at(data: &[u8], offset: usize) -> Result<u32> {
    let b = slice(data, offset, 4)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fn out_of_range(buffer_len: usize, offset: usize, len: usize) -> Error {
    Error::OffsetOutOfRange {
        offset,
        len,
        buffer_len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_handles_overflow() {
        assert!(fits(8, 4, 4));
        assert!(!fits(8, 5, 4));
        assert!(!fits(8, usize::MAX, 2));
        assert!(fits(0, 0, 0));
    }

    #[test]
    fn test_integer_reads() {
        let data = [0x00, 0x34, 0x12, 0x78, 0x56];
        assert_eq!(u16_le_at(&data, 1).unwrap(), 0x1234);
        assert_eq!(u32_le_at(&data, 1).unwrap(), 0x5678_1234);
        assert!(u32_le_at(&data, 2).is_err());
    }

    #[test]
    fn test_slice_clipped() {
        let data = [1u8, 2, 3, 4];
        assert_eq!(slice_clipped(&data, 2, 10), &[3, 4]);
        assert!(slice_clipped(&data, 9, 3).is_empty());
    }

    #[test]
    fn test_slice_mut_rejects_overrun() {
        let mut data = [0u8; 4];
        assert!(matches!(
            slice_mut(&mut data, 3, 2),
            Err(Error::OffsetOutOfRange { offset: 3, len: 2, buffer_len: 4 })
        ));
        slice_mut(&mut data, 2, 2).unwrap().copy_from_slice(&[9, 9]);
        assert_eq!(data, [0, 0, 9, 9]);
    }
}
