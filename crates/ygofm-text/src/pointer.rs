//! Relative pointer tables.
//!
//! A pointer table is a run of little-endian u16 values at a fixed origin.
//! Entry `i` lives at `origin + i * stride` and points at `text_base + value`.

use ygofm_common::{BinaryReader, Error, Result};

/// Default distance between consecutive pointer entries.
pub const POINTER_STRIDE: usize = 2;

/// One entry of a pointer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEntry {
    pub index: usize,
    pub relative: u16,
}

impl PointerEntry {
    /// The absolute offset this entry points at.
    #[inline]
    pub fn absolute(&self, text_base: usize) -> usize {
        text_base + self.relative as usize
    }
}

/// Location of a pointer table and the text it points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerTable {
    pub origin: usize,
    pub text_base: usize,
    pub stride: usize,
}

impl PointerTable {
    pub const fn new(origin: usize, text_base: usize) -> Self {
        Self {
            origin,
            text_base,
            stride: POINTER_STRIDE,
        }
    }

    pub const fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// Offset of entry `index`, or `None` on arithmetic overflow.
    pub fn entry_offset(&self, index: usize) -> Option<usize> {
        index
            .checked_mul(self.stride)
            .and_then(|delta| self.origin.checked_add(delta))
    }

    /// Read entry `index`.
    pub fn read_entry(&self, buffer: &[u8], index: usize) -> Result<PointerEntry> {
        let offset = self.entry_offset(index).ok_or(Error::OffsetOutOfRange {
            offset: usize::MAX,
            len: POINTER_STRIDE,
            buffer_len: buffer.len(),
        })?;
        let relative = BinaryReader::new_at(buffer, offset).read_u16()?;
        Ok(PointerEntry { index, relative })
    }

    /// Absolute text offset of entry `index`.
    ///
    /// Fails only when the pointer itself cannot be read; the returned offset
    /// may still lie outside the buffer.
    pub fn resolve(&self, buffer: &[u8], index: usize) -> Result<usize> {
        Ok(self.read_entry(buffer, index)?.absolute(self.text_base))
    }
}

/// Resolve one pointer without building a [`PointerTable`].
pub fn resolve(
    buffer: &[u8],
    origin: usize,
    text_base: usize,
    index: usize,
    stride: usize,
) -> Result<usize> {
    PointerTable::new(origin, text_base)
        .with_stride(stride)
        .resolve(buffer, index)
}
