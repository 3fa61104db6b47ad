//! CRC32C fingerprints.
//!
//! Used to identify an image before and after patching, so a reversed image
//! can be checked against the original without keeping both in memory.

/// Compute the CRC32C of a byte slice.
///
/// Uses hardware acceleration when available (SSE4.2 on x86).
#[inline]
pub fn hash_bytes(data: &[u8]) -> u32 {
    crc32c::crc32c(data)
}

/// Format a fingerprint the way reports print it.
#[inline]
pub fn fingerprint(data: &[u8]) -> String {
    format!("{:08X}", hash_bytes(data))
}
