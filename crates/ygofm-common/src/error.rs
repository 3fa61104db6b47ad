//! Error types for ygofm-common.

use thiserror::Error;

/// Common error type for ygofm operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A region addressed by an absolute offset does not fit in the buffer.
    #[error("offset {offset:#x} + {len} bytes is outside a buffer of {buffer_len} bytes")]
    OffsetOutOfRange {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },

    /// Malformed hex byte string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
