//! Error types for game data loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading game data.
///
/// Malformed data never produces an error; it degrades to partial results
/// and diagnostics. Errors are reserved for the file boundary and lookups.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading an image from disk failed.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Common library error.
    #[error("{0}")]
    Common(#[from] ygofm_common::Error),

    /// No card with this id.
    #[error("card not found: {0} (ids run 1..={max})", max = crate::CARD_COUNT)]
    CardNotFound(usize),

    /// No opponent with this id.
    #[error("opponent not found: {0}")]
    OpponentNotFound(usize),
}

/// Result type for game data operations.
pub type Result<T> = std::result::Result<T, Error>;
