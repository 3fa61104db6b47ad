//! Common utilities for ygofm.
//!
//! This crate provides the buffer primitives shared by the decoder and the
//! patch engine:
//!
//! - [`BinaryReader`] - Cursor-style reading from byte slices
//! - [`bytes`] - Bounded reads at absolute offsets (never panic on short buffers)
//! - [`search`] - Non-overlapping byte pattern search
//! - [`hex`] - Hex parsing and formatting for byte patterns
//! - [`Extraction`] - Partial results of table extraction
//! - [`crc`] - CRC32C fingerprints of whole images

mod error;
mod extraction;
mod reader;

pub mod bytes;
pub mod crc;
pub mod hex;
pub mod search;

pub use error::{Error, Result};
pub use extraction::{Extraction, TableStatus};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
