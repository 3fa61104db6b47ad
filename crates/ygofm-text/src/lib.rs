//! Game text decoding for Yu-Gi-Oh! Forbidden Memories.
//!
//! The game stores its text in a proprietary 8-bit encoding: each byte maps to
//! a glyph through a fixed table, a handful of byte values are control codes,
//! and strings are located through tables of 2-byte relative pointers.
//!
//! # Encoding
//!
//! - `0xFF` terminates a string
//! - `0xF8` is followed by two parameter bytes and renders nothing
//! - `0xFE` joins two words with a space, but only between two non-zero bytes
//! - bytes without a glyph render as `?[0x..]` so they stay visible
//!
//! Some multi-byte sequences in card descriptions stand for whole phrases;
//! those live in a [`PhraseTable`] consulted before per-byte decoding.
//!
//! # Example
//!
//! ```
//! use ygofm_text::{Normalization, TextCodec};
//!
//! // "dark magician" followed by the terminator
//! let data = [0x0C, 0x03, 0x08, 0x16, 0x00, 0x0E, 0x03, 0x10, 0x05, 0x0F,
//!             0x05, 0x03, 0x06, 0xFF];
//!
//! let decoded = TextCodec::standard().decode(&data, 0, 100);
//! assert_eq!(decoded.text, "dark magician");
//! assert_eq!(decoded.consumed, data.len());
//! assert_eq!(Normalization::TitleCase.apply(&decoded.text), "Dark Magician");
//! ```

mod codec;
mod extractor;
mod glyph;
mod normalize;
mod phrase;
mod pointer;

pub use codec::{DecodeStatus, Decoded, TextCodec};
pub use extractor::{
    EntryStatus, ExtractedString, FallbackName, FallbackReason, StringExtractor, StringTable,
};
pub use glyph::{Glyph, GlyphTable, TERMINATOR};
pub use normalize::{title_case, Normalization};
pub use phrase::{Phrase, PhraseTable, DESCRIPTION_PHRASES};
pub use pointer::{resolve, PointerEntry, PointerTable, POINTER_STRIDE};
