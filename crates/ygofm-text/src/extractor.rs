//! Pointer-table driven string extraction.
//!
//! Every text class in the executable (card names, descriptions, type names,
//! guardian stars, opponents) is a pointer table plus a text base. One
//! [`StringTable`] describes a class and [`StringExtractor`] decodes it.

use tracing::{debug, warn};
use ygofm_common::Extraction;

use crate::codec::{DecodeStatus, TextCodec};
use crate::normalize::Normalization;
use crate::pointer::PointerTable;

/// How an entity without decodable text is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackName {
    /// `Unknown_<id>`
    Underscore,
    /// `Unknown <label> <id>`
    Labeled(&'static str),
}

impl FallbackName {
    pub fn render(&self, id: usize) -> String {
        match self {
            FallbackName::Underscore => format!("Unknown_{}", id),
            FallbackName::Labeled(label) => format!("Unknown {} {}", label, id),
        }
    }
}

/// Why a fallback name was substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The pointer resolved outside the buffer.
    OutOfRange,
    /// The text ran off the end of the buffer.
    Truncated,
    /// The text decoded to nothing but whitespace.
    Empty,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::OutOfRange => write!(f, "pointer out of range"),
            FallbackReason::Truncated => write!(f, "text truncated"),
            FallbackReason::Empty => write!(f, "empty text"),
        }
    }
}

/// Whether an entry's text was decoded or synthesised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Decoded,
    Fallback(FallbackReason),
}

/// One extracted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedString {
    pub id: usize,
    /// Absolute offset the pointer resolved to.
    pub offset: usize,
    pub text: String,
    pub status: EntryStatus,
}

impl ExtractedString {
    pub fn is_fallback(&self) -> bool {
        matches!(self.status, EntryStatus::Fallback(_))
    }
}

/// Everything needed to extract one text class.
#[derive(Debug, Clone, Copy)]
pub struct StringTable {
    /// Name used in log events.
    pub label: &'static str,
    pub pointers: PointerTable,
    /// Pointer index of the first extracted entry.
    pub first_index: usize,
    /// Entity id of the first extracted entry.
    pub first_id: usize,
    pub count: usize,
    pub max_len: usize,
    pub codec: TextCodec,
    pub normalization: Normalization,
    pub fallback: FallbackName,
}

/// Decodes [`StringTable`]s out of one buffer.
#[derive(Debug, Clone, Copy)]
pub struct StringExtractor<'a> {
    buffer: &'a [u8],
}

impl<'a> StringExtractor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer }
    }

    /// Extract every entry of `table`, in id order.
    ///
    /// Stops early when a pointer entry itself runs past the buffer; the
    /// returned [`Extraction`] then reports fewer items than expected.
    /// Pointers that resolve outside the buffer get a fallback name.
    pub fn extract(&self, table: &StringTable) -> Extraction<ExtractedString> {
        let mut items = Vec::with_capacity(table.count);

        for k in 0..table.count {
            let index = table.first_index + k;
            let id = table.first_id + k;

            let entry = match table.pointers.read_entry(self.buffer, index) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(
                        table = table.label,
                        decoded = items.len(),
                        expected = table.count,
                        "pointer table truncated: {}",
                        e
                    );
                    break;
                }
            };

            items.push(self.decode_entry(table, id, entry.absolute(table.pointers.text_base)));
        }

        let extraction = Extraction::new(items, table.count);
        debug!(
            table = table.label,
            decoded = extraction.decoded(),
            status = %extraction.status(),
            "extracted strings"
        );
        extraction
    }

    fn decode_entry(&self, table: &StringTable, id: usize, offset: usize) -> ExtractedString {
        let decoded = table.codec.decode(self.buffer, offset, table.max_len);

        let result = match decoded.status {
            DecodeStatus::OutOfRange => Err(FallbackReason::OutOfRange),
            DecodeStatus::Truncated => Err(FallbackReason::Truncated),
            DecodeStatus::Terminated | DecodeStatus::LimitReached => {
                let text = table.normalization.apply(&decoded.text);
                if text.is_empty() {
                    Err(FallbackReason::Empty)
                } else {
                    Ok(text)
                }
            }
        };

        match result {
            Ok(text) => ExtractedString {
                id,
                offset,
                text,
                status: EntryStatus::Decoded,
            },
            Err(reason) => {
                warn!(
                    table = table.label,
                    id,
                    offset = format_args!("{:#x}", offset),
                    %reason,
                    "using fallback name"
                );
                ExtractedString {
                    id,
                    offset,
                    text: table.fallback.render(id),
                    status: EntryStatus::Fallback(reason),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(count: usize) -> StringTable {
        StringTable {
            label: "test",
            pointers: PointerTable::new(0, 8),
            first_index: 1,
            first_id: 1,
            count,
            max_len: 16,
            codec: TextCodec::standard(),
            normalization: Normalization::TitleCase,
            fallback: FallbackName::Underscore,
        }
    }

    /// Pointer table at 0 (index 0 unused), text base 8.
    fn buffer() -> Vec<u8> {
        let mut data = vec![
            0x00, 0x00, // placeholder
            0x00, 0x00, // id 1 -> 8
            0x04, 0x00, // id 2 -> 12
            0xF0, 0x00, // id 3 -> 248, outside
        ];
        data.extend_from_slice(&[0x03, 0x2D, 0x0F, 0xFF]); // "aBc"
        data.extend_from_slice(&[0x00, 0x00, 0xFF]); // blanks
        data
    }

    #[test]
    fn test_extract_with_fallbacks() {
        let data = buffer();
        let extraction = StringExtractor::new(&data).extract(&table(3));
        let items = extraction.items();

        assert!(extraction.status().is_complete());
        assert_eq!(items[0].text, "Abc");
        assert_eq!(items[0].status, EntryStatus::Decoded);
        assert_eq!(items[1].text, "Unknown_2");
        assert_eq!(items[1].status, EntryStatus::Fallback(FallbackReason::Empty));
        assert_eq!(items[2].text, "Unknown_3");
        assert_eq!(items[2].status, EntryStatus::Fallback(FallbackReason::OutOfRange));
    }

    #[test]
    fn test_extract_stops_at_buffer_end() {
        let data = buffer();
        // entries past id 3 would be read from the text area and beyond
        let extraction = StringExtractor::new(&data).extract(&table(20));
        assert!(!extraction.status().is_complete());
        assert!(extraction.decoded() < 20);
        assert_eq!(extraction.items()[0].id, 1);
    }

    #[test]
    fn test_labeled_fallback() {
        assert_eq!(FallbackName::Labeled("Type").render(7), "Unknown Type 7");
        assert_eq!(FallbackName::Underscore.render(12), "Unknown_12");
    }
}
