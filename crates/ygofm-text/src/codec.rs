//! The 8-bit text decoder.

use crate::glyph::{placeholder, Glyph, GlyphTable};
use crate::phrase::{Phrase, PhraseTable};

/// How a decode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// A terminator (or the codec's extra stop byte) was reached.
    Terminated,
    /// `max_len` bytes were examined without a terminator.
    LimitReached,
    /// The buffer ended before a terminator or the limit.
    Truncated,
    /// The start offset lies outside the buffer.
    OutOfRange,
}

impl DecodeStatus {
    /// True when the decoded text can be trusted.
    pub fn is_valid(&self) -> bool {
        matches!(self, DecodeStatus::Terminated | DecodeStatus::LimitReached)
    }
}

/// The result of one decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Raw decoded text, before any display normalisation.
    pub text: String,
    /// Input bytes examined, including the terminator. Never exceeds `max_len`.
    pub consumed: usize,
    pub status: DecodeStatus,
}

impl Decoded {
    fn out_of_range() -> Self {
        Self {
            text: String::new(),
            consumed: 0,
            status: DecodeStatus::OutOfRange,
        }
    }
}

/// Stateless decoder for the game's text encoding.
///
/// Decoding is a pure function of `(buffer, offset, max_len)`; a codec can be
/// copied freely and shared between threads.
#[derive(Debug, Clone, Copy)]
pub struct TextCodec {
    glyphs: &'static GlyphTable,
    phrases: PhraseTable,
    extra_stop: Option<u8>,
}

impl Default for TextCodec {
    fn default() -> Self {
        Self::standard()
    }
}

impl TextCodec {
    /// The standard glyph table with no phrases and no extra stop byte.
    pub fn standard() -> Self {
        Self {
            glyphs: GlyphTable::standard(),
            phrases: PhraseTable::empty(),
            extra_stop: None,
        }
    }

    /// Consult `phrases` before per-byte decoding.
    pub fn with_phrases(mut self, phrases: &'static [Phrase]) -> Self {
        self.phrases = PhraseTable::new(phrases);
        self
    }

    /// Treat `byte` as a terminator in addition to `0xFF`.
    pub fn with_stop_byte(mut self, byte: u8) -> Self {
        self.extra_stop = Some(byte);
        self
    }

    /// The glyph table in use.
    pub fn glyphs(&self) -> &'static GlyphTable {
        self.glyphs
    }

    /// Decode one string starting at `offset`, examining at most `max_len`
    /// bytes.
    pub fn decode(&self, buffer: &[u8], offset: usize, max_len: usize) -> Decoded {
        if offset >= buffer.len() {
            return Decoded::out_of_range();
        }

        let limit = offset.saturating_add(max_len);
        let mut text = String::new();
        let mut i = 0;

        while i < max_len {
            let pos = offset + i;
            let Some(&byte) = buffer.get(pos) else {
                return Decoded {
                    text,
                    consumed: i,
                    status: DecodeStatus::Truncated,
                };
            };

            if self.extra_stop == Some(byte) {
                return Decoded {
                    text,
                    consumed: i + 1,
                    status: DecodeStatus::Terminated,
                };
            }

            if let Some(phrase) = self.phrases.match_at(buffer, pos, limit) {
                text.push_str(phrase.text);
                i += phrase.sequence.len();
                continue;
            }

            match self.glyphs.lookup(byte) {
                Glyph::Terminator => {
                    return Decoded {
                        text,
                        consumed: i + 1,
                        status: DecodeStatus::Terminated,
                    };
                }
                Glyph::Text(glyph) => {
                    text.push_str(glyph);
                    i += 1;
                }
                Glyph::Skip { params } => {
                    let params = params as usize;
                    // Parameters must fit both in the limit and in the buffer.
                    if i + params < max_len && pos + params < buffer.len() {
                        i += 1 + params;
                    } else {
                        text.push_str(&placeholder(byte));
                        i += 1;
                    }
                }
                Glyph::SoftJoin => {
                    let prev = if i == 0 { 0 } else { buffer[pos - 1] };
                    let next = buffer.get(pos + 1).copied().unwrap_or(0);
                    if prev != 0 && next != 0 {
                        text.push(' ');
                    }
                    i += 1;
                }
                Glyph::Unmapped(b) => {
                    text.push_str(&placeholder(b));
                    i += 1;
                }
            }
        }

        Decoded {
            text,
            consumed: i,
            status: DecodeStatus::LimitReached,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrase::DESCRIPTION_PHRASES;

    #[test]
    fn test_every_byte_decodes() {
        let codec = TextCodec::standard();
        for byte in 0..=255u8 {
            let data = [byte, 0xFF];
            let decoded = codec.decode(&data, 0, 10);
            assert!(decoded.status.is_valid(), "byte {:#x}", byte);
            match GlyphTable::standard().lookup(byte) {
                Glyph::Text(glyph) => assert_eq!(decoded.text, glyph),
                Glyph::Unmapped(_) => assert_eq!(decoded.text, placeholder(byte)),
                Glyph::Terminator => assert_eq!(decoded.consumed, 1),
                _ => {}
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let codec = TextCodec::standard().with_phrases(DESCRIPTION_PHRASES);
        let data = [0x25, 0x03, 0xFC, 0x71, 0xD5, 0xF8, 0x01, 0x02, 0x9A, 0xFF];
        assert_eq!(codec.decode(&data, 0, 64), codec.decode(&data, 0, 64));
    }

    #[test]
    fn test_limit_reached() {
        let data = [0x18, 0x18, 0x18, 0x18];
        let decoded = TextCodec::standard().decode(&data, 0, 2);
        assert_eq!(decoded.text, "AA");
        assert_eq!(decoded.consumed, 2);
        assert_eq!(decoded.status, DecodeStatus::LimitReached);
    }

    #[test]
    fn test_truncated_and_out_of_range() {
        let data = [0x18, 0x2D];
        let decoded = TextCodec::standard().decode(&data, 0, 10);
        assert_eq!(decoded.text, "AB");
        assert_eq!(decoded.status, DecodeStatus::Truncated);
        assert!(!decoded.status.is_valid());

        let decoded = TextCodec::standard().decode(&data, 2, 10);
        assert_eq!(decoded.status, DecodeStatus::OutOfRange);
        assert!(decoded.text.is_empty());
    }

    #[test]
    fn test_soft_joiner() {
        let codec = TextCodec::standard();
        // A <join> B
        assert_eq!(codec.decode(&[0x18, 0xFE, 0x2D, 0xFF], 0, 10).text, "A B");
        // A <space> <join> B: the joiner adds nothing next to a zero byte
        assert_eq!(codec.decode(&[0x18, 0x00, 0xFE, 0x2D, 0xFF], 0, 10).text, "A B");
        // leading joiner has no left neighbour
        assert_eq!(codec.decode(&[0xFE, 0x2D, 0xFF], 0, 10).text, "B");
    }

    #[test]
    fn test_parameter_marker() {
        let codec = TextCodec::standard();
        let decoded = codec.decode(&[0x18, 0xF8, 0x18, 0x18, 0x2D, 0xFF], 0, 10);
        assert_eq!(decoded.text, "AB");
        assert_eq!(decoded.consumed, 6);

        // parameters would cross the limit
        let decoded = codec.decode(&[0x18, 0xF8, 0x18, 0x18], 0, 3);
        assert_eq!(decoded.text, "A?[0xf8]A");
        assert_eq!(decoded.consumed, 3);
    }

    #[test]
    fn test_phrase_substitution() {
        let data = [0x18, 0x00, 0xFC, 0x71, 0xD5, 0x00, 0x2D, 0xFF];
        let plain = TextCodec::standard().decode(&data, 0, 20);
        assert_eq!(plain.text, "A ?[0xfc]?[0x71]?[0xd5] B");

        let codec = TextCodec::standard().with_phrases(DESCRIPTION_PHRASES);
        assert_eq!(codec.decode(&data, 0, 20).text, "A for each B");
        // sequence cut by the limit falls back to per-byte decoding
        assert_eq!(codec.decode(&data, 0, 4).text, "A ?[0xfc]?[0x71]");
    }

    #[test]
    fn test_extra_stop_byte() {
        let data = [0x18, 0xFD, 0x2D, 0xFF];
        assert_eq!(TextCodec::standard().decode(&data, 0, 10).text, "A?[0xfd]B");

        let decoded = TextCodec::standard().with_stop_byte(0xFD).decode(&data, 0, 10);
        assert_eq!(decoded.text, "A");
        assert_eq!(decoded.consumed, 2);
        assert_eq!(decoded.status, DecodeStatus::Terminated);
    }
}
