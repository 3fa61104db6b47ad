//! The byte-to-glyph table.

use std::fmt;

/// String terminator byte.
pub const TERMINATOR: u8 = 0xFF;

/// Control byte followed by two parameter bytes (colour / layout codes).
const PARAMETER_MARKER: u8 = 0xF8;

/// Control byte rendered as a space only between two real words.
const SOFT_JOINER: u8 = 0xFE;

/// What a single byte means to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// A visible glyph.
    Text(&'static str),
    /// End of string.
    Terminator,
    /// A marker followed by `params` parameter bytes; renders nothing.
    Skip { params: u8 },
    /// A word joiner; renders a space only between two non-zero bytes.
    SoftJoin,
    /// No glyph is known for this byte.
    Unmapped(u8),
}

/// Immutable 256-entry byte-to-glyph mapping. Lookup is total.
pub struct GlyphTable {
    glyphs: [Glyph; 256],
}

impl GlyphTable {
    /// The game's standard table.
    pub fn standard() -> &'static GlyphTable {
        &STANDARD
    }

    /// Look up a byte.
    #[inline]
    pub fn lookup(&self, byte: u8) -> Glyph {
        self.glyphs[byte as usize]
    }

    /// Render a byte the way it appears in decoded output.
    ///
    /// Control bytes render as their placeholder here; the decoder handles
    /// them before this is reached.
    pub fn render(&self, byte: u8) -> String {
        match self.lookup(byte) {
            Glyph::Text(text) => text.to_string(),
            _ => placeholder(byte),
        }
    }

    /// Number of bytes with a visible glyph.
    pub fn mapped_count(&self) -> usize {
        self.glyphs
            .iter()
            .filter(|g| matches!(g, Glyph::Text(_)))
            .count()
    }
}

impl fmt::Debug for GlyphTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphTable")
            .field("mapped", &self.mapped_count())
            .finish()
    }
}

/// Escaped rendering of a byte with no glyph, e.g. `?[0xfc]`.
pub fn placeholder(byte: u8) -> String {
    format!("?[{:#x}]", byte)
}

static STANDARD: GlyphTable = GlyphTable {
    glyphs: build_standard(),
};

const fn build_standard() -> [Glyph; 256] {
    let mut glyphs = [Glyph::Unmapped(0); 256];

    let mut i = 0;
    while i < 256 {
        glyphs[i] = Glyph::Unmapped(i as u8);
        i += 1;
    }

    let mut i = 0;
    while i < MAPPINGS.len() {
        let (byte, text) = MAPPINGS[i];
        glyphs[byte as usize] = Glyph::Text(text);
        i += 1;
    }

    glyphs[TERMINATOR as usize] = Glyph::Terminator;
    glyphs[PARAMETER_MARKER as usize] = Glyph::Skip { params: 2 };
    glyphs[SOFT_JOINER as usize] = Glyph::SoftJoin;

    glyphs
}

#[rustfmt::skip]
const MAPPINGS: &[(u8, &str)] = &[
    // Upper case
    (0x18, "A"), (0x2D, "B"), (0x2B, "C"), (0x20, "D"), (0x25, "E"), (0x31, "F"),
    (0x29, "G"), (0x23, "H"), (0x1A, "I"), (0x3B, "J"), (0x33, "K"), (0x2A, "L"),
    (0x1E, "M"), (0x2C, "N"), (0x21, "O"), (0x2F, "P"), (0x3E, "Q"), (0x26, "R"),
    (0x1D, "S"), (0x1C, "T"), (0x35, "U"), (0x39, "V"), (0x22, "W"), (0x46, "X"),
    (0x24, "Y"), (0x3F, "Z"),
    // Lower case
    (0x03, "a"), (0x15, "b"), (0x0F, "c"), (0x0C, "d"), (0x01, "e"), (0x13, "f"),
    (0x10, "g"), (0x09, "h"), (0x05, "i"), (0x34, "j"), (0x16, "k"), (0x0A, "l"),
    (0x0E, "m"), (0x06, "n"), (0x04, "o"), (0x14, "p"), (0x37, "q"), (0x08, "r"),
    (0x07, "s"), (0x02, "t"), (0x0D, "u"), (0x19, "v"), (0x12, "w"), (0x36, "x"),
    (0x11, "y"), (0x32, "z"), (0x55, "a"),
    // Digits
    (0x38, "0"), (0x3D, "1"), (0x3A, "2"), (0x41, "3"), (0x4A, "4"), (0x42, "5"),
    (0x4E, "6"), (0x45, "7"), (0x57, "8"), (0x59, "9"),
    // Punctuation
    (0x00, " "), (0x47, " "), (0x30, "-"), (0x3C, "#"), (0x43, "&"), (0x0B, "."),
    (0x1F, ","), (0x17, "!"), (0x1B, "'"), (0x27, "<"), (0x28, ">"), (0x2E, "?"),
    (0x44, "/"), (0x48, ":"), (0x4B, ")"), (0x4C, "("), (0x4F, "$"), (0x50, "*"),
    (0x51, ">"), (0x54, "<"), (0x40, "\""), (0x56, "+"), (0x5B, "%"), (0x5C, "@"),
    (0x5D, "^"), (0x5E, "~"), (0x5F, "_"), (0x60, "`"), (0x61, "{"), (0x62, "}"),
    (0x63, "["), (0x64, "]"), (0x65, "="), (0x66, ";"), (0x67, "\\"),
    // Glyphs the game draws as a question mark
    (0x6F, "?"), (0x77, "?"), (0x7F, "?"), (0x8F, "?"), (0x97, "?"), (0x9F, "?"),
    (0xAF, "?"), (0xB7, "?"), (0xC7, "?"), (0xE7, "?"), (0xEF, "?"), (0xF7, "?"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        let table = GlyphTable::standard();
        assert_eq!(table.lookup(0x18), Glyph::Text("A"));
        assert_eq!(table.lookup(0x03), Glyph::Text("a"));
        assert_eq!(table.lookup(0x59), Glyph::Text("9"));
    }

    #[test]
    fn test_control_bytes() {
        let table = GlyphTable::standard();
        assert_eq!(table.lookup(0xFF), Glyph::Terminator);
        assert_eq!(table.lookup(0xF8), Glyph::Skip { params: 2 });
        assert_eq!(table.lookup(0xFE), Glyph::SoftJoin);
    }

    #[test]
    fn test_lookup_is_total() {
        let table = GlyphTable::standard();
        for byte in 0..=255u8 {
            if let Glyph::Unmapped(b) = table.lookup(byte) {
                assert_eq!(b, byte);
            }
            assert!(!table.render(byte).is_empty());
        }
    }

    #[test]
    fn test_placeholder_format() {
        assert_eq!(placeholder(0xFC), "?[0xfc]");
        assert_eq!(GlyphTable::standard().render(0x71), "?[0x71]");
    }

    #[test]
    fn test_mapped_count() {
        assert_eq!(GlyphTable::standard().mapped_count(), MAPPINGS.len());
    }
}
