//! Multi-byte sequences that stand for whole phrases.
//!
//! Card descriptions compress a few recurring phrases into short byte
//! sequences. These are data, so they live here rather than in the decoder.

/// One compressed phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phrase {
    /// The encoded byte sequence.
    pub sequence: &'static [u8],
    /// The literal it decodes to.
    pub text: &'static str,
}

/// Phrases found in card descriptions.
pub const DESCRIPTION_PHRASES: &[Phrase] = &[Phrase {
    sequence: &[0xFC, 0x71, 0xD5],
    text: "for each",
}];

/// An ordered list of phrases; the first match wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseTable {
    phrases: &'static [Phrase],
}

impl PhraseTable {
    /// A table that matches nothing.
    pub const fn empty() -> Self {
        Self { phrases: &[] }
    }

    /// Wrap a static phrase list.
    pub const fn new(phrases: &'static [Phrase]) -> Self {
        Self { phrases }
    }

    /// The phrases in match order.
    pub fn phrases(&self) -> &'static [Phrase] {
        self.phrases
    }

    /// Find a phrase starting at `pos` whose whole sequence ends at or
    /// before `limit` (exclusive).
    pub fn match_at(&self, data: &[u8], pos: usize, limit: usize) -> Option<&'static Phrase> {
        let end = limit.min(data.len());
        self.phrases.iter().find(|phrase| {
            let len = phrase.sequence.len();
            !phrase.sequence.is_empty()
                && pos.checked_add(len).is_some_and(|stop| stop <= end)
                && &data[pos..pos + len] == phrase.sequence
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match() {
        let table = PhraseTable::new(DESCRIPTION_PHRASES);
        let data = [0x00, 0xFC, 0x71, 0xD5, 0x00];

        let phrase = table.match_at(&data, 1, data.len()).unwrap();
        assert_eq!(phrase.text, "for each");
        assert!(table.match_at(&data, 0, data.len()).is_none());
    }

    #[test]
    fn test_match_respects_limit() {
        let table = PhraseTable::new(DESCRIPTION_PHRASES);
        let data = [0xFC, 0x71, 0xD5];

        assert!(table.match_at(&data, 0, 2).is_none());
        assert!(table.match_at(&data[..2], 0, 10).is_none());
    }

    #[test]
    fn test_empty_table() {
        assert!(PhraseTable::empty()
            .match_at(&[0xFC, 0x71, 0xD5], 0, 3)
            .is_none());
    }
}
