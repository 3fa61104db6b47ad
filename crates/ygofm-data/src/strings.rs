//! The executable's text tables.

use ygofm_text::{
    FallbackName, Normalization, PointerTable, StringTable, TextCodec, DESCRIPTION_PHRASES,
};

use crate::card::CARD_COUNT;
use crate::layout::executable as exe;
use crate::opponent::OPPONENT_COUNT;

/// Card names, ids 1..=722 (pointer entry 0 is unused).
pub fn card_names() -> StringTable {
    StringTable {
        label: "card names",
        pointers: PointerTable::new(exe::CARD_NAME_POINTERS, exe::TEXT_BASE),
        first_index: 1,
        first_id: 1,
        count: CARD_COUNT,
        max_len: exe::CARD_NAME_MAX_LEN,
        codec: TextCodec::standard(),
        normalization: Normalization::TitleCase,
        fallback: FallbackName::Underscore,
    }
}

/// Card descriptions: trimmed, not title-cased, with phrase substitution.
pub fn card_descriptions() -> StringTable {
    StringTable {
        label: "card descriptions",
        pointers: PointerTable::new(
            exe::CARD_DESCRIPTION_POINTERS,
            exe::CARD_DESCRIPTION_TEXT_BASE,
        ),
        first_index: 1,
        first_id: 1,
        count: CARD_COUNT,
        max_len: exe::CARD_DESCRIPTION_MAX_LEN,
        codec: TextCodec::standard().with_phrases(DESCRIPTION_PHRASES),
        normalization: Normalization::Trim,
        fallback: FallbackName::Underscore,
    }
}

/// Type names, ids 0..24.
pub fn type_names() -> StringTable {
    StringTable {
        label: "type names",
        pointers: PointerTable::new(exe::TYPE_NAME_POINTERS, exe::TEXT_BASE),
        first_index: 0,
        first_id: 0,
        count: exe::TYPE_NAME_COUNT,
        max_len: exe::SHORT_NAME_MAX_LEN,
        codec: TextCodec::standard(),
        normalization: Normalization::TitleCase,
        fallback: FallbackName::Labeled("Type"),
    }
}

/// Guardian star names, ids 1..=10.
pub fn guardian_stars() -> StringTable {
    StringTable {
        label: "guardian stars",
        pointers: PointerTable::new(exe::GUARDIAN_STAR_POINTERS, exe::TEXT_BASE),
        first_index: 0,
        first_id: 1,
        count: exe::GUARDIAN_STAR_COUNT,
        max_len: exe::SHORT_NAME_MAX_LEN,
        codec: TextCodec::standard(),
        normalization: Normalization::TitleCase,
        fallback: FallbackName::Labeled("Guardian Star"),
    }
}

/// Opponent names, ids 0..40. `0xFD` also ends a name.
pub fn opponent_names() -> StringTable {
    StringTable {
        label: "opponent names",
        pointers: PointerTable::new(exe::OPPONENT_NAME_POINTERS, exe::TEXT_BASE),
        first_index: 0,
        first_id: 0,
        count: OPPONENT_COUNT,
        max_len: exe::SHORT_NAME_MAX_LEN,
        codec: TextCodec::standard().with_stop_byte(exe::OPPONENT_NAME_STOP),
        normalization: Normalization::TitleCase,
        fallback: FallbackName::Underscore,
    }
}
