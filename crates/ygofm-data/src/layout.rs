//! Fixed offsets into the game images.
//!
//! Everything here was located by hand in the NTSC-U release
//! (`SLUS_014.11` and `WA_MRG.MRG`). Offsets are absolute file offsets.

/// Executable (`SLUS_014.11`).
pub mod executable {
    /// Base that most relative text pointers are added to.
    pub const TEXT_BASE: usize = 0x1C0800;

    /// Card name pointers. Entry 0 is unused; card `n` is entry `n`.
    pub const CARD_NAME_POINTERS: usize = 0x1C6000;
    pub const CARD_NAME_MAX_LEN: usize = 100;

    /// Card description pointers, same indexing as names.
    pub const CARD_DESCRIPTION_POINTERS: usize = 0x1B0A00;
    pub const CARD_DESCRIPTION_TEXT_BASE: usize = 0x1B0800;
    pub const CARD_DESCRIPTION_MAX_LEN: usize = 200;

    /// Type name pointers, ids 0..24.
    pub const TYPE_NAME_POINTERS: usize = 0x1C6600;
    pub const TYPE_NAME_COUNT: usize = 24;

    /// Guardian star pointers directly follow the type pointers, ids 1..=10.
    pub const GUARDIAN_STAR_POINTERS: usize = TYPE_NAME_POINTERS + TYPE_NAME_COUNT * 2;
    pub const GUARDIAN_STAR_COUNT: usize = 10;

    /// Opponent name pointers, ids 0..40.
    pub const OPPONENT_NAME_POINTERS: usize = 0x1C6650;

    /// Shared limit for type, guardian star and opponent names.
    pub const SHORT_NAME_MAX_LEN: usize = 50;

    /// Opponent names end early at this byte.
    pub const OPPONENT_NAME_STOP: u8 = 0xFD;

    /// Bit-packed stat records, 4 bytes per card; the word sits at +2.
    pub const STATS: usize = 0x1C4A42;
    pub const STATS_STRIDE: usize = 4;
    pub const STATS_WORD_OFFSET: usize = 2;

    /// Level/attribute bytes, one per card.
    pub const LEVELS: usize = 0x1C5B33;
}

/// Resource archive (`WA_MRG.MRG`).
pub mod archive {
    /// First opponent block; block `i` starts at `OPPONENT_BLOCKS + i * OPPONENT_BLOCK_SIZE`.
    pub const OPPONENT_BLOCKS: usize = 0xE99800;
    pub const OPPONENT_BLOCK_SIZE: usize = 0x1800;

    /// Sub-table offsets inside an opponent block.
    pub const DECK: usize = 0x0000;
    pub const SA_POW: usize = 0x05B4;
    pub const BCD: usize = 0x0B68;
    pub const SA_TEC: usize = 0x111C;

    /// Password and starchip cost, 8 bytes per card.
    pub const PASSWORDS: usize = 0xFB9808;
    pub const PASSWORD_STRIDE: usize = 8;

    /// Size of every per-field equip table.
    pub const EQUIP_TABLE_LEN: usize = 0x2800;

    /// Absolute offset of opponent block `index`.
    pub const fn opponent_block(index: usize) -> usize {
        OPPONENT_BLOCKS + index * OPPONENT_BLOCK_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_offsets() {
        assert_eq!(executable::GUARDIAN_STAR_POINTERS, 0x1C6630);
        assert_eq!(archive::opponent_block(0), 0xE99800);
        assert_eq!(archive::opponent_block(2), 0xE9C800);
    }
}
