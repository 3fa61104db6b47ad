//! Fixed-width record decoding.
//!
//! Stats, level/attribute bytes and password/cost records are all laid out
//! as one fixed-stride record per card. [`RecordTable`] walks such a layout
//! and stops, rather than fails, at the first record that does not fit.

use tracing::warn;
use ygofm_common::{bytes, BinaryReader, Extraction};
use zerocopy::byteorder::little_endian::U32;
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::card::{
    Attribute, CardStats, CardType, GuardianStarId, LevelAttribute, Password, PasswordCost,
};

/// A run of fixed-stride records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordTable {
    pub label: &'static str,
    pub base: usize,
    pub stride: usize,
    /// Bytes each record needs from its start.
    pub width: usize,
    pub count: usize,
}

impl RecordTable {
    /// Decode every record that fits, in order.
    pub fn extract<T>(&self, buffer: &[u8], mut decode: impl FnMut(&[u8]) -> T) -> Extraction<T> {
        let mut items = Vec::with_capacity(self.count);

        for index in 0..self.count {
            let record = index
                .checked_mul(self.stride)
                .and_then(|delta| self.base.checked_add(delta))
                .and_then(|offset| bytes::slice(buffer, offset, self.width).ok());

            match record {
                Some(record) => items.push(decode(record)),
                None => {
                    warn!(
                        table = self.label,
                        decoded = items.len(),
                        expected = self.count,
                        "record table truncated"
                    );
                    break;
                }
            }
        }

        Extraction::new(items, self.count)
    }
}

/// Unpack a stat word.
///
/// | bits  | field            |
/// |-------|------------------|
/// | 0-8   | attack / 10      |
/// | 9-17  | defense / 10     |
/// | 18-21 | guardian star 2  |
/// | 22-25 | guardian star 1  |
/// | 26-30 | type             |
pub fn decode_stat_word(word: u32) -> CardStats {
    CardStats {
        attack: (word & 0x1FF) as u16 * 10,
        defense: ((word >> 9) & 0x1FF) as u16 * 10,
        guardian_star_2: GuardianStarId(((word >> 18) & 0xF) as u8),
        guardian_star_1: GuardianStarId(((word >> 22) & 0xF) as u8),
        card_type: CardType(((word >> 26) & 0x1F) as u8),
    }
}

/// Decode a stat record: the word sits `word_offset` bytes into the record.
pub fn decode_stat_record(record: &[u8], word_offset: usize) -> Option<CardStats> {
    bytes::u32_le_at(record, word_offset)
        .ok()
        .map(decode_stat_word)
}

/// Unpack a level/attribute byte: level in the low nibble.
pub fn decode_level_byte(byte: u8) -> LevelAttribute {
    LevelAttribute {
        level: byte & 0x0F,
        attribute: Attribute(byte >> 4),
    }
}

/// On-disk password record.
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct PasswordRecord {
    pub cost: U32,
    pub code: U32,
}

impl PasswordRecord {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn decode(&self) -> PasswordCost {
        PasswordCost {
            cost: self.cost.get(),
            password: Password::from_raw(self.code.get()),
        }
    }
}

/// Decode a password record slice.
pub fn decode_password_record(record: &[u8]) -> Option<PasswordCost> {
    BinaryReader::new(record)
        .read_struct::<PasswordRecord>()
        .ok()
        .map(|r| r.decode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::NO_PASSWORD;

    fn stat_word(atk: u32, def: u32, gs2: u32, gs1: u32, ty: u32) -> u32 {
        atk | (def << 9) | (gs2 << 18) | (gs1 << 22) | (ty << 26)
    }

    #[test]
    fn test_stat_word() {
        let stats = decode_stat_word(stat_word(15, 20, 0, 0, 3));
        assert_eq!(stats.attack, 150);
        assert_eq!(stats.defense, 200);
        assert_eq!(stats.card_type, CardType(3));
        assert_eq!(stats.card_type.to_string(), "Fairy");
    }

    #[test]
    fn test_stat_word_all_fields() {
        let stats = decode_stat_word(stat_word(0x1FF, 0x1FE, 9, 10, 0x18));
        assert_eq!(stats.attack, 5110);
        assert_eq!(stats.defense, 5100);
        assert_eq!(stats.guardian_star_2, GuardianStarId(9));
        assert_eq!(stats.guardian_star_1, GuardianStarId(10));
        assert_eq!(stats.card_type, CardType(0x18));

        // bit 31 is not part of any field
        assert_eq!(decode_stat_word(1 << 31), decode_stat_word(0));
    }

    #[test]
    fn test_stat_record_offset() {
        let word = stat_word(15, 20, 1, 2, 3).to_le_bytes();
        let record = [0xAA, 0xBB, word[0], word[1], word[2], word[3]];
        let stats = decode_stat_record(&record, 2).unwrap();
        assert_eq!(stats.attack, 150);
        assert_eq!(stats.guardian_star_1, GuardianStarId(2));
        assert!(decode_stat_record(&record[..5], 2).is_none());
    }

    #[test]
    fn test_level_byte() {
        let level = decode_level_byte(0x47);
        assert_eq!(level.level, 7);
        assert_eq!(level.attribute, Attribute(4));
        assert_eq!(level.attribute.to_string(), "Fire");
    }

    #[test]
    fn test_password_record() {
        let mut record = Vec::new();
        record.extend_from_slice(&999_999u32.to_le_bytes());
        record.extend_from_slice(&89_631_139u32.to_le_bytes());
        let decoded = decode_password_record(&record).unwrap();
        assert_eq!(decoded.cost, 999_999);
        assert_eq!(decoded.password.to_string(), "89631139");

        record[4..].copy_from_slice(&NO_PASSWORD.to_le_bytes());
        assert_eq!(decode_password_record(&record).unwrap().password, Password::None);
        assert_eq!(PasswordRecord::SIZE, 8);
    }

    #[test]
    fn test_record_table_stops_short() {
        // stride 4, width 6: the last record needs two bytes past its stride
        let data = [0u8; 14];
        let table = RecordTable {
            label: "stats",
            base: 0,
            stride: 4,
            width: 6,
            count: 4,
        };
        let extraction = table.extract(&data, |r| r.len());
        assert_eq!(extraction.decoded(), 3);
        assert!(!extraction.status().is_complete());
    }
}
