//! Drop and deck chance tables.
//!
//! Every opponent block holds four tables of one little-endian u16 per card:
//! the deck composition and three drop tiers. Drop chances are numerators
//! over [`DROP_DENOMINATOR`]; deck weights are raw.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::warn;
use ygofm_common::{BinaryReader, Extraction};

use crate::card::CARD_COUNT;
use crate::layout::archive;

/// Denominator of every drop chance.
pub const DROP_DENOMINATOR: u16 = 2048;

/// One of the three drop tables an opponent rewards from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum DropTier {
    /// S or A rank, won by power.
    SaPow,
    /// B, C or D rank.
    Bcd,
    /// S or A rank, won by technique.
    SaTec,
}

impl DropTier {
    /// All tiers, in aggregation order.
    pub const ALL: [DropTier; 3] = [DropTier::SaPow, DropTier::Bcd, DropTier::SaTec];

    /// Offset of this tier's table inside an opponent block.
    pub const fn block_offset(&self) -> usize {
        match self {
            DropTier::SaPow => archive::SA_POW,
            DropTier::Bcd => archive::BCD,
            DropTier::SaTec => archive::SA_TEC,
        }
    }

    pub const fn index(&self) -> usize {
        match self {
            DropTier::SaPow => 0,
            DropTier::Bcd => 1,
            DropTier::SaTec => 2,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            DropTier::SaPow => "S/A-POW",
            DropTier::Bcd => "B/C/D",
            DropTier::SaTec => "S/A-TEC",
        }
    }
}

impl fmt::Display for DropTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One non-zero entry of a chance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ChanceEntry {
    pub card_id: usize,
    pub weight: u16,
}

/// Non-zero entries of one table, in card id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ChanceTable {
    entries: Vec<ChanceEntry>,
}

impl ChanceTable {
    /// Deck weights: zero entries omitted, nothing clamped.
    pub fn weights(raw: &[u16]) -> Self {
        Self::collect(raw, |_, value| value)
    }

    /// Drop chances: zero entries omitted, values above the denominator
    /// clamped. `on_clamp` receives `(card_id, raw)` for every clamp.
    pub fn drops(raw: &[u16], mut on_clamp: impl FnMut(usize, u16)) -> Self {
        Self::collect(raw, |card_id, value| {
            let (chance, clamped) = clamp_chance(value);
            if clamped {
                on_clamp(card_id, value);
            }
            chance
        })
    }

    fn collect(raw: &[u16], mut map: impl FnMut(usize, u16) -> u16) -> Self {
        let entries = raw
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0)
            .map(|(i, &value)| {
                let card_id = i + 1;
                ChanceEntry {
                    card_id,
                    weight: map(card_id, value),
                }
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ChanceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChanceEntry> {
        self.entries.iter()
    }

    /// Weight for a card, if it appears in this table.
    pub fn get(&self, card_id: usize) -> Option<u16> {
        self.entries
            .binary_search_by_key(&card_id, |e| e.card_id)
            .ok()
            .map(|i| self.entries[i].weight)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights.
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.weight as u32).sum()
    }
}

/// Clamp a raw drop value to the denominator; the flag is set when it was.
#[inline]
pub fn clamp_chance(raw: u16) -> (u16, bool) {
    if raw > DROP_DENOMINATOR {
        (DROP_DENOMINATOR, true)
    } else {
        (raw, false)
    }
}

/// Read one u16 per card starting at `offset`, stopping at the buffer end.
pub fn read_card_table(buffer: &[u8], offset: usize) -> Extraction<u16> {
    let mut reader = BinaryReader::new_at(buffer, offset);
    let mut values = Vec::with_capacity(CARD_COUNT);

    while values.len() < CARD_COUNT {
        match reader.read_u16() {
            Ok(value) => values.push(value),
            Err(_) => {
                warn!(
                    offset = format_args!("{:#x}", offset),
                    decoded = values.len(),
                    "card table truncated"
                );
                break;
            }
        }
    }

    Extraction::new(values, CARD_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_and_omit() {
        let raw = [0, 5000, 2048, 12];
        let mut clamped = Vec::new();
        let table = ChanceTable::drops(&raw, |card_id, value| clamped.push((card_id, value)));

        assert_eq!(table.get(1), None);
        assert_eq!(table.get(2), Some(2048));
        assert_eq!(table.get(3), Some(2048));
        assert_eq!(table.get(4), Some(12));
        assert_eq!(table.len(), 3);
        assert_eq!(clamped, vec![(2, 5000)]);
    }

    #[test]
    fn test_deck_weights_unclamped() {
        let table = ChanceTable::weights(&[3000, 0, 7]);
        assert_eq!(table.get(1), Some(3000));
        assert_eq!(table.get(2), None);
        assert_eq!(table.total(), 3007);
    }

    #[test]
    fn test_read_card_table_truncated() {
        let data = [0x01, 0x00, 0x02, 0x00, 0x03];
        let table = read_card_table(&data, 0);
        assert_eq!(table.items(), &[1, 2]);
        assert!(!table.status().is_complete());

        let past_end = read_card_table(&data, 100);
        assert_eq!(past_end.decoded(), 0);
    }

    #[test]
    fn test_read_card_table_complete() {
        let mut data = vec![0u8; CARD_COUNT * 2];
        data[0] = 0x34;
        data[1] = 0x12;
        let table = read_card_table(&data, 0);
        assert!(table.status().is_complete());
        assert_eq!(table.items()[0], 0x1234);
    }
}
