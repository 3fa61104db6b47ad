//! Equip compatibility tables.
//!
//! The archive holds one equip table per duel field. Each table is a list of
//! entries: equip card id (u16, 0 ends the table), material count (u16),
//! then that many u16 card ids the equip can be used on.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};
use ygofm_common::{bytes, BinaryReader};

use crate::layout::archive::EQUIP_TABLE_LEN;

/// Duel field an equip table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    NoField,
    Forest,
    Wasteland,
    Mountain,
    Sogen,
    Umi,
    Yami,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::NoField,
        Field::Forest,
        Field::Wasteland,
        Field::Mountain,
        Field::Sogen,
        Field::Umi,
        Field::Yami,
    ];

    /// Archive offset of this field's equip table.
    pub const fn table_offset(&self) -> usize {
        match self {
            Field::NoField => 0xB85000,
            Field::Forest => 0xBFA800,
            Field::Wasteland => 0xC70000,
            Field::Mountain => 0xCE5800,
            Field::Sogen => 0xD5B000,
            Field::Umi => 0xDD0800,
            Field::Yami => 0xE46000,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::NoField => "No Field",
            Field::Forest => "Forest",
            Field::Wasteland => "Wasteland",
            Field::Mountain => "Mountain",
            Field::Sogen => "Sogen",
            Field::Umi => "Umi",
            Field::Yami => "Yami",
        })
    }
}

/// One equip card and the cards it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipEntry {
    pub equip_id: u16,
    pub targets: Vec<u16>,
}

/// Parse one equip table region.
///
/// Zero target ids are skipped. An entry cut off by the end of the region is
/// kept with the targets read so far, and parsing stops.
pub fn parse_equip_table(region: &[u8]) -> Vec<EquipEntry> {
    let mut reader = BinaryReader::new(region);
    let mut entries = Vec::new();

    while let Ok(equip_id) = reader.read_u16() {
        if equip_id == 0 {
            break;
        }
        let Ok(count) = reader.read_u16() else {
            break;
        };

        let mut targets = Vec::with_capacity(count as usize);
        let mut complete = true;
        for _ in 0..count {
            match reader.read_u16() {
                Ok(0) => {}
                Ok(card_id) => targets.push(card_id),
                Err(_) => {
                    complete = false;
                    break;
                }
            }
        }

        entries.push(EquipEntry { equip_id, targets });
        if !complete {
            warn!(equip_id, "equip entry runs past its table");
            break;
        }
    }

    entries
}

/// Card id to the equip cards usable on it, in table order without
/// duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipIndex {
    by_card: BTreeMap<u16, Vec<u16>>,
}

impl EquipIndex {
    /// Build from the archive's seven field tables.
    pub fn from_archive(archive: &[u8]) -> Self {
        let mut index = Self::default();
        for field in Field::ALL {
            let region = bytes::slice_clipped(archive, field.table_offset(), EQUIP_TABLE_LEN);
            let entries = parse_equip_table(region);
            debug!(%field, entries = entries.len(), "parsed equip table");
            index.add_entries(&entries);
        }
        index
    }

    /// Merge parsed entries into the index.
    pub fn add_entries(&mut self, entries: &[EquipEntry]) {
        for entry in entries {
            for &card_id in &entry.targets {
                let equips = self.by_card.entry(card_id).or_default();
                if !equips.contains(&entry.equip_id) {
                    equips.push(entry.equip_id);
                }
            }
        }
    }

    /// Equip cards usable on `card_id`.
    pub fn equips_for(&self, card_id: u16) -> &[u16] {
        self.by_card
            .get(&card_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of cards with at least one equip.
    pub fn len(&self) -> usize {
        self.by_card.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_card.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(values: &[u16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_parse_table() {
        let region = words(&[301, 3, 5, 0, 7, 302, 1, 5, 0, 999]);
        let entries = parse_equip_table(&region);
        assert_eq!(
            entries,
            vec![
                EquipEntry { equip_id: 301, targets: vec![5, 7] },
                EquipEntry { equip_id: 302, targets: vec![5] },
            ]
        );
    }

    #[test]
    fn test_parse_truncated_entry() {
        let region = words(&[301, 4, 5, 6]);
        let entries = parse_equip_table(&region);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].targets, vec![5, 6]);
    }

    #[test]
    fn test_index_dedup_and_order() {
        let mut index = EquipIndex::default();
        index.add_entries(&parse_equip_table(&words(&[302, 1, 5, 301, 2, 5, 9, 0])));
        index.add_entries(&parse_equip_table(&words(&[302, 1, 5, 0])));

        assert_eq!(index.equips_for(5), &[302, 301]);
        assert_eq!(index.equips_for(9), &[301]);
        assert!(index.equips_for(1).is_empty());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_from_short_archive() {
        assert!(EquipIndex::from_archive(&[0u8; 64]).is_empty());
    }
}
