//! Opponents and their archive blocks.

use tracing::{debug, warn};
use ygofm_common::{bytes, Extraction};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::config::ExtractConfig;
use crate::diagnostics::{Diagnostic, LoadReport};
use crate::drops::{read_card_table, ChanceTable, DropTier};
use crate::layout::archive;

/// Number of opponent slots. Slot 0 is a non-playable placeholder.
pub const OPPONENT_COUNT: usize = 40;

/// One opponent: deck composition plus three drop tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Opponent {
    pub id: usize,
    pub name: String,
    pub deck: ChanceTable,
    drops: [ChanceTable; 3],
}

impl Opponent {
    /// An opponent with no deck or drop data.
    pub fn empty(id: usize, name: String) -> Self {
        Self {
            id,
            name,
            deck: ChanceTable::default(),
            drops: Default::default(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == 0
    }

    pub fn drops(&self, tier: DropTier) -> &ChanceTable {
        &self.drops[tier.index()]
    }

    pub fn set_drops(&mut self, tier: DropTier, table: ChanceTable) {
        self.drops[tier.index()] = table;
    }
}

/// Fallback opponent name.
pub fn opponent_fallback_name(id: usize) -> String {
    format!("Unknown_{}", id)
}

/// Load every opponent slot from the archive.
///
/// Slot 0 is always present but only read when the config asks for it.
/// Loading stops at the first block that starts past the end of the
/// archive; a block cut short keeps whatever entries it has.
pub fn load_opponents(
    archive: &[u8],
    names: &[String],
    config: &ExtractConfig,
    report: &mut LoadReport,
) -> Vec<Opponent> {
    let name_of = |id: usize| {
        names
            .get(id)
            .cloned()
            .unwrap_or_else(|| opponent_fallback_name(id))
    };

    let first = config.first_opponent();
    let mut opponents: Vec<Opponent> = (0..first)
        .map(|id| Opponent::empty(id, name_of(id)))
        .collect();
    let mut loaded = Vec::new();

    for id in first..OPPONENT_COUNT {
        let block = archive::opponent_block(id);
        if !bytes::fits(archive.len(), block, 1) {
            warn!(
                opponent = id,
                block = format_args!("{:#x}", block),
                "opponent block past end of archive"
            );
            break;
        }

        let opponent = load_block(archive, block, id, name_of(id), report);
        debug!(
            opponent = id,
            name = %opponent.name,
            deck = opponent.deck.len(),
            "loaded opponent"
        );
        loaded.push(opponent);
    }

    let extraction = Extraction::new(loaded, OPPONENT_COUNT - first);
    report.table("opponent blocks", &extraction);
    opponents.extend(extraction.into_items());
    opponents
}

fn load_block(
    archive: &[u8],
    block: usize,
    id: usize,
    name: String,
    report: &mut LoadReport,
) -> Opponent {
    let mut opponent = Opponent::empty(id, name);

    let deck = read_card_table(archive, block + archive::DECK);
    report.diagnostics.check_table("opponent deck", &deck);
    opponent.deck = ChanceTable::weights(deck.items());

    for tier in DropTier::ALL {
        let raw = read_card_table(archive, block + tier.block_offset());
        report.diagnostics.check_table(tier.label(), &raw);

        let table = ChanceTable::drops(raw.items(), |card_id, value| {
            warn!(
                opponent = id,
                %tier,
                card_id,
                raw = value,
                "drop chance above denominator clamped"
            );
            report.diagnostics.push(Diagnostic::ClampedChance {
                opponent: id,
                tier,
                card_id,
                raw: value,
            });
        });
        opponent.set_drops(tier, table);
    }

    opponent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drops::DROP_DENOMINATOR;

    /// An archive holding opponent blocks up to and including `last`.
    fn archive_with(last: usize) -> Vec<u8> {
        vec![0u8; archive::opponent_block(last + 1)]
    }

    fn put_u16(data: &mut [u8], offset: usize, value: u16) {
        data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    #[test]
    fn test_load_block_tables() {
        let mut data = archive_with(1);
        let block = archive::opponent_block(1);
        put_u16(&mut data, block + archive::DECK, 3000); // card 1
        put_u16(&mut data, block + archive::SA_POW + 2, 5000); // card 2
        put_u16(&mut data, block + archive::BCD + 4, 48); // card 3

        let mut report = LoadReport::default();
        let opponents = load_opponents(&data, &[], &ExtractConfig::default(), &mut report);
        let opponent = &opponents[1];

        assert_eq!(opponent.deck.get(1), Some(3000));
        assert_eq!(opponent.drops(DropTier::SaPow).get(2), Some(DROP_DENOMINATOR));
        assert_eq!(opponent.drops(DropTier::Bcd).get(3), Some(48));
        assert!(opponent.drops(DropTier::SaTec).is_empty());
        assert_eq!(report.diagnostics.clamped_count(), 1);
    }

    #[test]
    fn test_placeholder_slot() {
        let mut data = archive_with(2);
        put_u16(&mut data, archive::opponent_block(0) + archive::SA_POW, 10);
        let names = vec!["Duel Master K".to_string(), "Simon Muran".to_string()];

        let mut report = LoadReport::default();
        let skipped = load_opponents(&data, &names, &ExtractConfig::default(), &mut report);
        assert_eq!(skipped[0].name, "Duel Master K");
        assert!(skipped[0].drops(DropTier::SaPow).is_empty());
        assert_eq!(skipped[1].name, "Simon Muran");

        let config = ExtractConfig::default().with_placeholder_opponent(true);
        let included = load_opponents(&data, &names, &config, &mut report);
        assert_eq!(included[0].drops(DropTier::SaPow).get(1), Some(10));
        assert_eq!(included[2].name, "Unknown_2");
    }

    #[test]
    fn test_stops_at_archive_end() {
        let data = archive_with(2);
        let mut report = LoadReport::default();
        let opponents = load_opponents(&data, &[], &ExtractConfig::default(), &mut report);

        // placeholder plus blocks 1 and 2
        assert_eq!(opponents.len(), 3);
        assert!(!report.is_complete());
    }
}
