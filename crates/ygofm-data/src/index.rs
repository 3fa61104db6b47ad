//! Reverse drop index: which opponents drop a card, in which tier.

#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::debug;

use crate::card::CARD_COUNT;
use crate::drops::DropTier;
use crate::opponent::Opponent;

/// One way to win a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DropSource {
    pub opponent: usize,
    pub tier: DropTier,
    pub chance: u16,
}

/// Card id to drop sources, ordered by opponent then tier.
///
/// Derived data: rebuild it with [`build_index`] whenever the opponent set
/// changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIndex {
    by_card: Vec<Vec<DropSource>>,
}

impl Default for DropIndex {
    fn default() -> Self {
        Self {
            by_card: vec![Vec::new(); CARD_COUNT],
        }
    }
}

impl DropIndex {
    /// All sources for a card; empty for unknown ids.
    pub fn sources(&self, card_id: usize) -> &[DropSource] {
        card_id
            .checked_sub(1)
            .and_then(|i| self.by_card.get(i))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sources for a card in one tier.
    pub fn sources_in(&self, card_id: usize, tier: DropTier) -> impl Iterator<Item = &DropSource> {
        self.sources(card_id).iter().filter(move |s| s.tier == tier)
    }

    /// Number of cards that drop from at least one opponent.
    pub fn droppable_cards(&self) -> usize {
        self.by_card.iter().filter(|s| !s.is_empty()).count()
    }

    /// Total number of (card, opponent, tier) entries.
    pub fn len(&self) -> usize {
        self.by_card.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the reverse index from scratch.
///
/// Opponent 0 is skipped unless `include_placeholder` is set.
pub fn build_index(opponents: &[Opponent], include_placeholder: bool) -> DropIndex {
    let mut index = DropIndex::default();

    for opponent in opponents {
        if opponent.is_placeholder() && !include_placeholder {
            continue;
        }
        for tier in DropTier::ALL {
            for entry in opponent.drops(tier).iter() {
                if let Some(sources) = entry
                    .card_id
                    .checked_sub(1)
                    .and_then(|i| index.by_card.get_mut(i))
                {
                    sources.push(DropSource {
                        opponent: opponent.id,
                        tier,
                        chance: entry.weight,
                    });
                }
            }
        }
    }

    debug!(
        entries = index.len(),
        cards = index.droppable_cards(),
        "built drop index"
    );
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drops::ChanceTable;

    fn opponent(id: usize, pow: &[u16], bcd: &[u16]) -> Opponent {
        let mut opponent = Opponent::empty(id, format!("Opponent {}", id));
        opponent.set_drops(DropTier::SaPow, ChanceTable::drops(pow, |_, _| {}));
        opponent.set_drops(DropTier::Bcd, ChanceTable::drops(bcd, |_, _| {}));
        opponent
    }

    fn opponents() -> Vec<Opponent> {
        vec![
            opponent(0, &[99], &[]),
            opponent(1, &[10, 0, 5], &[20]),
            opponent(2, &[0, 0, 7], &[30, 1]),
        ]
    }

    #[test]
    fn test_ordering() {
        let index = build_index(&opponents(), false);

        let card1: Vec<_> = index
            .sources(1)
            .iter()
            .map(|s| (s.opponent, s.tier, s.chance))
            .collect();
        assert_eq!(
            card1,
            vec![
                (1, DropTier::SaPow, 10),
                (1, DropTier::Bcd, 20),
                (2, DropTier::Bcd, 30),
            ]
        );

        let card3: Vec<_> = index.sources(3).iter().map(|s| s.opponent).collect();
        assert_eq!(card3, vec![1, 2]);
        assert_eq!(index.sources_in(1, DropTier::Bcd).count(), 2);
    }

    #[test]
    fn test_deterministic_rebuild() {
        let opponents = opponents();
        assert_eq!(build_index(&opponents, false), build_index(&opponents, false));
    }

    #[test]
    fn test_placeholder_inclusion() {
        let skipped = build_index(&opponents(), false);
        assert!(skipped.sources(1).iter().all(|s| s.opponent != 0));

        let included = build_index(&opponents(), true);
        assert_eq!(included.sources(1)[0].opponent, 0);
        assert_eq!(included.len(), skipped.len() + 1);
    }

    #[test]
    fn test_unknown_card_ids() {
        let index = build_index(&opponents(), false);
        assert!(index.sources(0).is_empty());
        assert!(index.sources(CARD_COUNT + 1).is_empty());
    }
}
