//! The decoded game data model.

use std::path::Path;

use tracing::info;
use ygofm_common::Extraction;
use ygofm_text::{EntryStatus, ExtractedString, FallbackReason, StringExtractor, StringTable};

use crate::card::{Attribute, Card, CardType, GuardianStarId, CARD_COUNT};
use crate::config::ExtractConfig;
use crate::diagnostics::{Diagnostic, LoadReport};
use crate::equip::EquipIndex;
use crate::index::{build_index, DropIndex};
use crate::layout::{archive, executable as exe};
use crate::opponent::{load_opponents, opponent_fallback_name, Opponent, OPPONENT_COUNT};
use crate::record::{decode_level_byte, decode_password_record, decode_stat_record, RecordTable};
use crate::{strings, Error, Result};

/// Cards, opponents and derived indices decoded from the executable and the
/// resource archive.
///
/// The two images are loaded independently. Loading one replaces everything
/// derived from it and rebuilds the indices that depend on it.
#[derive(Debug, Clone)]
pub struct GameData {
    config: ExtractConfig,
    cards: Vec<Card>,
    type_names: Vec<ExtractedString>,
    guardian_stars: Vec<ExtractedString>,
    opponent_names: Vec<String>,
    opponents: Vec<Opponent>,
    drop_index: DropIndex,
    equips: EquipIndex,
    executable_report: LoadReport,
    archive_report: LoadReport,
}

impl GameData {
    /// Empty data: every card has fallback text and no records.
    pub fn new(config: ExtractConfig) -> Self {
        Self {
            config,
            cards: (1..=CARD_COUNT).map(Card::placeholder).collect(),
            type_names: Vec::new(),
            guardian_stars: Vec::new(),
            opponent_names: Vec::new(),
            opponents: Vec::new(),
            drop_index: DropIndex::default(),
            equips: EquipIndex::default(),
            executable_report: LoadReport::default(),
            archive_report: LoadReport::default(),
        }
    }

    /// Decode both images.
    pub fn from_images(executable: &[u8], archive: &[u8], config: ExtractConfig) -> Self {
        let mut data = Self::new(config);
        data.load_executable(executable);
        data.load_archive(archive);
        data
    }

    /// Read both images from disk and decode them.
    pub fn open(
        executable: impl AsRef<Path>,
        archive: impl AsRef<Path>,
        config: ExtractConfig,
    ) -> Result<Self> {
        let executable = read_image(executable)?;
        let archive = read_image(archive)?;
        Ok(Self::from_images(&executable, &archive, config))
    }

    /// Decode names, descriptions, stats and levels from the executable.
    pub fn load_executable(&mut self, data: &[u8]) -> &LoadReport {
        let mut report = LoadReport::default();
        let extractor = StringExtractor::new(data);

        let names = extract_strings(&extractor, &strings::card_names(), &mut report);
        let descriptions = extract_strings(&extractor, &strings::card_descriptions(), &mut report);
        self.type_names =
            extract_strings(&extractor, &strings::type_names(), &mut report).into_items();
        self.guardian_stars =
            extract_strings(&extractor, &strings::guardian_stars(), &mut report).into_items();
        let opponent_names = extract_strings(&extractor, &strings::opponent_names(), &mut report);

        let stats = RecordTable {
            label: "card stats",
            base: exe::STATS,
            stride: exe::STATS_STRIDE,
            width: exe::STATS_WORD_OFFSET + 4,
            count: CARD_COUNT,
        }
        .extract(data, |record| decode_stat_record(record, exe::STATS_WORD_OFFSET));
        report.table("card stats", &stats);

        let levels = RecordTable {
            label: "card levels",
            base: exe::LEVELS,
            stride: 1,
            width: 1,
            count: CARD_COUNT,
        }
        .extract(data, |record| decode_level_byte(record[0]));
        report.table("card levels", &levels);

        for (i, card) in self.cards.iter_mut().enumerate() {
            let placeholder = Card::placeholder(card.id);
            card.name = text_at(&names, i).unwrap_or(placeholder.name);
            card.description = text_at(&descriptions, i).unwrap_or(placeholder.description);
            card.stats = stats.items().get(i).copied().flatten();
            card.level = levels.items().get(i).copied();
        }

        self.opponent_names = opponent_names
            .into_items()
            .into_iter()
            .map(|entry| entry.text)
            .collect();
        let known = &self.opponent_names;
        for opponent in &mut self.opponents {
            opponent.name = known
                .get(opponent.id)
                .cloned()
                .unwrap_or_else(|| opponent_fallback_name(opponent.id));
        }

        info!(
            cards = names.decoded(),
            types = self.type_names.len(),
            guardian_stars = self.guardian_stars.len(),
            opponents = self.opponent_names.len(),
            diagnostics = report.diagnostics.len(),
            "loaded executable"
        );
        self.executable_report = report;
        &self.executable_report
    }

    /// Decode opponents, passwords and equip tables from the archive, then
    /// rebuild the drop index.
    pub fn load_archive(&mut self, data: &[u8]) -> &LoadReport {
        let mut report = LoadReport::default();

        self.opponents = load_opponents(data, &self.opponent_names, &self.config, &mut report);

        let passwords = RecordTable {
            label: "passwords",
            base: archive::PASSWORDS,
            stride: archive::PASSWORD_STRIDE,
            width: archive::PASSWORD_STRIDE,
            count: CARD_COUNT,
        }
        .extract(data, decode_password_record);
        report.table("passwords", &passwords);

        for (i, card) in self.cards.iter_mut().enumerate() {
            card.password = passwords.items().get(i).copied().flatten();
        }

        self.equips = EquipIndex::from_archive(data);
        self.drop_index = build_index(&self.opponents, self.config.include_placeholder_opponent);

        info!(
            opponents = self.opponents.len(),
            passwords = passwords.decoded(),
            equippable = self.equips.len(),
            drop_entries = self.drop_index.len(),
            clamped = report.diagnostics.clamped_count(),
            "loaded archive"
        );
        self.archive_report = report;
        &self.archive_report
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// All cards, in id order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: usize) -> Result<&Card> {
        id.checked_sub(1)
            .and_then(|i| self.cards.get(i))
            .ok_or(Error::CardNotFound(id))
    }

    /// Loaded opponents, in id order. Empty until an archive is loaded.
    pub fn opponents(&self) -> &[Opponent] {
        &self.opponents
    }

    pub fn opponent(&self, id: usize) -> Result<&Opponent> {
        self.opponents
            .get(id)
            .ok_or(Error::OpponentNotFound(id))
    }

    /// Display name of an opponent id, whether or not its block was loaded.
    pub fn opponent_name(&self, id: usize) -> String {
        self.opponent_names
            .get(id)
            .cloned()
            .unwrap_or_else(|| opponent_fallback_name(id))
    }

    /// Number of opponent slots, loaded or not.
    pub fn opponent_slots(&self) -> usize {
        OPPONENT_COUNT
    }

    pub fn drop_index(&self) -> &DropIndex {
        &self.drop_index
    }

    /// Equip cards usable on a card.
    pub fn equips_for(&self, card_id: usize) -> &[u16] {
        u16::try_from(card_id)
            .map(|id| self.equips.equips_for(id))
            .unwrap_or(&[])
    }

    /// Type name: decoded from the executable, else the built-in table.
    pub fn type_name(&self, card_type: CardType) -> String {
        match self.type_names.get(card_type.0 as usize) {
            Some(entry) if entry.status == EntryStatus::Decoded => entry.text.clone(),
            _ => card_type.to_string(),
        }
    }

    /// Guardian star name; ids outside the table render `Unknown GS (<id>)`.
    pub fn guardian_star_name(&self, star: GuardianStarId) -> String {
        (star.0 as usize)
            .checked_sub(1)
            .and_then(|i| self.guardian_stars.get(i))
            .map(|entry| entry.text.clone())
            .unwrap_or_else(|| format!("Unknown GS ({})", star.0))
    }

    pub fn attribute_name(&self, attribute: Attribute) -> String {
        attribute.to_string()
    }

    /// Cards whose id, name, `ATK/DEF` or description contains `query`,
    /// ignoring case. An empty query matches every card.
    pub fn search(&self, query: &str) -> Vec<&Card> {
        let query = query.trim().to_lowercase();
        self.cards
            .iter()
            .filter(|card| {
                query.is_empty()
                    || card.id.to_string().contains(&query)
                    || card.name.to_lowercase().contains(&query)
                    || card
                        .attack_defense()
                        .is_some_and(|stats| stats.contains(&query))
                    || card.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn executable_report(&self) -> &LoadReport {
        &self.executable_report
    }

    pub fn archive_report(&self) -> &LoadReport {
        &self.archive_report
    }
}

impl Default for GameData {
    fn default() -> Self {
        Self::new(ExtractConfig::default())
    }
}

/// Read a whole image into memory.
pub fn read_image(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn extract_strings(
    extractor: &StringExtractor<'_>,
    table: &StringTable,
    report: &mut LoadReport,
) -> Extraction<ExtractedString> {
    let extraction = extractor.extract(table);
    report.table(table.label, &extraction);

    for entry in extraction.items() {
        match entry.status {
            EntryStatus::Decoded => {}
            EntryStatus::Fallback(FallbackReason::OutOfRange) => {
                report.diagnostics.push(Diagnostic::OffsetOutOfRange {
                    table: table.label,
                    id: entry.id,
                    offset: entry.offset,
                })
            }
            EntryStatus::Fallback(reason) => report.diagnostics.push(Diagnostic::FallbackName {
                table: table.label,
                id: entry.id,
                reason,
            }),
        }
    }

    extraction
}

fn text_at(extraction: &Extraction<ExtractedString>, index: usize) -> Option<String> {
    extraction.items().get(index).map(|entry| entry.text.clone())
}
