//! Game data extraction for Yu-Gi-Oh! Forbidden Memories.
//!
//! Decodes the executable (`SLUS_014.11`) and the resource archive
//! (`WA_MRG.MRG`) into cards, opponents and drop tables.
//!
//! # Quick Start
//!
//! ```no_run
//! use ygofm_data::{DropTier, ExtractConfig, GameData};
//!
//! let data = GameData::open("SLUS_014.11", "WA_MRG.MRG", ExtractConfig::default())?;
//!
//! let card = data.card(1)?;
//! println!("{} ({})", card.name, card.attack_defense().unwrap_or_default());
//!
//! for source in data.drop_index().sources_in(card.id, DropTier::SaPow) {
//!     println!("  {}: {}/2048", data.opponent_name(source.opponent), source.chance);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Damaged input
//!
//! Offsets are fixed constants located by hand, so short or mismatched
//! images are expected. Nothing here fails on bad data: tables stop early,
//! unreadable text gets a fallback name, and out-of-range drop chances are
//! clamped. Every such event is recorded in the [`LoadReport`] of the load
//! that produced it and logged through `tracing`.

mod card;
mod config;
mod database;
mod diagnostics;
mod drops;
mod equip;
mod error;
mod index;
mod opponent;
mod record;
mod strings;

pub mod layout;

pub use card::{
    Attribute, Card, CardStats, CardType, GuardianStarId, LevelAttribute, Password, PasswordCost,
    CARD_COUNT, NO_PASSWORD,
};
pub use config::ExtractConfig;
pub use database::{read_image, GameData};
pub use diagnostics::{Diagnostic, Diagnostics, LoadReport, TableReport};
pub use drops::{clamp_chance, read_card_table, ChanceEntry, ChanceTable, DropTier, DROP_DENOMINATOR};
pub use equip::{parse_equip_table, EquipEntry, EquipIndex, Field};
pub use error::{Error, Result};
pub use index::{build_index, DropIndex, DropSource};
pub use opponent::{load_opponents, Opponent, OPPONENT_COUNT};
pub use record::{
    decode_level_byte, decode_password_record, decode_stat_record, decode_stat_word,
    PasswordRecord, RecordTable,
};
