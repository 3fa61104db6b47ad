//! ygofm - Yu-Gi-Oh! Forbidden Memories game data toolkit.
//!
//! This crate provides a unified interface to the ygofm library ecosystem.
//!
//! # Crates
//!
//! - [`ygofm_common`] - Bounded binary reads, pattern search, hex, CRC32C
//! - [`ygofm_text`] - Game text codec and pointer-table string extraction
//! - [`ygofm_data`] - Cards, opponents, drop tables and the reverse drop index
//! - [`ygofm_patch`] - Disc-image patch rules, application and reversal
//!
//! # Example
//!
//! ```no_run
//! use ygofm::prelude::*;
//!
//! let data = GameData::open("SLUS_014.11", "WA_MRG.MRG", ExtractConfig::default())?;
//! for card in data.search("dragon") {
//!     println!("{:03} {}", card.id, card.name);
//! }
//!
//! let mut image = std::fs::read("fm.bin")?;
//! let engine = PatchEngine::from_options(&PatchOptions::default())?;
//! let report = engine.apply(&mut image);
//! print!("{}", report);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use ygofm_common as common;
pub use ygofm_data as data;
pub use ygofm_patch as patch;
pub use ygofm_text as text;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use ygofm_common::{crc, hex, Extraction, TableStatus};
    pub use ygofm_data::{
        Card, DropIndex, DropSource, DropTier, ExtractConfig, GameData, LoadReport, Opponent,
    };
    pub use ygofm_patch::{
        reverse, DropRateMode, PatchEngine, PatchGroup, PatchLog, PatchOptions, PatchReport,
        PatchRule,
    };
    pub use ygofm_text::{StringExtractor, TextCodec};
}

pub use ygofm_data::GameData;
pub use ygofm_patch::PatchEngine;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
