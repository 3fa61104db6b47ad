//! Card model.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Number of cards in the game. Card ids run `1..=CARD_COUNT`.
pub const CARD_COUNT: usize = 722;

/// Monster or card type id (0 = unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CardType(pub u8);

impl CardType {
    /// Built-in name, used when the executable has no entry for this id.
    pub fn static_name(&self) -> Option<&'static str> {
        TYPE_NAMES.get(self.0 as usize).copied()
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.static_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown Type ({})", self.0),
        }
    }
}

const TYPE_NAMES: [&str; 25] = [
    "Unknown",
    "Warrior",
    "Spellcaster",
    "Fairy",
    "Fiend",
    "Dragon",
    "Zombie",
    "Machine",
    "Aqua",
    "Pyro",
    "Spellcaster",
    "Thunder",
    "Dinosaur",
    "Rock",
    "Winged Beast",
    "Plant",
    "Insect",
    "Beast",
    "Beast-Warrior",
    "Reptile",
    "Fish",
    "Sea Serpent",
    "Spell",
    "Trap",
    "Ritual",
];

/// Elemental attribute id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Attribute(pub u8);

impl Attribute {
    pub fn name(&self) -> Option<&'static str> {
        ATTRIBUTE_NAMES.get(self.0 as usize).copied()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown Attribute ({:#x})", self.0),
        }
    }
}

const ATTRIBUTE_NAMES: [&str; 9] = [
    "Light", "Dark", "Earth", "Water", "Fire", "Wind", "Spell", "Trap", "Divine",
];

/// Guardian star id, 1-based. 0 means none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GuardianStarId(pub u8);

/// Attack, defense, type and guardian stars, unpacked from one stat word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CardStats {
    pub attack: u16,
    pub defense: u16,
    pub guardian_star_1: GuardianStarId,
    pub guardian_star_2: GuardianStarId,
    pub card_type: CardType,
}

/// Level (0..=15) and attribute, unpacked from one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LevelAttribute {
    pub level: u8,
    pub attribute: Attribute,
}

/// Password sentinel meaning the card cannot be bought with a code.
pub const NO_PASSWORD: u32 = 0xFFFF_FFFE;

/// A card's shop password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Password {
    Code(u32),
    None,
}

impl Password {
    pub fn from_raw(raw: u32) -> Self {
        if raw == NO_PASSWORD {
            Password::None
        } else {
            Password::Code(raw)
        }
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Password::Code(code) => write!(f, "{:08}", code),
            Password::None => f.write_str("No Password"),
        }
    }
}

/// Password and starchip cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PasswordCost {
    pub cost: u32,
    pub password: Password,
}

/// One card, as decoded from the executable and archive.
///
/// Fields backed by a table that was truncated are `None`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Card {
    pub id: usize,
    pub name: String,
    pub description: String,
    pub stats: Option<CardStats>,
    pub level: Option<LevelAttribute>,
    pub password: Option<PasswordCost>,
}

impl Card {
    /// A card with fallback text and no records.
    pub fn placeholder(id: usize) -> Self {
        Self {
            id,
            name: format!("Unknown_{}", id),
            description: format!("Unknown_{}", id),
            stats: None,
            level: None,
            password: None,
        }
    }

    /// `ATK/DEF` as shown in card lists.
    pub fn attack_defense(&self) -> Option<String> {
        self.stats
            .map(|stats| format!("{}/{}", stats.attack, stats.defense))
    }
}
