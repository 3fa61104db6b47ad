//! The built-in patch catalogue.
//!
//! All signatures target the NTSC-U disc image (`SLUS_014.11` inside the
//! CD image). Bump [`CATALOGUE_VERSION`] whenever a rule changes.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::rule::PatchRule;

/// Revision of the built-in rule table.
pub const CATALOGUE_VERSION: u32 = 1;

/// Families of related rules, selectable as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatchGroup {
    DropRate,
    Starchips,
    NoPasswordLimit,
    WinRequirements,
    ExodiaSTec,
    /// User-supplied rules.
    Custom,
}

impl PatchGroup {
    /// Groups with built-in rules, in catalogue order.
    pub const BUILT_IN: [PatchGroup; 5] = [
        PatchGroup::DropRate,
        PatchGroup::Starchips,
        PatchGroup::NoPasswordLimit,
        PatchGroup::WinRequirements,
        PatchGroup::ExodiaSTec,
    ];

    /// Command-line key.
    pub const fn key(&self) -> &'static str {
        match self {
            PatchGroup::DropRate => "drop-rate",
            PatchGroup::Starchips => "starchips",
            PatchGroup::NoPasswordLimit => "no-password-limit",
            PatchGroup::WinRequirements => "win-requirements",
            PatchGroup::ExodiaSTec => "exodia-s-tec",
            PatchGroup::Custom => "custom",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            PatchGroup::DropRate => "Drop Rate",
            PatchGroup::Starchips => "Starchips",
            PatchGroup::NoPasswordLimit => "No Password Limit",
            PatchGroup::WinRequirements => "Win Requirements",
            PatchGroup::ExodiaSTec => "Exodia S-Tec",
            PatchGroup::Custom => "Custom",
        }
    }
}

impl fmt::Display for PatchGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatchGroup {
    type Err = Error;

    /// Accepts the key (`drop-rate`) or the display name (`Drop Rate`),
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        PatchGroup::BUILT_IN
            .into_iter()
            .chain([PatchGroup::Custom])
            .find(|g| g.key().eq_ignore_ascii_case(wanted) || g.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownGroup(s.to_string()))
    }
}

/// Drop-rate multiplier written by the three variable drop-rate rules.
///
/// Chosen before matching; the original signatures are the same in both
/// modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropRateMode {
    #[default]
    Hundred,
    Thousand,
}

impl DropRateMode {
    /// Replacements for the `0200D7`, `1D00D7` and `0C00D7` rules.
    const fn variable_replacements(&self) -> [&'static str; 3] {
        match self {
            DropRateMode::Hundred => ["640017240200D712", "650017241D00D7", "650017240C00D7"],
            DropRateMode::Thousand => ["E80317240200D712", "E90317241D00D7", "E90317240C00D7"],
        }
    }
}

impl fmt::Display for DropRateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DropRateMode::Hundred => "100",
            DropRateMode::Thousand => "1000",
        })
    }
}

impl FromStr for DropRateMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "100" => Ok(DropRateMode::Hundred),
            "1000" => Ok(DropRateMode::Thousand),
            other => Err(format!("drop rate must be 100 or 1000, got '{}'", other)),
        }
    }
}

const STARCHIPS: [(usize, &str); 2] = [
    (0xB410, "98FF060801004224"),
    (
        0x1B0660,
        "04004B2C1000601500000000FFFF42241D800C3CE0078C2500008D8D0000000A00AD250F000B3C3F426B3500008DAD000000002B686D010200A01100000000008BAD00000C2400000D2400000B24000062A02D860008",
    ),
];

const NO_PASSWORD_LIMIT: (usize, &str) = (0x191E7B0, "BEA90508");

const WIN_REQUIREMENTS: [(&str, &str); 2] = [
    ("900106242A38C5000300E010", "900106242A38C50000000000"),
    ("B80B06242A38C5000300E010", "B80B06242A38C50000000000"),
];

const EXODIA_S_TEC: [(&str, &str); 3] = [
    ("28000224230062", "81FF0224230062"),
    ("28000324FF00", "81FF0324FF00"),
    ("28000224020062", "81FF0224020062"),
];

fn drop_rate_rules(mode: DropRateMode) -> Result<Vec<PatchRule>> {
    let [v0200, v1d00, v0c00] = mode.variable_replacements();
    let table: [(&str, &str, Option<&str>); 12] = [
        ("1B001D3C00AC", "1E801D3C00C0", None),
        ("A32000B693", "A72000B697", None),
        ("100017241D00D7", v1d00, Some("1D00D7")),
        ("A32000B6A3", "A72000B6A7", None),
        ("1B80043C00AC", "1E80043C00C0", None),
        ("A220005692", "A620005696", None),
        ("100017240C00D7", v0c00, Some("0C00D7")),
        ("A2200056A2", "A6200056A6", None),
        ("1B80023C00AC", "1E80023C00C0", None),
        ("90000000000100D626", "94000000000100D626", None),
        ("0F0017240200D712", v0200, Some("0200D7")),
        ("A0200056A0", "A4200056A4", None),
    ];

    table
        .into_iter()
        .map(|(original, replacement, key)| {
            let name = format!("Drop Rate ({})", key.unwrap_or(original));
            PatchRule::signature_hex(name, PatchGroup::DropRate, original, replacement)
        })
        .collect()
}

/// Built-in rules for one group. Empty for [`PatchGroup::Custom`].
pub fn group_rules(group: PatchGroup, mode: DropRateMode) -> Result<Vec<PatchRule>> {
    match group {
        PatchGroup::DropRate => drop_rate_rules(mode),
        PatchGroup::Starchips => STARCHIPS
            .into_iter()
            .map(|(address, replacement)| {
                PatchRule::address_hex(
                    format!("Starchips at {:#x}", address),
                    group,
                    address,
                    replacement,
                )
            })
            .collect(),
        PatchGroup::NoPasswordLimit => {
            let (address, replacement) = NO_PASSWORD_LIMIT;
            Ok(vec![PatchRule::address_hex(
                group.name(),
                group,
                address,
                replacement,
            )?])
        }
        PatchGroup::WinRequirements => signature_family(group, &WIN_REQUIREMENTS),
        PatchGroup::ExodiaSTec => signature_family(group, &EXODIA_S_TEC),
        PatchGroup::Custom => Ok(Vec::new()),
    }
}

/// Several signature rules sharing the group's name.
fn signature_family(group: PatchGroup, table: &[(&str, &str)]) -> Result<Vec<PatchRule>> {
    table
        .iter()
        .map(|(original, replacement)| {
            PatchRule::signature_hex(group.name(), group, original, replacement)
        })
        .collect()
}

/// Every built-in rule, in catalogue order.
pub fn catalogue(mode: DropRateMode) -> Result<Vec<PatchRule>> {
    select(&PatchGroup::BUILT_IN, mode)
}

/// Built-in rules for the given groups, in catalogue order regardless of the
/// order `groups` lists them.
pub fn select(groups: &[PatchGroup], mode: DropRateMode) -> Result<Vec<PatchRule>> {
    let mut rules = Vec::new();
    for group in PatchGroup::BUILT_IN {
        if groups.contains(&group) {
            rules.extend(group_rules(group, mode)?);
        }
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleTarget;

    #[test]
    fn test_catalogue_builds() {
        let rules = catalogue(DropRateMode::Hundred).unwrap();
        let count = |group| rules.iter().filter(|r| r.group() == group).count();
        assert_eq!(count(PatchGroup::DropRate), 12);
        assert_eq!(count(PatchGroup::Starchips), 2);
        assert_eq!(count(PatchGroup::NoPasswordLimit), 1);
        assert_eq!(count(PatchGroup::WinRequirements), 2);
        assert_eq!(count(PatchGroup::ExodiaSTec), 3);
    }

    #[test]
    fn test_names() {
        let rules = catalogue(DropRateMode::Hundred).unwrap();
        let names: Vec<&str> = rules.iter().map(PatchRule::name).collect();
        assert_eq!(names[0], "Drop Rate (1B001D3C00AC)");
        assert_eq!(names[2], "Drop Rate (1D00D7)");
        assert!(names.contains(&"Starchips at 0xb410"));
        assert!(names.contains(&"Starchips at 0x1b0660"));
        assert!(names.contains(&"No Password Limit"));
        assert_eq!(names.iter().filter(|n| **n == "Exodia S-Tec").count(), 3);
    }

    #[test]
    fn test_drop_rate_mode_changes_replacement_only() {
        let hundred = group_rules(PatchGroup::DropRate, DropRateMode::Hundred).unwrap();
        let thousand = group_rules(PatchGroup::DropRate, DropRateMode::Thousand).unwrap();

        assert_eq!(hundred[10].target(), thousand[10].target());
        assert_eq!(hundred[10].written(), &[0x64, 0x00, 0x17, 0x24, 0x02, 0x00, 0xD7, 0x12]);
        assert_eq!(thousand[10].written(), &[0xE8, 0x03, 0x17, 0x24, 0x02, 0x00, 0xD7, 0x12]);
        assert_eq!(hundred[0], thousand[0]);
    }

    #[test]
    fn test_select_keeps_catalogue_order() {
        let rules = select(
            &[PatchGroup::ExodiaSTec, PatchGroup::NoPasswordLimit],
            DropRateMode::Hundred,
        )
        .unwrap();
        assert_eq!(rules.len(), 4);
        assert_eq!(rules[0].group(), PatchGroup::NoPasswordLimit);
        assert_eq!(rules[0].target(), &RuleTarget::Address { address: 0x191E7B0 });
    }

    #[test]
    fn test_parse_group() {
        assert_eq!("drop-rate".parse::<PatchGroup>().unwrap(), PatchGroup::DropRate);
        assert_eq!("Exodia S-Tec".parse::<PatchGroup>().unwrap(), PatchGroup::ExodiaSTec);
        assert!("speed".parse::<PatchGroup>().is_err());
        assert_eq!("1000".parse::<DropRateMode>().unwrap(), DropRateMode::Thousand);
        assert!("10".parse::<DropRateMode>().is_err());
    }
}
