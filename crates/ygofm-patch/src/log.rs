//! Record of applied patches, the input to reversal.

use std::collections::BTreeSet;
use std::fmt;

use ygofm_common::hex::format_hex;

/// One concrete write made by a rule.
///
/// `original` holds exactly the bytes that `written` replaced, so writing it
/// back at `location` undoes the patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedPatch {
    pub rule: String,
    pub location: usize,
    pub original: Vec<u8>,
    pub written: Vec<u8>,
}

impl fmt::Display for AppliedPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {:#x}: {} -> {}",
            self.rule,
            self.location,
            format_hex(&self.original),
            format_hex(&self.written)
        )
    }
}

/// Applied patches in application order. Lives for one session only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchLog {
    entries: Vec<AppliedPatch>,
}

impl PatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: AppliedPatch) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, other: PatchLog) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[AppliedPatch] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct rule names, sorted.
    pub fn rule_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.rule.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Entries whose rule name is in `names`, in application order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> PatchLog {
        PatchLog {
            entries: self
                .entries
                .iter()
                .filter(|e| names.iter().any(|n| n.as_ref() == e.rule))
                .cloned()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PatchLog {
    type Item = &'a AppliedPatch;
    type IntoIter = std::slice::Iter<'a, AppliedPatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rule: &str, location: usize) -> AppliedPatch {
        AppliedPatch {
            rule: rule.to_string(),
            location,
            original: vec![0xAA],
            written: vec![0x11],
        }
    }

    #[test]
    fn test_rule_names_and_select() {
        let mut log = PatchLog::new();
        log.push(entry("Win Requirements", 0x40));
        log.push(entry("Exodia S-Tec", 0x10));
        log.push(entry("Win Requirements", 0x80));

        assert_eq!(log.rule_names(), vec!["Exodia S-Tec", "Win Requirements"]);

        let win = log.select(&["Win Requirements"]);
        let locations: Vec<usize> = win.entries().iter().map(|e| e.location).collect();
        assert_eq!(locations, vec![0x40, 0x80]);
        assert!(log.select::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(entry("X", 0x10).to_string(), "X at 0x10: AA -> 11");
    }
}
