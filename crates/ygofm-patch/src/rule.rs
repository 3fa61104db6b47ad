//! Patch rules.

use std::fmt;

use ygofm_common::hex::{format_hex, parse_hex};

use crate::catalogue::PatchGroup;
use crate::error::{Error, Result};

/// How a rule finds the bytes it rewrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleTarget {
    /// Every non-overlapping occurrence of `original`.
    Signature { original: Vec<u8> },
    /// A fixed absolute offset.
    Address { address: usize },
}

/// A named binary modification.
///
/// Several rules may share a name (the catalogue groups related edits that
/// way); reversal works on recorded locations, not on names alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRule {
    name: String,
    group: PatchGroup,
    target: RuleTarget,
    replacement: Vec<u8>,
}

impl PatchRule {
    /// Content-matched rule. Only the first `original.len()` bytes of
    /// `replacement` are ever written.
    pub fn signature(
        name: impl Into<String>,
        group: PatchGroup,
        original: Vec<u8>,
        replacement: Vec<u8>,
    ) -> Result<Self> {
        let name = name.into();
        if original.is_empty() {
            return Err(Error::EmptyPattern {
                rule: name,
                which: "original",
            });
        }
        if replacement.is_empty() {
            return Err(Error::EmptyPattern {
                rule: name,
                which: "replacement",
            });
        }
        Ok(Self {
            name,
            group,
            target: RuleTarget::Signature { original },
            replacement,
        })
    }

    /// Rule writing `replacement` at a fixed offset.
    pub fn address(
        name: impl Into<String>,
        group: PatchGroup,
        address: usize,
        replacement: Vec<u8>,
    ) -> Result<Self> {
        let name = name.into();
        if replacement.is_empty() {
            return Err(Error::EmptyPattern {
                rule: name,
                which: "replacement",
            });
        }
        Ok(Self {
            name,
            group,
            target: RuleTarget::Address { address },
            replacement,
        })
    }

    /// Signature rule from hex strings, e.g. `"1B001D3C00AC"` or `"1B 00 1D"`.
    pub fn signature_hex(
        name: impl Into<String>,
        group: PatchGroup,
        original: &str,
        replacement: &str,
    ) -> Result<Self> {
        Self::signature(name, group, parse_hex(original)?, parse_hex(replacement)?)
    }

    /// Address rule from a hex replacement string.
    pub fn address_hex(
        name: impl Into<String>,
        group: PatchGroup,
        address: usize,
        replacement: &str,
    ) -> Result<Self> {
        Self::address(name, group, address, parse_hex(replacement)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> PatchGroup {
        self.group
    }

    pub fn target(&self) -> &RuleTarget {
        &self.target
    }

    /// The replacement as given, including any bytes that are never written.
    pub fn replacement(&self) -> &[u8] {
        &self.replacement
    }

    /// The bytes actually written at each location.
    pub fn written(&self) -> &[u8] {
        match &self.target {
            RuleTarget::Signature { original } => {
                &self.replacement[..self.replacement.len().min(original.len())]
            }
            RuleTarget::Address { .. } => &self.replacement,
        }
    }
}

impl fmt::Display for PatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            RuleTarget::Signature { original } => write!(
                f,
                "{} [{}] {} -> {}",
                self.name,
                self.group,
                format_hex(original),
                format_hex(self.written())
            ),
            RuleTarget::Address { address } => write!(
                f,
                "{} [{}] @ {:#x} -> {}",
                self.name,
                self.group,
                address,
                format_hex(self.written())
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_hex() {
        let rule = PatchRule::signature_hex("t", PatchGroup::Custom, "AA BB CC", "112233").unwrap();
        assert_eq!(
            rule.target(),
            &RuleTarget::Signature {
                original: vec![0xAA, 0xBB, 0xCC]
            }
        );
        assert_eq!(rule.written(), &[0x11, 0x22, 0x33]);
    }

    #[test]
    fn test_long_replacement_is_cut_to_original() {
        let rule = PatchRule::signature("t", PatchGroup::Custom, vec![1, 2], vec![9, 8, 7]).unwrap();
        assert_eq!(rule.replacement(), &[9, 8, 7]);
        assert_eq!(rule.written(), &[9, 8]);
    }

    #[test]
    fn test_empty_patterns_rejected() {
        assert!(matches!(
            PatchRule::signature("t", PatchGroup::Custom, vec![], vec![1]),
            Err(Error::EmptyPattern { which: "original", .. })
        ));
        assert!(matches!(
            PatchRule::address("t", PatchGroup::Custom, 0, vec![]),
            Err(Error::EmptyPattern { which: "replacement", .. })
        ));
        assert!(matches!(
            PatchRule::signature_hex("t", PatchGroup::Custom, "", "11"),
            Err(Error::Common(_))
        ));
    }

    #[test]
    fn test_display() {
        let rule = PatchRule::address_hex("No Password Limit", PatchGroup::NoPasswordLimit, 0x191E7B0, "BEA90508")
            .unwrap();
        assert_eq!(
            rule.to_string(),
            "No Password Limit [No Password Limit] @ 0x191e7b0 -> BEA90508"
        );
    }
}
