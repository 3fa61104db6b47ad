//! Per-rule outcomes of inspecting and applying patches.

use std::fmt;

use crate::log::PatchLog;

/// What applying one rule did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleStatus {
    /// Written at these locations.
    Applied { locations: Vec<usize> },
    /// Detected as already applied; nothing written.
    AlreadyApplied,
    /// Signature not present; nothing written.
    PatternNotFound,
    /// Address rule past the end of the image; nothing written.
    OutOfBounds {
        address: usize,
        len: usize,
        image_len: usize,
    },
}

impl RuleStatus {
    /// Only an out-of-bounds address rule counts as a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, RuleStatus::OutOfBounds { .. })
    }
}

/// Status line for one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: String,
    pub status: RuleStatus,
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            RuleStatus::Applied { locations } => {
                write!(f, "{}: applied {} patch(es) at ", self.rule, locations.len())?;
                for (i, location) in locations.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:#x}", location)?;
                }
                Ok(())
            }
            RuleStatus::AlreadyApplied => write!(f, "{}: already applied, skipped", self.rule),
            RuleStatus::PatternNotFound => write!(f, "{}: pattern not found, skipped", self.rule),
            RuleStatus::OutOfBounds {
                address,
                len,
                image_len,
            } => write!(
                f,
                "{}: error: address {:#x} + {} bytes is outside the image ({} bytes)",
                self.rule, address, len, image_len
            ),
        }
    }
}

/// Result of one apply pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    pub outcomes: Vec<RuleOutcome>,
    pub log: PatchLog,
}

impl PatchReport {
    /// Number of locations written.
    pub fn applied_count(&self) -> usize {
        self.log.len()
    }

    pub fn errors(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| o.status.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// True when the image was modified.
    pub fn changed(&self) -> bool {
        !self.log.is_empty()
    }
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{}", outcome)?;
        }
        Ok(())
    }
}

/// State of one rule in an image, without modifying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchState {
    /// Neither the original nor the replacement is present (or the address
    /// is outside the image).
    NotFound,
    /// Original bytes found at these locations.
    Unapplied { locations: Vec<usize> },
    /// Replacement bytes found at these locations.
    Applied { locations: Vec<usize> },
}

/// Inspection line for one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInspection {
    pub rule: String,
    pub state: PatchState,
}

impl fmt::Display for RuleInspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            PatchState::NotFound => write!(f, "{}: not found", self.rule),
            PatchState::Unapplied { locations } => {
                write!(f, "{}: ready to apply {} change(s)", self.rule, locations.len())
            }
            PatchState::Applied { locations } => {
                write!(f, "{}: already applied ({} location(s))", self.rule, locations.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lines() {
        let outcome = |status| RuleOutcome {
            rule: "Win Requirements".to_string(),
            status,
        };

        assert_eq!(
            outcome(RuleStatus::Applied {
                locations: vec![0x10, 0x2A0]
            })
            .to_string(),
            "Win Requirements: applied 2 patch(es) at 0x10, 0x2a0"
        );
        assert_eq!(
            outcome(RuleStatus::PatternNotFound).to_string(),
            "Win Requirements: pattern not found, skipped"
        );
        assert_eq!(
            outcome(RuleStatus::OutOfBounds {
                address: 0x20,
                len: 4,
                image_len: 16
            })
            .to_string(),
            "Win Requirements: error: address 0x20 + 4 bytes is outside the image (16 bytes)"
        );
    }

    #[test]
    fn test_report_errors() {
        let report = PatchReport {
            outcomes: vec![
                RuleOutcome {
                    rule: "a".into(),
                    status: RuleStatus::AlreadyApplied,
                },
                RuleOutcome {
                    rule: "b".into(),
                    status: RuleStatus::OutOfBounds {
                        address: 0,
                        len: 1,
                        image_len: 0,
                    },
                },
            ],
            log: PatchLog::new(),
        };
        assert!(report.has_errors());
        assert_eq!(report.errors().count(), 1);
        assert!(!report.changed());
    }
}
