//! Rule matching, idempotency detection and application.

use tracing::{debug, info, warn};
use ygofm_common::{bytes, search};

use crate::catalogue::{self, DropRateMode, PatchGroup};
use crate::error::Result;
use crate::log::{AppliedPatch, PatchLog};
use crate::report::{PatchReport, PatchState, RuleInspection, RuleOutcome, RuleStatus};
use crate::rule::{PatchRule, RuleTarget};

/// Which built-in rules to run, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOptions {
    /// Re-apply rules that are detected as already applied.
    pub force: bool,
    pub drop_rate_mode: DropRateMode,
    pub groups: Vec<PatchGroup>,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            force: false,
            drop_rate_mode: DropRateMode::default(),
            groups: PatchGroup::BUILT_IN.to_vec(),
        }
    }
}

/// Applies a list of rules to a disc image held in memory.
///
/// Rules run in order and each one sees the writes of the rules before it.
/// A failing rule never stops the others.
#[derive(Debug, Clone, Default)]
pub struct PatchEngine {
    rules: Vec<PatchRule>,
    force: bool,
}

impl PatchEngine {
    pub fn new(rules: Vec<PatchRule>) -> Self {
        Self {
            rules,
            force: false,
        }
    }

    /// Engine over the built-in rules selected by `options`.
    pub fn from_options(options: &PatchOptions) -> Result<Self> {
        let rules = catalogue::select(&options.groups, options.drop_rate_mode)?;
        Ok(Self::new(rules).with_force(options.force))
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn add_rule(&mut self, rule: PatchRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[PatchRule] {
        &self.rules
    }

    pub fn is_forced(&self) -> bool {
        self.force
    }

    /// Report each rule's state in `image` without modifying it.
    pub fn inspect(&self, image: &[u8]) -> Vec<RuleInspection> {
        self.rules
            .iter()
            .map(|rule| RuleInspection {
                rule: rule.name().to_string(),
                state: inspect_rule(rule, image),
            })
            .collect()
    }

    /// Apply every rule to `image`.
    ///
    /// The returned log holds the bytes each write replaced; it is the only
    /// way to undo the pass.
    pub fn apply(&self, image: &mut [u8]) -> PatchReport {
        let mut report = PatchReport::default();

        for rule in &self.rules {
            let status = match rule.target() {
                RuleTarget::Signature { original } => {
                    apply_signature(rule, original, image, self.force, &mut report.log)
                }
                RuleTarget::Address { address } => {
                    apply_address(rule, *address, image, self.force, &mut report.log)
                }
            };

            match &status {
                RuleStatus::Applied { locations } => {
                    info!(rule = rule.name(), count = locations.len(), "applied patch")
                }
                RuleStatus::AlreadyApplied => {
                    info!(rule = rule.name(), "patch already applied, skipped")
                }
                RuleStatus::PatternNotFound => {
                    warn!(rule = rule.name(), "no matches for patch signature")
                }
                RuleStatus::OutOfBounds {
                    address,
                    len,
                    image_len,
                } => warn!(
                    rule = rule.name(),
                    address, len, image_len, "patch address outside image"
                ),
            }

            report.outcomes.push(RuleOutcome {
                rule: rule.name().to_string(),
                status,
            });
        }

        debug!(
            rules = self.rules.len(),
            writes = report.log.len(),
            "patch pass complete"
        );
        report
    }
}

fn inspect_rule(rule: &PatchRule, image: &[u8]) -> PatchState {
    match rule.target() {
        RuleTarget::Signature { original } => {
            let found = search::find_all(original, image);
            if !found.is_empty() {
                return PatchState::Unapplied { locations: found };
            }
            let applied = search::find_all(rule.written(), image);
            if applied.is_empty() {
                PatchState::NotFound
            } else {
                PatchState::Applied { locations: applied }
            }
        }
        RuleTarget::Address { address } => match bytes::slice(image, *address, rule.written().len())
        {
            Ok(current) if current == rule.written() => PatchState::Applied {
                locations: vec![*address],
            },
            Ok(_) => PatchState::Unapplied {
                locations: vec![*address],
            },
            Err(_) => PatchState::NotFound,
        },
    }
}

/// A signature counts as applied when the replacement is present anywhere
/// and the original is present nowhere. Any remaining original is patched,
/// even if the replacement also occurs elsewhere.
fn apply_signature(
    rule: &PatchRule,
    original: &[u8],
    image: &mut [u8],
    force: bool,
    log: &mut PatchLog,
) -> RuleStatus {
    let matches = search::find_all(original, image);
    if matches.is_empty() {
        if !force && search::contains_pattern(rule.written(), image) {
            return RuleStatus::AlreadyApplied;
        }
        return RuleStatus::PatternNotFound;
    }

    let written = rule.written();
    let mut locations = Vec::with_capacity(matches.len());
    for offset in matches {
        // Matches are non-overlapping and `written` is no longer than the
        // pattern, so every region is in bounds and untouched.
        let Ok(region) = bytes::slice_mut(image, offset, written.len()) else {
            continue;
        };
        log.push(AppliedPatch {
            rule: rule.name().to_string(),
            location: offset,
            original: region.to_vec(),
            written: written.to_vec(),
        });
        region.copy_from_slice(written);
        debug!(rule = rule.name(), offset, "patched signature match");
        locations.push(offset);
    }

    RuleStatus::Applied { locations }
}

fn apply_address(
    rule: &PatchRule,
    address: usize,
    image: &mut [u8],
    force: bool,
    log: &mut PatchLog,
) -> RuleStatus {
    let written = rule.written();
    let image_len = image.len();
    let Ok(region) = bytes::slice_mut(image, address, written.len()) else {
        return RuleStatus::OutOfBounds {
            address,
            len: written.len(),
            image_len,
        };
    };

    if !force && region == written {
        return RuleStatus::AlreadyApplied;
    }

    log.push(AppliedPatch {
        rule: rule.name().to_string(),
        location: address,
        original: region.to_vec(),
        written: written.to_vec(),
    });
    region.copy_from_slice(written);

    RuleStatus::Applied {
        locations: vec![address],
    }
}
