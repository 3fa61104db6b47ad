//! Undoing applied patches.

use std::fmt;

use tracing::{info, warn};
use ygofm_common::bytes;

use crate::log::{AppliedPatch, PatchLog};

/// What happened to one log entry during reversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReversalStatus {
    Restored,
    /// The entry does not fit the image it was replayed on.
    OutOfBounds { image_len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReversalOutcome {
    pub rule: String,
    pub location: usize,
    pub status: ReversalStatus,
}

impl fmt::Display for ReversalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            ReversalStatus::Restored => write!(f, "{}: reversed at {:#x}", self.rule, self.location),
            ReversalStatus::OutOfBounds { image_len } => write!(
                f,
                "{}: skipped, {:#x} is outside the image ({} bytes)",
                self.rule, self.location, image_len
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReversalReport {
    pub outcomes: Vec<ReversalOutcome>,
}

impl ReversalReport {
    pub fn restored(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == ReversalStatus::Restored)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.restored()
    }
}

impl fmt::Display for ReversalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{}", outcome)?;
        }
        Ok(())
    }
}

/// Write every logged original back, newest entry first.
///
/// `image` is expected to be a fresh copy of the patched output. The stored
/// bytes are used as-is; rules are never consulted.
pub fn reverse(image: &mut [u8], log: &PatchLog) -> ReversalReport {
    let mut report = ReversalReport::default();
    for entry in log.entries().iter().rev() {
        report.outcomes.push(restore(image, entry));
    }
    info!(
        restored = report.restored(),
        skipped = report.skipped(),
        "reversed patches"
    );
    report
}

/// Reverse only the entries logged under the given rule names.
pub fn reverse_rules<S: AsRef<str>>(image: &mut [u8], log: &PatchLog, names: &[S]) -> ReversalReport {
    reverse(image, &log.select(names))
}

fn restore(image: &mut [u8], entry: &AppliedPatch) -> ReversalOutcome {
    let image_len = image.len();
    let status = match bytes::slice_mut(image, entry.location, entry.original.len()) {
        Ok(region) => {
            region.copy_from_slice(&entry.original);
            ReversalStatus::Restored
        }
        Err(_) => {
            warn!(
                rule = %entry.rule,
                location = entry.location,
                image_len,
                "logged patch outside image, not reversed"
            );
            ReversalStatus::OutOfBounds { image_len }
        }
    };

    ReversalOutcome {
        rule: entry.rule.clone(),
        location: entry.location,
        status,
    }
}
