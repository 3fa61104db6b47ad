//! Observable record of everything a load had to work around.
//!
//! Producers log each event through `tracing` as it happens; the same events
//! are collected here so callers (and tests) can inspect them afterwards.

use std::fmt;

use ygofm_common::{Extraction, TableStatus};
use ygofm_text::FallbackReason;

use crate::drops::DropTier;

/// One data problem that was tolerated during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A table ended before its expected entry count.
    Truncated {
        table: &'static str,
        decoded: usize,
        expected: usize,
    },
    /// A pointer resolved outside the buffer.
    OffsetOutOfRange {
        table: &'static str,
        id: usize,
        offset: usize,
    },
    /// A drop chance above the denominator was clamped.
    ClampedChance {
        opponent: usize,
        tier: DropTier,
        card_id: usize,
        raw: u16,
    },
    /// Text could not be decoded and a fallback name was used.
    FallbackName {
        table: &'static str,
        id: usize,
        reason: FallbackReason,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Truncated {
                table,
                decoded,
                expected,
            } => write!(f, "{}: truncated at {}/{} entries", table, decoded, expected),
            Diagnostic::OffsetOutOfRange { table, id, offset } => {
                write!(f, "{} #{}: offset {:#x} out of range", table, id, offset)
            }
            Diagnostic::ClampedChance {
                opponent,
                tier,
                card_id,
                raw,
            } => write!(
                f,
                "opponent {} {}: card {} chance {} clamped",
                opponent, tier, card_id, raw
            ),
            Diagnostic::FallbackName { table, id, reason } => {
                write!(f, "{} #{}: fallback name ({})", table, id, reason)
            }
        }
    }
}

/// Collected diagnostics, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Diagnostic) {
        self.events.push(event);
    }

    /// Record a truncation if `extraction` is partial.
    pub fn check_table<T>(&mut self, table: &'static str, extraction: &Extraction<T>) {
        if let TableStatus::Truncated { decoded, expected } = extraction.status() {
            self.push(Diagnostic::Truncated {
                table,
                decoded,
                expected,
            });
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of clamped drop chances.
    pub fn clamped_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Diagnostic::ClampedChance { .. }))
            .count()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Entry count of one extracted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableReport {
    pub table: &'static str,
    pub decoded: usize,
    pub expected: usize,
}

impl TableReport {
    pub fn of<T>(table: &'static str, extraction: &Extraction<T>) -> Self {
        Self {
            table,
            decoded: extraction.decoded(),
            expected: extraction.expected(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.decoded >= self.expected
    }
}

impl fmt::Display for TableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{} entries", self.table, self.decoded, self.expected)?;
        if !self.is_complete() {
            f.write_str(" (truncated)")?;
        }
        Ok(())
    }
}

/// What one image load produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub tables: Vec<TableReport>,
    pub diagnostics: Diagnostics,
}

impl LoadReport {
    /// Record an extraction's count and any truncation.
    pub fn table<T>(&mut self, table: &'static str, extraction: &Extraction<T>) {
        self.tables.push(TableReport::of(table, extraction));
        self.diagnostics.check_table(table, extraction);
    }

    pub fn is_complete(&self) -> bool {
        self.tables.iter().all(TableReport::is_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_report_tracks_truncation() {
        let mut report = LoadReport::default();
        report.table("full", &Extraction::new(vec![1, 2], 2));
        report.table("short", &Extraction::new(vec![1], 4));

        assert!(!report.is_complete());
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(
            report.tables[1].to_string(),
            "short: 1/4 entries (truncated)"
        );
        assert_eq!(
            report.diagnostics.iter().next().unwrap().to_string(),
            "short: truncated at 1/4 entries"
        );
    }

    #[test]
    fn test_clamped_count() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::ClampedChance {
            opponent: 3,
            tier: DropTier::Bcd,
            card_id: 10,
            raw: 5000,
        });
        assert_eq!(diagnostics.clamped_count(), 1);
        assert_eq!(
            diagnostics.iter().next().unwrap().to_string(),
            "opponent 3 B/C/D: card 10 chance 5000 clamped"
        );
    }
}
