//! Partial-result containers for table extraction.
//!
//! Tables in the game images are reverse-engineered, so a table that runs off
//! the end of its buffer is expected input. Extraction loops stop early and
//! return what they decoded together with the count they were asked for.

/// Whether a table extraction produced every expected entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    /// Every expected entry was decoded.
    Complete,
    /// The buffer ended before the table did.
    Truncated { decoded: usize, expected: usize },
}

impl TableStatus {
    /// True when the table was fully decoded.
    pub fn is_complete(&self) -> bool {
        matches!(self, TableStatus::Complete)
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableStatus::Complete => write!(f, "complete"),
            TableStatus::Truncated { decoded, expected } => {
                write!(f, "truncated ({}/{} entries)", decoded, expected)
            }
        }
    }
}

/// The entries decoded from one table, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    items: Vec<T>,
    expected: usize,
}

impl<T> Extraction<T> {
    /// Wrap decoded items together with the number that was expected.
    pub fn new(items: Vec<T>, expected: usize) -> Self {
        Self { items, expected }
    }

    /// The decoded items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the extraction, returning the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Number of entries actually decoded.
    pub fn decoded(&self) -> usize {
        self.items.len()
    }

    /// Number of entries the table should hold.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Complete or truncated.
    pub fn status(&self) -> TableStatus {
        if self.items.len() >= self.expected {
            TableStatus::Complete
        } else {
            TableStatus::Truncated {
                decoded: self.items.len(),
                expected: self.expected,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        let full = Extraction::new(vec![1, 2, 3], 3);
        assert!(full.status().is_complete());

        let short = Extraction::new(vec![1], 3);
        assert_eq!(
            short.status(),
            TableStatus::Truncated { decoded: 1, expected: 3 }
        );
        assert_eq!(short.status().to_string(), "truncated (1/3 entries)");
    }
}
