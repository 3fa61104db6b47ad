//! Extraction options.

/// Options for loading game data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Load opponent slot 0 from the archive and include it in the drop
    /// index. The slot is a non-playable placeholder and normally has no
    /// usable data.
    pub include_placeholder_opponent: bool,
}

impl ExtractConfig {
    pub fn with_placeholder_opponent(mut self, include: bool) -> Self {
        self.include_placeholder_opponent = include;
        self
    }

    /// First opponent id whose tables are read.
    pub fn first_opponent(&self) -> usize {
        if self.include_placeholder_opponent {
            0
        } else {
            1
        }
    }
}
