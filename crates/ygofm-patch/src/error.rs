//! Error types for patch rules.

use thiserror::Error;

/// Errors raised while building patch rules.
///
/// Applying rules never fails as a whole; per-rule problems are reported as
/// [`RuleStatus`](crate::RuleStatus) values.
#[derive(Debug, Error)]
pub enum Error {
    /// A rule was given an empty original or replacement pattern.
    #[error("rule '{rule}': {which} pattern is empty")]
    EmptyPattern { rule: String, which: &'static str },

    /// Unknown patch group name.
    #[error("unknown patch group '{0}'")]
    UnknownGroup(String),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] ygofm_common::Error),
}

/// Result type for patch operations.
pub type Result<T> = std::result::Result<T, Error>;
