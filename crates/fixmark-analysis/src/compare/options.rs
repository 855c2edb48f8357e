//! Comparator knobs.

use fixmark_core::config::{MessageMatch, VerifyConfig};

/// How strictly expectations are matched against actual diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub message_match: MessageMatch,
    /// Compare caret spans when the expectation has one.
    pub check_columns: bool,
    /// Match `Secondary` expectations against secondary locations.
    pub check_secondary_locations: bool,
    /// Treat a diagnostic on an `FN` line as a failure instead of a note.
    pub strict_false_negatives: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::from(&VerifyConfig::default())
    }
}

impl From<&VerifyConfig> for MatchOptions {
    fn from(config: &VerifyConfig) -> Self {
        Self {
            message_match: config.effective_message_match(),
            check_columns: config.effective_check_columns(),
            check_secondary_locations: config.effective_check_secondary_locations(),
            strict_false_negatives: config.effective_strict_false_negatives(),
        }
    }
}
