//! Comparator configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How an expected `{{message}}` is compared with the engine's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageMatch {
    /// Messages must be identical.
    Exact,
    /// The actual message must start with the expected text.
    Prefix,
    /// The actual message must contain the expected text.
    #[default]
    Contains,
}

impl MessageMatch {
    pub fn matches(self, expected: &str, actual: &str) -> bool {
        match self {
            Self::Exact => expected == actual,
            Self::Prefix => actual.starts_with(expected),
            Self::Contains => actual.contains(expected),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Prefix => "prefix",
            Self::Contains => "contains",
        }
    }
}

impl fmt::Display for MessageMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "prefix" => Ok(Self::Prefix),
            "contains" => Ok(Self::Contains),
            other => Err(format!("expected exact, prefix or contains, got '{other}'")),
        }
    }
}

/// Configuration for the expectation/diagnostic comparator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VerifyConfig {
    /// Message comparison mode. Default: contains.
    pub message_match: Option<MessageMatch>,
    /// Compare caret column spans when the fixture gives one. Default: true.
    pub check_columns: Option<bool>,
    /// Report engine secondary locations the fixture does not annotate. Default: true.
    pub check_secondary_locations: Option<bool>,
    /// Treat a diagnostic raised on an `FN` line as a failure. Default: false.
    pub strict_false_negatives: Option<bool>,
}

impl VerifyConfig {
    pub fn effective_message_match(&self) -> MessageMatch {
        self.message_match.unwrap_or_default()
    }

    pub fn effective_check_columns(&self) -> bool {
        self.check_columns.unwrap_or(true)
    }

    pub fn effective_check_secondary_locations(&self) -> bool {
        self.check_secondary_locations.unwrap_or(true)
    }

    pub fn effective_strict_false_negatives(&self) -> bool {
        self.strict_false_negatives.unwrap_or(false)
    }
}
