//! Diagnostics reported by the engine under test.

use serde::{Deserialize, Serialize};

use crate::expectations::ColumnSpan;

/// An auxiliary location attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryLocation {
    pub line: u32,
    #[serde(default)]
    pub span: Option<ColumnSpan>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One diagnostic emitted by the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualDiagnostic {
    pub line: u32,
    /// `None` when the engine only reports a line.
    #[serde(default)]
    pub span: Option<ColumnSpan>,
    pub message: String,
    pub rule_id: String,
    #[serde(default)]
    pub secondary_locations: Vec<SecondaryLocation>,
}

impl ActualDiagnostic {
    pub fn new(rule_id: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            span: None,
            message: message.into(),
            rule_id: rule_id.into(),
            secondary_locations: Vec::new(),
        }
    }

    pub fn with_span(mut self, start: u32, end: u32) -> Self {
        self.span = Some(ColumnSpan::new(start, end));
        self
    }

    pub fn with_secondary(mut self, location: SecondaryLocation) -> Self {
        self.secondary_locations.push(location);
        self
    }

    pub(crate) fn sort_key(&self) -> (u32, u32) {
        (self.line, self.span.map_or(0, |s| s.start))
    }
}
