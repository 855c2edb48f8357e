//! Comparison results.

use std::fmt;

use serde::Serialize;

use crate::diagnostics::{ActualDiagnostic, SecondaryLocation};
use crate::expectations::{ColumnSpan, Expectation};

/// Why an expectation and the engine's output disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MismatchKind {
    /// An expectation no actual diagnostic satisfied.
    MissingDiagnostic,
    /// An actual diagnostic no expectation accounts for.
    UnexpectedDiagnostic,
    /// The engine reported a diagnostic on an `FN` line.
    ResolvedFalseNegative,
}

impl MismatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingDiagnostic => "MissingDiagnostic",
            Self::UnexpectedDiagnostic => "UnexpectedDiagnostic",
            Self::ResolvedFalseNegative => "ResolvedFalseNegative",
        }
    }
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a mismatch concerns an issue's primary or a secondary location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationRole {
    Primary,
    Secondary,
}

/// An actual location, primary or secondary, as shown in a mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActualLocation {
    pub line: u32,
    pub span: Option<ColumnSpan>,
    pub message: Option<String>,
    pub rule_id: Option<String>,
}

impl ActualLocation {
    pub fn from_diagnostic(diagnostic: &ActualDiagnostic) -> Self {
        Self {
            line: diagnostic.line,
            span: diagnostic.span,
            message: Some(diagnostic.message.clone()),
            rule_id: Some(diagnostic.rule_id.clone()),
        }
    }

    pub fn from_secondary(location: &SecondaryLocation, rule_id: &str) -> Self {
        Self {
            line: location.line,
            span: location.span,
            message: location.message.clone(),
            rule_id: Some(rule_id.to_string()),
        }
    }
}

impl fmt::Display for ActualLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref rule) = self.rule_id {
            write!(f, "{rule} ")?;
        }
        write!(f, "at line {}", self.line)?;
        if let Some(span) = self.span {
            write!(f, " {span}")?;
        }
        if let Some(ref message) = self.message {
            write!(f, " '{message}'")?;
        }
        Ok(())
    }
}

/// One disagreement between expectations and actual diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub kind: MismatchKind,
    pub role: LocationRole,
    pub line: u32,
    pub rule_id: Option<String>,
    pub expected: Option<Expectation>,
    pub actual: Option<ActualLocation>,
    /// For a missing diagnostic: the closest unclaimed actual on the same line.
    pub nearest: Option<ActualLocation>,
}

impl Mismatch {
    pub(crate) fn sort_key(&self) -> (u32, LocationRole, u32, MismatchKind) {
        let column = self
            .expected
            .as_ref()
            .and_then(|e| e.span)
            .or_else(|| self.actual.as_ref().and_then(|a| a.span))
            .map_or(0, |s| s.start);
        (self.line, self.role, column, self.kind)
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)?;
        if self.role == LocationRole::Secondary {
            f.write_str(" (secondary)")?;
        }
        if let Some(ref expected) = self.expected {
            write!(f, "; expected {expected}")?;
        }
        if let Some(ref actual) = self.actual {
            write!(f, "; actual {actual}")?;
        }
        if let Some(ref nearest) = self.nearest {
            write!(f, "; nearest actual {nearest}")?;
        }
        Ok(())
    }
}

/// Outcome of comparing one fixture's expectations with the engine output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub matched_primary: usize,
    pub matched_secondary: usize,
    /// Failures, sorted by line.
    pub mismatches: Vec<Mismatch>,
    /// Informational findings such as resolved false negatives.
    pub notes: Vec<Mismatch>,
}

impl Comparison {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}
