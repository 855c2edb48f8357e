//! Expectation data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 1-based character column range on one line, `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnSpan {
    pub start: u32,
    pub end: u32,
}

impl ColumnSpan {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Span of `len` carets whose first caret sits at 0-based character `index`.
    pub fn from_caret(index: usize, len: usize) -> Self {
        let start = index as u32 + 1;
        Self {
            start,
            end: start + len as u32,
        }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for ColumnSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "col {}..{}", self.start, self.end)
    }
}

/// What an annotation asserts about its target line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpectationKind {
    /// `Noncompliant`: the rule must raise a diagnostic here.
    Primary,
    /// `Secondary [id]`: an auxiliary location of the issue `id`.
    Secondary,
    /// `FN`: a known gap; the rule is allowed to stay silent.
    FalseNegative,
    /// `Fixed`: a line rewritten by the code fix. Never matched.
    Fixed,
}

impl ExpectationKind {
    /// The annotation keyword for this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Primary => "Noncompliant",
            Self::Secondary => "Secondary",
            Self::FalseNegative => "FN",
            Self::Fixed => "Fixed",
        }
    }

    pub(crate) fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "Noncompliant" => Some(Self::Primary),
            "Secondary" => Some(Self::Secondary),
            "FN" => Some(Self::FalseNegative),
            "Fixed" => Some(Self::Fixed),
            _ => None,
        }
    }
}

/// One expected diagnostic location recovered from an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    /// 1-based line the diagnostic is expected on (after `@` offsets).
    pub line: u32,
    pub span: Option<ColumnSpan>,
    pub message: Option<String>,
    pub issue_id: Option<String>,
    pub kind: ExpectationKind,
    /// 1-based line of the comment that declared this expectation.
    pub annotation_line: u32,
}

impl Expectation {
    pub fn is_primary(&self) -> bool {
        self.kind == ExpectationKind::Primary
    }

    pub(crate) fn sort_key(&self) -> (u32, u32, u32) {
        (
            self.line,
            self.span.map_or(0, |s| s.start),
            self.annotation_line,
        )
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.kind.keyword(), self.line)?;
        if let Some(span) = self.span {
            write!(f, " {span}")?;
        }
        if let Some(ref id) = self.issue_id {
            write!(f, " [{id}]")?;
        }
        if let Some(ref message) = self.message {
            write!(f, " {{{{{message}}}}}")?;
        }
        Ok(())
    }
}

/// A primary `Noncompliant [id]` with every `Secondary [id]` that points at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueGroup {
    pub id: String,
    pub primary: Expectation,
    pub secondaries: Vec<Expectation>,
}
