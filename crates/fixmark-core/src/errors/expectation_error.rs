//! Annotation syntax errors.

use super::error_code::{self, FixmarkErrorCode};

/// A fixture whose annotation comments are inconsistent.
///
/// Fatal for the file it was found in: extraction stops, the file is reported,
/// and the run continues with the next fixture. `line` is always the 1-based
/// line of the offending annotation comment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedExpectation {
    #[error("line {line}: caret underline has no annotated line above it")]
    DanglingCaret { line: u32 },

    #[error("line {line}: Secondary [{id}] has no matching Noncompliant [{id}]")]
    OrphanSecondary { line: u32, id: String },

    #[error("line {line}: Secondary location must name an issue id")]
    UnnamedSecondary { line: u32 },

    #[error("line {line}: issue id [{id}] is already used by the Noncompliant on line {first}")]
    DuplicateIssueId { line: u32, id: String, first: u32 },

    #[error("line {line}: invalid line offset '{text}'")]
    InvalidOffset { line: u32, text: String },

    #[error("line {line}: invalid column shorthand '{text}'")]
    InvalidColumn { line: u32, text: String },

    #[error("line {line}: unterminated {what}")]
    Unterminated { line: u32, what: &'static str },

    #[error("line {line}: empty issue id list")]
    EmptyIssueId { line: u32 },

    #[error("line {line}: offset targets line {target}, outside 1..={last}")]
    TargetOutOfRange { line: u32, target: i64, last: u32 },

    #[error("line {line}: caret message conflicts with the message already given on line {primary_line}")]
    ConflictingMessage { line: u32, primary_line: u32 },
}

impl MalformedExpectation {
    /// The annotation line the error was raised for.
    pub fn line(&self) -> u32 {
        match self {
            Self::DanglingCaret { line }
            | Self::OrphanSecondary { line, .. }
            | Self::UnnamedSecondary { line }
            | Self::DuplicateIssueId { line, .. }
            | Self::InvalidOffset { line, .. }
            | Self::InvalidColumn { line, .. }
            | Self::Unterminated { line, .. }
            | Self::EmptyIssueId { line }
            | Self::TargetOutOfRange { line, .. }
            | Self::ConflictingMessage { line, .. } => *line,
        }
    }
}

impl FixmarkErrorCode for MalformedExpectation {
    fn error_code(&self) -> &'static str {
        error_code::MALFORMED_EXPECTATION
    }
}
