//! Top-level verification errors.

use super::error_code::FixmarkErrorCode;
use super::{
    ConfigError, DiagnosticLogError, EngineError, MalformedExpectation, ReportError, ScanError,
};

/// Errors that can occur anywhere in a verification run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Malformed expectation: {0}")]
    Expectation(#[from] MalformedExpectation),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Diagnostic log error: {0}")]
    DiagnosticLog(#[from] DiagnosticLogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl FixmarkErrorCode for VerifyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Expectation(e) => e.error_code(),
            Self::Engine(e) => e.error_code(),
            Self::DiagnosticLog(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
        }
    }
}
