//! Recorded diagnostic log errors.

use std::path::PathBuf;

use super::error_code::{self, FixmarkErrorCode};

/// Errors that can occur while loading a recorded diagnostic log.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosticLogError {
    #[error("IO error reading diagnostic log {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Diagnostic log parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Unsupported SARIF version '{version}' in {path}")]
    UnsupportedVersion { path: String, version: String },

    #[error("Invalid diagnostic in {path}: {message}")]
    InvalidRecord { path: String, message: String },
}

impl FixmarkErrorCode for DiagnosticLogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::IoError { .. } => error_code::IO_ERROR,
            _ => error_code::DIAGNOSTIC_LOG_ERROR,
        }
    }
}
