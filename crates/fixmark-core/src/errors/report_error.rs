//! Report rendering errors.

use std::path::PathBuf;

use super::error_code::{self, FixmarkErrorCode};

/// Errors that can occur while rendering or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Unknown report format '{0}'")]
    UnknownFormat(String),

    #[error("Report serialization failed: {0}")]
    Serialization(String),

    #[error("IO error writing report {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FixmarkErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownFormat(_) => error_code::UNKNOWN_FORMAT,
            Self::Serialization(_) => error_code::REPORT_ERROR,
            Self::IoError { .. } => error_code::IO_ERROR,
        }
    }
}
