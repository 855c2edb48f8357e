//! Fixture discovery errors.

use std::path::PathBuf;

use super::error_code::{self, FixmarkErrorCode};

/// Errors that can occur while discovering or reading fixture files.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Fixture root not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Walk error under {root}: {message}")]
    Walk { root: PathBuf, message: String },

    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl FixmarkErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::IoError { .. } => error_code::IO_ERROR,
            _ => error_code::SCAN_ERROR,
        }
    }
}
