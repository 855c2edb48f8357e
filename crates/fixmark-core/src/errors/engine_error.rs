//! Rule engine collaborator errors.

use std::path::PathBuf;

use super::error_code::{self, FixmarkErrorCode};

/// Errors reported by the rule engine under test.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Rule engine failed on {path}: {message}")]
    Failed { path: PathBuf, message: String },

    #[error("Code fix failed on {path}: {message}")]
    CodeFixFailed { path: PathBuf, message: String },
}

impl FixmarkErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        error_code::ENGINE_ERROR
    }
}
