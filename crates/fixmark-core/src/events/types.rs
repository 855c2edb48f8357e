//! Event payload types.

use std::path::PathBuf;

/// Payload for `on_run_started`.
#[derive(Debug, Clone)]
pub struct RunStartedEvent {
    pub file_count: usize,
    pub threads: usize,
}

/// Payload for `on_file_verified`.
#[derive(Debug, Clone)]
pub struct FileVerifiedEvent {
    pub path: PathBuf,
    pub passed: bool,
    pub matched: usize,
    pub mismatches: usize,
}

/// Payload for `on_mismatch_found`.
#[derive(Debug, Clone)]
pub struct MismatchFoundEvent {
    pub path: PathBuf,
    /// `MissingDiagnostic`, `UnexpectedDiagnostic`, ...
    pub kind: String,
    pub line: u32,
    pub message: String,
}

/// Payload for `on_fixture_malformed`.
#[derive(Debug, Clone)]
pub struct FixtureMalformedEvent {
    pub path: PathBuf,
    pub line: u32,
    pub message: String,
}

/// Payload for `on_file_errored`.
#[derive(Debug, Clone)]
pub struct FileErroredEvent {
    pub path: PathBuf,
    pub code: &'static str,
    pub message: String,
}

/// Payload for `on_run_complete`.
#[derive(Debug, Clone)]
pub struct RunCompleteEvent {
    pub files: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub duration_ms: u64,
}
