//! Per-file and per-run verification reports.

use std::path::PathBuf;

use serde::Serialize;

use crate::codefix::FixCheck;
use crate::compare::Mismatch;
use crate::scanner::FixtureKind;

/// Outcome of verifying one fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Passed,
    /// Mismatches or a failed code-fix check.
    Failed,
    /// The fixture's annotations could not be parsed.
    Malformed,
    /// I/O or engine failure.
    Errored,
}

impl FileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Malformed => "malformed",
            Self::Errored => "errored",
        }
    }
}

/// Why a file could not be verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub code: &'static str,
    pub message: String,
    /// Annotation line, for malformed fixtures.
    pub line: Option<u32>,
}

/// Verification result for one fixture file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub kind: FixtureKind,
    pub rule_id: Option<String>,
    pub status: FileStatus,
    pub expected_primary: usize,
    pub matched_primary: usize,
    pub matched_secondary: usize,
    pub mismatches: Vec<Mismatch>,
    pub notes: Vec<Mismatch>,
    pub fix_check: Option<FixCheck>,
    pub error: Option<FileError>,
    pub duration_ms: u64,
}

impl FileReport {
    /// A report for a file that never reached comparison.
    pub fn failed_early(
        path: PathBuf,
        kind: FixtureKind,
        rule_id: Option<String>,
        status: FileStatus,
        error: FileError,
    ) -> Self {
        Self {
            path,
            kind,
            rule_id,
            status,
            expected_primary: 0,
            matched_primary: 0,
            matched_secondary: 0,
            mismatches: Vec::new(),
            notes: Vec::new(),
            fix_check: None,
            error: Some(error),
            duration_ms: 0,
        }
    }

    pub fn passed(&self) -> bool {
        self.status == FileStatus::Passed
    }
}

/// Aggregate counts over a set of file reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files: usize,
    pub passed: usize,
    pub failed: usize,
    pub malformed: usize,
    pub errored: usize,
    pub matched_primary: usize,
    pub mismatches: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Self {
            files: reports.len(),
            ..Self::default()
        };
        for report in reports {
            match report.status {
                FileStatus::Passed => summary.passed += 1,
                FileStatus::Failed => summary.failed += 1,
                FileStatus::Malformed => summary.malformed += 1,
                FileStatus::Errored => summary.errored += 1,
            }
            summary.matched_primary += report.matched_primary;
            summary.mismatches += report.mismatches.len();
        }
        summary
    }
}

/// Accumulates file reports across a verification run.
///
/// Passed explicitly to the runner; there is no global test-run state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    files: Vec<FileReport>,
    duration_ms: u64,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: FileReport) {
        self.files.push(report);
    }

    pub fn add_duration(&mut self, duration_ms: u64) {
        self.duration_ms += duration_ms;
    }

    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_reports(&self.files)
    }

    /// True when no recorded file failed, was malformed or errored.
    pub fn is_success(&self) -> bool {
        self.files.iter().all(FileReport::passed)
    }
}
