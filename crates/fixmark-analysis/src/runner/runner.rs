//! VerificationRunner: read, extract, strip, analyze, compare, fix-check.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use fixmark_core::config::FixmarkConfig;
use fixmark_core::errors::{
    EngineError, FixmarkErrorCode, MalformedExpectation, ScanError, VerifyError,
};
use fixmark_core::events::{
    EventDispatcher, FileErroredEvent, FileVerifiedEvent, FixtureMalformedEvent,
    MismatchFoundEvent, RunCompleteEvent, RunStartedEvent,
};
use fixmark_core::tracing::metrics;

use super::report::{FileError, FileReport, FileStatus, RunReport, RunSummary};
use crate::codefix::FixCheck;
use crate::compare::{compare, Comparison, MatchOptions};
use crate::diagnostics::{ActualDiagnostic, RuleEngine};
use crate::expectations::{strip_annotations, ExpectationSet};
use crate::scanner::{FixtureFile, FixtureKind};

/// Verifies fixtures against a rule engine.
pub struct VerificationRunner {
    engine: Arc<dyn RuleEngine>,
    options: MatchOptions,
    threads: usize,
    rule: Option<String>,
    events: EventDispatcher,
}

impl VerificationRunner {
    pub fn new(engine: Arc<dyn RuleEngine>, config: &FixmarkConfig) -> Self {
        Self {
            engine,
            options: MatchOptions::from(&config.verify),
            threads: config.run.effective_threads(),
            rule: config.run.rule.clone(),
            events: EventDispatcher::new(),
        }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Rule under test: the configured rule, else the engine's own.
    pub fn rule_id(&self) -> Option<&str> {
        self.rule.as_deref().or_else(|| self.engine.rule_id())
    }

    /// Verify `fixtures` in parallel and record their reports, in path order,
    /// into `report`. Per-file failures are captured, never propagated.
    pub fn run(&self, fixtures: &[FixtureFile], report: &mut RunReport) -> RunSummary {
        let start = Instant::now();
        self.events.emit_run_started(&RunStartedEvent {
            file_count: fixtures.len(),
            threads: self.threads,
        });

        let verify_all = || -> Vec<FileReport> {
            fixtures.par_iter().map(|f| self.verify_file(f)).collect()
        };
        let mut reports = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
        {
            Ok(pool) => pool.install(verify_all),
            Err(err) => {
                tracing::warn!(error = %err, "falling back to the global rayon pool");
                verify_all()
            }
        };
        reports.sort_by(|a, b| a.path.cmp(&b.path));

        let summary = RunSummary::from_reports(&reports);
        let duration_ms = start.elapsed().as_millis() as u64;
        for file in reports {
            report.record(file);
        }
        report.add_duration(duration_ms);

        self.events.emit_run_complete(&RunCompleteEvent {
            files: summary.files,
            passed: summary.passed,
            failed: summary.failed + summary.malformed,
            errored: summary.errored,
            duration_ms,
        });
        tracing::info!(
            files = summary.files,
            passed = summary.passed,
            failed = summary.failed,
            malformed = summary.malformed,
            errored = summary.errored,
            { metrics::RUN_DURATION } = duration_ms,
            "verification run complete"
        );
        summary
    }

    /// Verify one fixture file. Never fails; errors land in the report.
    pub fn verify_file(&self, fixture: &FixtureFile) -> FileReport {
        let start = Instant::now();
        let rule_id = self.rule_id().map(str::to_string);

        let mut report = match self.check_file(fixture) {
            Ok((set, comparison, fix_check)) => {
                let fix_ok = fix_check.as_ref().map_or(true, FixCheck::passed);
                FileReport {
                    path: fixture.path.clone(),
                    kind: fixture.kind,
                    rule_id,
                    status: if comparison.passed() && fix_ok {
                        FileStatus::Passed
                    } else {
                        FileStatus::Failed
                    },
                    expected_primary: set.primaries().count(),
                    matched_primary: comparison.matched_primary,
                    matched_secondary: comparison.matched_secondary,
                    mismatches: comparison.mismatches,
                    notes: comparison.notes,
                    fix_check,
                    error: None,
                    duration_ms: 0,
                }
            }
            Err(VerifyError::Expectation(err)) => FileReport::failed_early(
                fixture.path.clone(),
                fixture.kind,
                rule_id,
                FileStatus::Malformed,
                FileError::from(&err),
            ),
            Err(err) => FileReport::failed_early(
                fixture.path.clone(),
                fixture.kind,
                rule_id,
                FileStatus::Errored,
                FileError {
                    code: err.error_code(),
                    message: err.to_string(),
                    line: None,
                },
            ),
        };
        report.duration_ms = start.elapsed().as_millis() as u64;

        self.emit_file_events(&report);
        tracing::debug!(
            path = %report.path.display(),
            status = report.status.as_str(),
            { metrics::MISMATCH_COUNT } = report.mismatches.len(),
            { metrics::FILE_VERIFY_TIME } = report.duration_ms,
            "fixture verified"
        );
        report
    }

    /// Extract, strip, analyze and compare `source` as if read from `path`.
    pub fn verify_source(
        &self,
        path: &Path,
        source: &str,
    ) -> Result<(ExpectationSet, Comparison), VerifyError> {
        let set = ExpectationSet::extract(source)?;
        let stripped = strip_annotations(source);
        let actual = self.analyze(path, &stripped)?;
        let comparison = compare(&set, &actual, &self.options);
        Ok((set, comparison))
    }

    fn check_file(
        &self,
        fixture: &FixtureFile,
    ) -> Result<(ExpectationSet, Comparison, Option<FixCheck>), VerifyError> {
        let source = read_source(&fixture.path)?;
        let (set, comparison) = self.verify_source(&fixture.path, &source)?;

        let fix_check = match (fixture.kind, fixture.fixed_sibling.as_deref()) {
            (FixtureKind::Fixed, _) => Some(FixCheck::for_fixed_fixture(&set)),
            (FixtureKind::Original, Some(sibling)) => {
                let stripped = strip_annotations(&source);
                match self.engine.apply_code_fix(&fixture.path, &stripped)? {
                    Some(output) => {
                        let expected = read_source(sibling)?;
                        Some(FixCheck::for_fix_output(&set, &expected, &output))
                    }
                    None => {
                        tracing::debug!(
                            path = %fixture.path.display(),
                            engine = self.engine.name(),
                            "engine produced no code fix output"
                        );
                        None
                    }
                }
            }
            (FixtureKind::Original, None) => None,
        };

        Ok((set, comparison, fix_check))
    }

    fn analyze(&self, path: &Path, stripped: &str) -> Result<Vec<ActualDiagnostic>, EngineError> {
        let mut actual = self.engine.analyze(path, stripped)?;
        if let Some(ref rule) = self.rule {
            actual.retain(|d| &d.rule_id == rule);
        }
        Ok(actual)
    }

    fn emit_file_events(&self, report: &FileReport) {
        for mismatch in &report.mismatches {
            self.events.emit_mismatch_found(&MismatchFoundEvent {
                path: report.path.clone(),
                kind: mismatch.kind.as_str().to_string(),
                line: mismatch.line,
                message: mismatch.to_string(),
            });
        }
        match (report.status, report.error.as_ref()) {
            (FileStatus::Malformed, Some(error)) => {
                self.events.emit_fixture_malformed(&FixtureMalformedEvent {
                    path: report.path.clone(),
                    line: error.line.unwrap_or(0),
                    message: error.message.clone(),
                });
            }
            (FileStatus::Errored, Some(error)) => {
                self.events.emit_file_errored(&FileErroredEvent {
                    path: report.path.clone(),
                    code: error.code,
                    message: error.message.clone(),
                });
            }
            _ => {}
        }
        self.events.emit_file_verified(&FileVerifiedEvent {
            path: report.path.clone(),
            passed: report.passed(),
            matched: report.matched_primary,
            mismatches: report.mismatches.len(),
        });
    }
}

fn read_source(path: &Path) -> Result<String, ScanError> {
    std::fs::read_to_string(path).map_err(|source| ScanError::IoError {
        path: path.to_path_buf(),
        source,
    })
}

impl From<&MalformedExpectation> for FileError {
    fn from(err: &MalformedExpectation) -> Self {
        Self {
            code: err.error_code(),
            message: err.to_string(),
            line: Some(err.line()),
        }
    }
}
