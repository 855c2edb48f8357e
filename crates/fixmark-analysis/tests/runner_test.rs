//! Tests for the verification runner.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use fixmark_analysis::compare::MismatchKind;
use fixmark_analysis::diagnostics::{ActualDiagnostic, DiagnosticLog, RecordedEngine, RuleEngine};
use fixmark_analysis::runner::*;
use fixmark_analysis::scanner::{FixtureFile, FixtureKind, FixtureScanner};
use fixmark_core::config::FixmarkConfig;
use fixmark_core::errors::EngineError;
use fixmark_core::events::*;

/// Engine stub answering by file name.
#[derive(Default)]
struct StubEngine {
    diagnostics: FxHashMap<String, Vec<ActualDiagnostic>>,
    fixes: FxHashMap<String, String>,
    failing: Option<String>,
}

impl StubEngine {
    fn with(mut self, file: &str, diagnostics: Vec<ActualDiagnostic>) -> Self {
        self.diagnostics.insert(file.to_string(), diagnostics);
        self
    }

    fn with_fix(mut self, file: &str, output: &str) -> Self {
        self.fixes.insert(file.to_string(), output.to_string());
        self
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

impl RuleEngine for StubEngine {
    fn name(&self) -> &str {
        "stub"
    }

    fn rule_id(&self) -> Option<&str> {
        Some("S1234")
    }

    fn analyze(&self, path: &Path, source: &str) -> Result<Vec<ActualDiagnostic>, EngineError> {
        assert!(!source.contains("Noncompliant"), "engine must see stripped source");
        let name = file_name(path);
        if self.failing.as_deref() == Some(name.as_str()) {
            return Err(EngineError::Failed {
                path: path.to_path_buf(),
                message: "compiler crashed".to_string(),
            });
        }
        Ok(self.diagnostics.get(&name).cloned().unwrap_or_default())
    }

    fn apply_code_fix(&self, path: &Path, _source: &str) -> Result<Option<String>, EngineError> {
        Ok(self.fixes.get(&file_name(path)).cloned())
    }
}

#[derive(Default)]
struct Recorder {
    started: AtomicUsize,
    verified: AtomicUsize,
    mismatches: AtomicUsize,
    malformed: AtomicUsize,
    errored: AtomicUsize,
    completed: AtomicUsize,
}

impl FixmarkEventHandler for Recorder {
    fn on_run_started(&self, _event: &RunStartedEvent) {
        self.started.fetch_add(1, Ordering::Relaxed);
    }
    fn on_file_verified(&self, _event: &FileVerifiedEvent) {
        self.verified.fetch_add(1, Ordering::Relaxed);
    }
    fn on_mismatch_found(&self, _event: &MismatchFoundEvent) {
        self.mismatches.fetch_add(1, Ordering::Relaxed);
    }
    fn on_fixture_malformed(&self, _event: &FixtureMalformedEvent) {
        self.malformed.fetch_add(1, Ordering::Relaxed);
    }
    fn on_file_errored(&self, _event: &FileErroredEvent) {
        self.errored.fetch_add(1, Ordering::Relaxed);
    }
    fn on_run_complete(&self, _event: &RunCompleteEvent) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn discover(dir: &Path) -> Vec<FixtureFile> {
    FixtureScanner::new(&FixmarkConfig::default().scan)
        .unwrap()
        .discover(&[dir.to_path_buf()])
        .unwrap()
}

/// RUN-01: A fixture the engine satisfies passes.
#[test]
fn test_passing_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "Rule.cs", "a(); // Noncompliant {{Fix}}\nb();\n");
    let engine = StubEngine::default().with("Rule.cs", vec![ActualDiagnostic::new("S1234", 1, "Fix this")]);

    let runner = VerificationRunner::new(Arc::new(engine), &FixmarkConfig::default());
    let report = runner.verify_file(&FixtureFile::original(&path));

    assert_eq!(report.status, FileStatus::Passed);
    assert_eq!(report.expected_primary, 1);
    assert_eq!(report.matched_primary, 1);
    assert_eq!(report.rule_id.as_deref(), Some("S1234"));
    assert!(report.error.is_none());
}

/// RUN-02: Failures, malformed fixtures and engine errors never stop the run.
#[test]
fn test_run_collects_every_outcome() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "A_Pass.cs", "a(); // Noncompliant\n");
    write(dir.path(), "B_Fail.cs", "a(); // Noncompliant\nb();\n");
    write(dir.path(), "C_Malformed.cs", "// ^^^\n");
    write(dir.path(), "D_Crash.cs", "a();\n");

    let engine = StubEngine {
        failing: Some("D_Crash.cs".to_string()),
        ..StubEngine::default()
    }
    .with("A_Pass.cs", vec![ActualDiagnostic::new("S1234", 1, "m")])
    .with("B_Fail.cs", vec![ActualDiagnostic::new("S1234", 2, "m")]);

    let recorder = Arc::new(Recorder::default());
    let mut events = EventDispatcher::new();
    events.register(recorder.clone());

    let runner = VerificationRunner::new(Arc::new(engine), &FixmarkConfig::default()).with_events(events);
    let mut report = RunReport::new();
    let summary = runner.run(&discover(dir.path()), &mut report);

    let statuses: Vec<FileStatus> = report.files().iter().map(|f| f.status).collect();
    assert_eq!(
        statuses,
        vec![
            FileStatus::Passed,
            FileStatus::Failed,
            FileStatus::Malformed,
            FileStatus::Errored
        ]
    );
    assert_eq!(summary, report.summary());
    assert_eq!(summary.files, 4);
    assert_eq!(summary.mismatches, 2);
    assert!(!report.is_success());

    let malformed = report.files()[2].error.as_ref().unwrap();
    assert_eq!(malformed.code, "MALFORMED_EXPECTATION");
    assert_eq!(malformed.line, Some(1));
    assert_eq!(report.files()[3].error.as_ref().unwrap().code, "ENGINE_ERROR");

    assert_eq!(recorder.started.load(Ordering::Relaxed), 1);
    assert_eq!(recorder.verified.load(Ordering::Relaxed), 4);
    assert_eq!(recorder.mismatches.load(Ordering::Relaxed), 2);
    assert_eq!(recorder.malformed.load(Ordering::Relaxed), 1);
    assert_eq!(recorder.errored.load(Ordering::Relaxed), 1);
    assert_eq!(recorder.completed.load(Ordering::Relaxed), 1);
}

/// RUN-03: The accumulator keeps earlier runs.
#[test]
fn test_report_accumulates_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Rule.cs", "a();\n");
    let runner = VerificationRunner::new(Arc::new(StubEngine::default()), &FixmarkConfig::default());

    let fixtures = discover(dir.path());
    let mut report = RunReport::new();
    runner.run(&fixtures, &mut report);
    runner.run(&fixtures, &mut report);

    assert_eq!(report.files().len(), 2);
    assert!(report.is_success());
}

/// RUN-04: A fixed fixture with a leftover Noncompliant fails.
#[test]
fn test_fixed_fixture_with_leftover_marker() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "Rule.Fixed.cs", "a(); // Noncompliant\n");
    let engine = StubEngine::default().with("Rule.Fixed.cs", vec![ActualDiagnostic::new("S1234", 1, "m")]);

    let runner = VerificationRunner::new(Arc::new(engine), &FixmarkConfig::default());
    let fixture = FixtureFile {
        path,
        kind: FixtureKind::Fixed,
        fixed_sibling: None,
        original: None,
    };
    let report = runner.verify_file(&fixture);

    assert_eq!(report.status, FileStatus::Failed);
    assert!(report.mismatches.is_empty());
    assert_eq!(report.fix_check.unwrap().remaining_noncompliant.len(), 1);
}

/// RUN-05: Engine fix output is compared with the fixed sibling.
#[test]
fn test_code_fix_compared_with_sibling() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Rule.cs", "x =- 1; // Noncompliant\n");
    write(dir.path(), "Rule.Fixed.cs", "x -= 1; // Fixed\n");
    let diagnostics = vec![ActualDiagnostic::new("S1234", 1, "m")];

    let good = StubEngine::default()
        .with("Rule.cs", diagnostics.clone())
        .with_fix("Rule.cs", "x -= 1;\n");
    let runner = VerificationRunner::new(Arc::new(good), &FixmarkConfig::default());
    let mut report = RunReport::new();
    runner.run(&discover(dir.path()), &mut report);
    assert!(report.is_success(), "{:?}", report.files());
    let original = report
        .files()
        .iter()
        .find(|f| f.kind == FixtureKind::Original)
        .unwrap();
    assert!(original.fix_check.as_ref().unwrap().compared_output);

    let bad = StubEngine::default()
        .with("Rule.cs", diagnostics)
        .with_fix("Rule.cs", "x = -1;\n");
    let runner = VerificationRunner::new(Arc::new(bad), &FixmarkConfig::default());
    let mut report = RunReport::new();
    runner.run(&discover(dir.path()), &mut report);
    let original = report
        .files()
        .iter()
        .find(|f| f.kind == FixtureKind::Original)
        .unwrap();
    assert_eq!(original.status, FileStatus::Failed);
    assert_eq!(original.fix_check.as_ref().unwrap().differences.len(), 1);
}

/// RUN-06: A configured rule filters out other rules' diagnostics.
#[test]
fn test_rule_filter() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "Rule.cs", "a(); // Noncompliant\n");
    let engine = StubEngine::default().with(
        "Rule.cs",
        vec![
            ActualDiagnostic::new("S1234", 1, "m"),
            ActualDiagnostic::new("CS0168", 1, "unused variable"),
        ],
    );

    let mut config = FixmarkConfig::default();
    let unfiltered = VerificationRunner::new(Arc::new(StubEngine::default()), &config);
    assert_eq!(unfiltered.rule_id(), Some("S1234"));

    config.run.rule = Some("S1234".to_string());
    let runner = VerificationRunner::new(Arc::new(engine), &config);
    let report = runner.verify_file(&FixtureFile::original(&path));
    assert_eq!(report.status, FileStatus::Passed, "{:?}", report.mismatches);
}

/// RUN-07: Resolved false negatives are notes unless strict.
#[test]
fn test_false_negative_strictness() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "Rule.cs", "a(); // FN\n");
    let engine: Arc<dyn RuleEngine> =
        Arc::new(StubEngine::default().with("Rule.cs", vec![ActualDiagnostic::new("S1234", 1, "m")]));

    let runner = VerificationRunner::new(engine.clone(), &FixmarkConfig::default());
    let report = runner.verify_file(&FixtureFile::original(&path));
    assert_eq!(report.status, FileStatus::Passed);
    assert_eq!(report.notes[0].kind, MismatchKind::ResolvedFalseNegative);

    let strict = FixmarkConfig::from_toml("[verify]\nstrict_false_negatives = true\n").unwrap();
    let runner = VerificationRunner::new(engine, &strict);
    assert!(runner.options().strict_false_negatives);
    let report = runner.verify_file(&FixtureFile::original(&path));
    assert_eq!(report.status, FileStatus::Failed);
}

/// RUN-08: A recorded SARIF-style log drives a full run.
#[test]
fn test_recorded_engine_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "Rule.cs",
        "int x = Foo(); // Noncompliant {{Remove}}\n//      ^^^^^\n",
    );
    let log = r#"[
      { "path": "TestCases/Rule.cs", "line": 1, "span": { "start": 9, "end": 14 },
        "message": "Remove this call.", "rule_id": "S1234" }
    ]"#;
    let engine = RecordedEngine::new(DiagnosticLog::from_json_str(log, "log.json").unwrap());

    let runner = VerificationRunner::new(Arc::new(engine), &FixmarkConfig::default());
    let mut report = RunReport::new();
    runner.run(&discover(dir.path()), &mut report);

    assert!(report.is_success(), "{:?}", report.files());
    assert_eq!(report.summary().matched_primary, 1);
}

/// RUN-09: verify_source works on in-memory text.
#[test]
fn test_verify_source() {
    let engine = StubEngine::default().with("Mem.cs", vec![ActualDiagnostic::new("S1234", 2, "m")]);
    let runner = VerificationRunner::new(Arc::new(engine), &FixmarkConfig::default());

    let (set, comparison) = runner
        .verify_source(Path::new("Mem.cs"), "a(); // Noncompliant\nb();\n")
        .unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(comparison.mismatches.len(), 2);
}
