//! fixmark CLI binary.
//!
//! Verify annotated analyzer fixtures against a recorded diagnostic log.

mod cli;
mod progress;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde_json::json;

use fixmark_analysis::diagnostics::{DiagnosticLog, RecordedEngine, RuleEngine};
use fixmark_analysis::expectations::{strip_annotations, ExpectationSet};
use fixmark_analysis::reporters::create_reporter;
use fixmark_analysis::runner::{RunReport, VerificationRunner};
use fixmark_analysis::scanner::FixtureScanner;
use fixmark_core::config::FixmarkConfig;
use fixmark_core::errors::{FixmarkErrorCode, ReportError, ScanError, VerifyError};
use fixmark_core::events::EventDispatcher;

use cli::{Cli, Command, FileArgs, VerifyArgs};
use progress::TracingProgress;

/// All fixtures passed.
const EXIT_PASSED: u8 = 0;
/// At least one fixture failed verification.
const EXIT_FAILED: u8 = 1;
/// Usage, configuration or I/O error.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    fixmark_core::tracing::init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {}", e.coded_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<u8, VerifyError> {
    match cli.command {
        Command::Verify(args) => run_verify(&args),
        Command::Extract(args) => run_extract(&args),
        Command::Strip(args) => run_strip(&args),
    }
}

fn run_verify(args: &VerifyArgs) -> Result<u8, VerifyError> {
    let root = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = FixmarkConfig::load(&root, Some(&args.overrides()))?;

    let log = DiagnosticLog::load(&args.diagnostics)?;
    let mut engine = RecordedEngine::new(log);
    if let Some(ref rule) = config.run.rule {
        engine = engine.with_rule(rule.clone());
    }
    let engine: Arc<dyn RuleEngine> = Arc::new(engine);

    let fixtures = FixtureScanner::new(&config.scan)?.discover(&args.paths)?;
    if fixtures.is_empty() {
        eprintln!("warning: no fixtures found");
        return Ok(EXIT_PASSED);
    }

    let mut events = EventDispatcher::new();
    events.register(Arc::new(TracingProgress));
    let runner = VerificationRunner::new(engine, &config).with_events(events);

    let mut report = RunReport::new();
    runner.run(&fixtures, &mut report);

    let reporter = create_reporter(config.report.effective_format(), &config.report)?;
    let rendered = reporter.generate(&report)?;
    write_output(args.output.as_deref(), &rendered)?;

    Ok(if report.is_success() {
        EXIT_PASSED
    } else {
        EXIT_FAILED
    })
}

fn run_extract(args: &FileArgs) -> Result<u8, VerifyError> {
    let source = read_fixture(&args.file)?;
    let set = ExpectationSet::extract(&source)?;
    let output = json!({
        "path": args.file.display().to_string(),
        "expectations": set.as_slice(),
        "issue_groups": set.issue_groups(),
    });
    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|e| ReportError::Serialization(e.to_string()))?;
    println!("{rendered}");
    Ok(EXIT_PASSED)
}

fn run_strip(args: &FileArgs) -> Result<u8, VerifyError> {
    let source = read_fixture(&args.file)?;
    print!("{}", strip_annotations(&source));
    Ok(EXIT_PASSED)
}

fn read_fixture(path: &Path) -> Result<String, ScanError> {
    std::fs::read_to_string(path).map_err(|source| ScanError::IoError {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<(), ReportError> {
    match path {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|source| ReportError::IoError {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
