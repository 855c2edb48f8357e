//! CLI argument parsing for fixmark.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use fixmark_core::config::{CliOverrides, MessageMatch};

/// Verify annotated analyzer fixtures against recorded rule engine output.
#[derive(Parser, Debug)]
#[command(name = "fixmark")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify fixtures against a recorded diagnostic log
    Verify(VerifyArgs),
    /// Print the expectations of one fixture as JSON
    Extract(FileArgs),
    /// Print one fixture with its annotations removed
    Strip(FileArgs),
}

/// Arguments for `fixmark verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Fixture files or directories to verify
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Diagnostic log: SARIF 2.1.0 or a JSON array of diagnostics
    #[arg(long, short = 'd')]
    pub diagnostics: PathBuf,

    // === Selection ===
    /// Only consider diagnostics of this rule id
    #[arg(long)]
    pub rule: Option<String>,

    // === Matching ===
    /// How expected messages are compared: exact, prefix or contains
    #[arg(long)]
    pub message_match: Option<MessageMatch>,

    /// Fail when the engine reports a diagnostic on an FN line
    #[arg(long, default_value_t = false)]
    pub strict_false_negatives: bool,

    // === Execution ===
    /// Worker threads (0 = one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    // === Output ===
    /// Report format
    #[arg(long, value_parser = ["console", "json", "junit"])]
    pub format: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Disable ANSI colours in console output
    #[arg(long, default_value_t = false)]
    pub no_color: bool,
}

impl VerifyArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            message_match: self.message_match,
            strict_false_negatives: self.strict_false_negatives.then_some(true),
            threads: self.threads,
            rule: self.rule.clone(),
            report_format: self.format.clone(),
            color: self.no_color.then_some(false),
        }
    }
}

/// A single fixture file argument.
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Annotated fixture file
    pub file: PathBuf,
}
