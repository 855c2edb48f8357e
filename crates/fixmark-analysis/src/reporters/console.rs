//! Console reporter: human-readable output with optional colour.

use fixmark_core::errors::ReportError;

use super::Reporter;
use crate::compare::Mismatch;
use crate::runner::{FileReport, FileStatus, RunReport};

/// Console reporter for terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
    /// Also list files that passed.
    pub show_passed: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool, show_passed: bool) -> Self {
        Self {
            use_color,
            show_passed,
        }
    }

    fn status_symbol(status: FileStatus) -> &'static str {
        match status {
            FileStatus::Passed => "✓",
            FileStatus::Failed => "✗",
            FileStatus::Malformed => "⚠",
            FileStatus::Errored => "⚡",
        }
    }

    fn color_start(&self, status: FileStatus) -> &'static str {
        if !self.use_color {
            return "";
        }
        match status {
            FileStatus::Passed => "\x1b[32m",    // green
            FileStatus::Failed => "\x1b[31m",    // red
            FileStatus::Malformed => "\x1b[33m", // yellow
            FileStatus::Errored => "\x1b[35m",   // magenta
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }

    fn write_file(&self, output: &mut String, file: &FileReport) {
        output.push_str(&format!(
            "{}{} {}{} ({}/{} matched, {}ms)\n",
            self.color_start(file.status),
            Self::status_symbol(file.status),
            file.path.display(),
            self.color_end(),
            file.matched_primary,
            file.expected_primary,
            file.duration_ms
        ));

        if let Some(ref error) = file.error {
            output.push_str(&format!("    [{}] {}\n", error.code, error.message));
        }
        for mismatch in &file.mismatches {
            write_mismatch(output, "    ", mismatch);
        }
        for note in &file.notes {
            write_mismatch(output, "    note: ", note);
        }
        if let Some(ref fix) = file.fix_check {
            for remaining in &fix.remaining_noncompliant {
                output.push_str(&format!("    fixed file still has {remaining}\n"));
            }
            for diff in &fix.differences {
                output.push_str(&format!(
                    "    code fix differs at line {}: expected {:?}, got {:?}\n",
                    diff.line,
                    diff.expected.as_deref().unwrap_or("<end of file>"),
                    diff.actual.as_deref().unwrap_or("<end of file>")
                ));
            }
        }
    }
}

fn write_mismatch(output: &mut String, prefix: &str, mismatch: &Mismatch) {
    output.push_str(prefix);
    output.push_str(&mismatch.to_string());
    output.push('\n');
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, report: &RunReport) -> Result<String, ReportError> {
        let mut output = String::new();

        for file in report.files() {
            if file.passed() && !self.show_passed {
                continue;
            }
            self.write_file(&mut output, file);
        }

        let summary = report.summary();
        if !output.is_empty() {
            output.push('\n');
        }
        let status = if report.is_success() {
            FileStatus::Passed
        } else {
            FileStatus::Failed
        };
        output.push_str(&format!(
            "{}{} files, {} passed, {} failed, {} malformed, {} errored{} in {}ms\n",
            self.color_start(status),
            summary.files,
            summary.passed,
            summary.failed,
            summary.malformed,
            summary.errored,
            self.color_end(),
            report.duration_ms()
        ));
        Ok(output)
    }
}
