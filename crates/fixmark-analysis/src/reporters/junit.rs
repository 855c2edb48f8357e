//! JUnit XML reporter.
//!
//! One `<testsuite>` per run, one `<testcase>` per fixture file. Each failing
//! mismatch or code-fix difference becomes a `<failure>`; malformed and
//! errored fixtures become an `<error>`.

use fixmark_core::errors::ReportError;

use super::Reporter;
use crate::runner::{FileReport, FileStatus, RunReport};

/// JUnit XML reporter.
pub struct JUnitReporter;

impl JUnitReporter {
    pub fn new() -> Self {
        Self
    }

    fn escape_xml(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;")
    }

    fn failures(file: &FileReport) -> Vec<(String, String)> {
        let mut failures: Vec<(String, String)> = file
            .mismatches
            .iter()
            .map(|m| (m.kind.as_str().to_string(), m.to_string()))
            .collect();
        if let Some(ref fix) = file.fix_check {
            failures.extend(fix.remaining_noncompliant.iter().map(|e| {
                ("RemainingNoncompliant".to_string(), format!("fixed file still has {e}"))
            }));
            failures.extend(fix.differences.iter().map(|d| {
                (
                    "FixDifference".to_string(),
                    format!(
                        "line {}: expected {:?}, got {:?}",
                        d.line,
                        d.expected.as_deref().unwrap_or(""),
                        d.actual.as_deref().unwrap_or("")
                    ),
                )
            }));
        }
        failures
    }

    fn write_testcase(xml: &mut String, file: &FileReport) {
        let classname = match file.rule_id {
            Some(ref rule) => format!("fixmark.{}", Self::escape_xml(rule)),
            None => "fixmark".to_string(),
        };
        xml.push_str(&format!(
            "    <testcase name=\"{}\" classname=\"{}\" time=\"{:.3}\"",
            Self::escape_xml(&file.path.display().to_string()),
            classname,
            file.duration_ms as f64 / 1000.0
        ));

        match (file.status, file.error.as_ref()) {
            (FileStatus::Malformed | FileStatus::Errored, Some(error)) => {
                xml.push_str(">\n");
                let message = Self::escape_xml(&error.message);
                xml.push_str(&format!(
                    "      <error type=\"{}\" message=\"{}\">{}</error>\n",
                    error.code, message, message
                ));
                xml.push_str("    </testcase>\n");
            }
            _ => {
                let failures = Self::failures(file);
                if failures.is_empty() {
                    xml.push_str(" />\n");
                    return;
                }
                xml.push_str(">\n");
                for (kind, detail) in failures {
                    let detail = Self::escape_xml(&detail);
                    xml.push_str(&format!(
                        "      <failure type=\"{kind}\" message=\"{detail}\">{detail}</failure>\n"
                    ));
                }
                xml.push_str("    </testcase>\n");
            }
        }
    }
}

impl Default for JUnitReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JUnitReporter {
    fn name(&self) -> &'static str {
        "junit"
    }

    fn generate(&self, report: &RunReport) -> Result<String, ReportError> {
        let summary = report.summary();
        let failures: usize = report
            .files()
            .iter()
            .filter(|f| f.status == FileStatus::Failed)
            .map(|f| Self::failures(f).len())
            .sum();
        let errors = summary.malformed + summary.errored;
        let time = report.duration_ms() as f64 / 1000.0;

        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<testsuites name=\"fixmark\" tests=\"{}\" failures=\"{}\" errors=\"{}\" time=\"{:.3}\">\n",
            summary.files, failures, errors, time
        ));
        xml.push_str(&format!(
            "  <testsuite name=\"fixtures\" tests=\"{}\" failures=\"{}\" errors=\"{}\" time=\"{:.3}\">\n",
            summary.files, failures, errors, time
        ));
        for file in report.files() {
            Self::write_testcase(&mut xml, file);
        }
        xml.push_str("  </testsuite>\n");
        xml.push_str("</testsuites>\n");
        Ok(xml)
    }
}
