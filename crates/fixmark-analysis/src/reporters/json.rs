//! JSON reporter: structured output for tooling.

use serde_json::json;

use fixmark_core::errors::ReportError;

use super::Reporter;
use crate::runner::RunReport;

/// JSON reporter for machine-readable output.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &RunReport) -> Result<String, ReportError> {
        let output = json!({
            "passed": report.is_success(),
            "summary": report.summary(),
            "duration_ms": report.duration_ms(),
            "files": report.files(),
        });
        serde_json::to_string_pretty(&output).map_err(|e| ReportError::Serialization(e.to_string()))
    }
}
