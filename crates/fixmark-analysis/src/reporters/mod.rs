//! Reporters: output formats for run reports.
//!
//! Console (human-readable, optional colour), JSON and JUnit XML.

pub mod console;
pub mod json;
pub mod junit;

use fixmark_core::config::ReportConfig;
use fixmark_core::errors::ReportError;

use crate::runner::RunReport;

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, report: &RunReport) -> Result<String, ReportError>;
}

/// Create a reporter by format name, styled by `config`.
pub fn create_reporter(format: &str, config: &ReportConfig) -> Result<Box<dyn Reporter>, ReportError> {
    match format {
        "console" => Ok(Box::new(console::ConsoleReporter::new(
            config.effective_color(),
            config.effective_show_passed(),
        ))),
        "json" => Ok(Box::new(json::JsonReporter)),
        "junit" => Ok(Box::new(junit::JUnitReporter::new())),
        other => Err(ReportError::UnknownFormat(other.to_string())),
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    fixmark_core::config::report_config::REPORT_FORMATS
}
