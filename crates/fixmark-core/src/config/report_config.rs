//! Report output configuration.

use serde::{Deserialize, Serialize};

/// Report formats understood by the reporters.
pub const REPORT_FORMATS: &[&str] = &["console", "json", "junit"];

/// Configuration for report rendering.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format. Default: "console".
    pub format: Option<String>,
    /// ANSI colour in console output. Default: true.
    pub color: Option<bool>,
    /// List passing files in console output. Default: false.
    pub show_passed: Option<bool>,
}

impl ReportConfig {
    pub fn effective_format(&self) -> &str {
        self.format.as_deref().unwrap_or("console")
    }

    pub fn effective_color(&self) -> bool {
        self.color.unwrap_or(true)
    }

    pub fn effective_show_passed(&self) -> bool {
        self.show_passed.unwrap_or(false)
    }
}
