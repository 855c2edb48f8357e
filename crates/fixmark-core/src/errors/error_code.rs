//! Stable error codes for reports and process exit handling.

/// Every error enum implements this to give each failure a stable code string
/// that survives into JSON/JUnit reports.
pub trait FixmarkErrorCode {
    /// Returns the error code string (e.g., "SCAN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MALFORMED_EXPECTATION: &str = "MALFORMED_EXPECTATION";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const ENGINE_ERROR: &str = "ENGINE_ERROR";
pub const DIAGNOSTIC_LOG_ERROR: &str = "DIAGNOSTIC_LOG_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
pub const UNKNOWN_FORMAT: &str = "UNKNOWN_FORMAT";
