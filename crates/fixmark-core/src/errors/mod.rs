//! Error handling for fixmark.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod expectation_error;
pub mod log_error;
pub mod report_error;
pub mod scan_error;
pub mod verify_error;

pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use error_code::FixmarkErrorCode;
pub use expectation_error::MalformedExpectation;
pub use log_error::DiagnosticLogError;
pub use report_error::ReportError;
pub use scan_error::ScanError;
pub use verify_error::VerifyError;
