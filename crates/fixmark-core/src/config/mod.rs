//! Configuration system for fixmark.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod fixmark_config;
pub mod report_config;
pub mod run_config;
pub mod scan_config;
pub mod verify_config;

pub use fixmark_config::{CliOverrides, FixmarkConfig};
pub use report_config::ReportConfig;
pub use run_config::RunConfig;
pub use scan_config::ScanConfig;
pub use verify_config::{MessageMatch, VerifyConfig};
