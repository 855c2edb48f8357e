//! The rule engine boundary: diagnostics it emits and recorded logs of them.

pub mod engine;
pub mod log;
pub mod recorded;
pub mod sarif;
pub mod types;

pub use engine::RuleEngine;
pub use log::{DiagnosticLog, LoggedDiagnostic};
pub use recorded::RecordedEngine;
pub use types::{ActualDiagnostic, SecondaryLocation};
