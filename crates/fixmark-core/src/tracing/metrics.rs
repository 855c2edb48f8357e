//! Structured span field names shared across fixmark subsystems.
//!
//! Using the same field names everywhere keeps log queries uniform.

/// Scanner: fixture discovery duration in milliseconds.
pub const DISCOVERY_DURATION: &str = "discovery_duration";

/// Scanner: number of fixture files found.
pub const FIXTURES_FOUND: &str = "fixtures_found";

/// Runner: per-file verification time in milliseconds.
pub const FILE_VERIFY_TIME: &str = "file_verify_time";

/// Runner: whole run duration in milliseconds.
pub const RUN_DURATION: &str = "run_duration";

/// Comparator: number of mismatches in one file.
pub const MISMATCH_COUNT: &str = "mismatch_count";

/// Diagnostic logs: diagnostics loaded from a recorded log.
pub const LOGGED_DIAGNOSTICS: &str = "logged_diagnostics";
