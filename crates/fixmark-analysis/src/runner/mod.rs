//! Parallel fixture verification and the run report accumulator.

pub mod report;
pub mod runner;

pub use report::{FileError, FileReport, FileStatus, RunReport, RunSummary};
pub use runner::VerificationRunner;
