//! Verification of annotated analyzer fixtures.
//!
//! Fixture sources carry their expected diagnostics as trailing comments
//! (`// Noncompliant`, `// Secondary [0]`, `// FN`, caret underlines). This crate
//! extracts those expectations, diffs them against what a rule engine reports,
//! checks code-fix fixtures, and renders run reports.

pub mod codefix;
pub mod compare;
pub mod diagnostics;
pub mod expectations;
pub mod reporters;
pub mod runner;
pub mod scanner;
