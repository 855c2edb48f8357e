//! The rule engine collaborator.

use std::path::Path;

use fixmark_core::errors::EngineError;

use super::types::ActualDiagnostic;

/// The analyzer under test, treated as a black box.
///
/// It receives annotation-free source text (line numbers unchanged) and returns
/// the diagnostics it raises. Implementations are shared across worker
/// threads.
pub trait RuleEngine: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// The single rule this engine runs, if it is restricted to one.
    fn rule_id(&self) -> Option<&str> {
        None
    }

    fn analyze(&self, path: &Path, source: &str) -> Result<Vec<ActualDiagnostic>, EngineError>;

    /// The source after applying the engine's code fix, if it has one.
    fn apply_code_fix(&self, _path: &Path, _source: &str) -> Result<Option<String>, EngineError> {
        Ok(None)
    }
}
