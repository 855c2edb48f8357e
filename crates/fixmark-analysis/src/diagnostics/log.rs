//! Recorded diagnostic logs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use fixmark_core::errors::DiagnosticLogError;

use super::sarif;
use super::types::ActualDiagnostic;

/// A diagnostic together with the file it was reported for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedDiagnostic {
    /// Artifact path or URI as written by the producer.
    pub path: String,
    #[serde(flatten)]
    pub diagnostic: ActualDiagnostic,
}

/// Diagnostics captured from a previous engine run.
///
/// Two formats are accepted and told apart by shape: a SARIF 2.1.0 document
/// (an object with `runs`), or a JSON array of [`LoggedDiagnostic`] records.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Vec<LoggedDiagnostic>,
}

impl DiagnosticLog {
    pub fn new(entries: Vec<LoggedDiagnostic>) -> Self {
        Self { entries }
    }

    pub fn load(path: &Path) -> Result<Self, DiagnosticLogError> {
        let text = std::fs::read_to_string(path).map_err(|source| DiagnosticLogError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let log = Self::from_json_str(&text, &path.display().to_string())?;
        tracing::info!(
            path = %path.display(),
            diagnostics = log.entries.len(),
            "loaded diagnostic log"
        );
        Ok(log)
    }

    /// Parse either supported format. `origin` names the source in errors.
    pub fn from_json_str(text: &str, origin: &str) -> Result<Self, DiagnosticLogError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| DiagnosticLogError::ParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        let entries = match value {
            serde_json::Value::Object(ref map) if map.contains_key("runs") => {
                sarif::from_value(value, origin)?
            }
            serde_json::Value::Array(_) => {
                serde_json::from_value(value).map_err(|e| DiagnosticLogError::InvalidRecord {
                    path: origin.to_string(),
                    message: e.to_string(),
                })?
            }
            _ => {
                return Err(DiagnosticLogError::ParseError {
                    path: origin.to_string(),
                    message: "expected a SARIF document or an array of diagnostics".to_string(),
                })
            }
        };
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LoggedDiagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
