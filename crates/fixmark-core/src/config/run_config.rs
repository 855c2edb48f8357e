//! Runner configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the verification runner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunConfig {
    /// Worker threads. 0 or unset uses rayon's default.
    pub threads: Option<usize>,
    /// Only keep diagnostics of this rule id.
    pub rule: Option<String>,
}

impl RunConfig {
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }
}
