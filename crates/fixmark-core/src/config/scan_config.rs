//! Fixture discovery configuration.

use serde::{Deserialize, Serialize};

/// Configuration for fixture discovery.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions treated as fixtures, without the leading dot. Default: `["cs"]`.
    pub extensions: Vec<String>,
    /// Extra gitignore-style patterns to skip.
    pub extra_ignore: Vec<String>,
    /// Stem suffix marking code-fix output fixtures (`Rule.Fixed.cs`). Default: "Fixed".
    pub fixed_suffix: Option<String>,
    /// Follow symbolic links while walking. Default: false.
    pub follow_symlinks: Option<bool>,
}

impl ScanConfig {
    pub fn effective_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            vec!["cs".to_string()]
        } else {
            self.extensions.clone()
        }
    }

    pub fn effective_fixed_suffix(&self) -> &str {
        self.fixed_suffix.as_deref().unwrap_or("Fixed")
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }
}
