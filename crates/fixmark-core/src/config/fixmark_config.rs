//! Top-level fixmark configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::report_config::REPORT_FORMATS;
use super::{MessageMatch, ReportConfig, RunConfig, ScanConfig, VerifyConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "fixmark.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`FIXMARK_*`)
/// 3. Project config (`fixmark.toml` in project root)
/// 4. User config (`~/.fixmark/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FixmarkConfig {
    pub verify: VerifyConfig,
    pub scan: ScanConfig,
    pub run: RunConfig,
    pub report: ReportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub message_match: Option<MessageMatch>,
    pub strict_false_negatives: Option<bool>,
    pub threads: Option<usize>,
    pub rule: Option<String>,
    pub report_format: Option<String>,
    pub color: Option<bool>,
}

impl FixmarkConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        ::tracing::warn!(error = %err, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        ::tracing::debug!(root = %root.display(), "configuration resolved");

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &FixmarkConfig) -> Result<(), ConfigError> {
        if let Some(ref format) = config.report.format {
            if !REPORT_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "report.format".to_string(),
                    message: format!("must be one of {}", REPORT_FORMATS.join(", ")),
                });
            }
        }
        for ext in &config.scan.extensions {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.extensions".to_string(),
                    message: format!("'{ext}' must be a non-empty extension without a leading dot"),
                });
            }
        }
        if let Some(ref suffix) = config.scan.fixed_suffix {
            if suffix.is_empty() || suffix.contains('.') {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.fixed_suffix".to_string(),
                    message: "must be a non-empty name without dots".to_string(),
                });
            }
        }
        if let Some(ref rule) = config.run.rule {
            if rule.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "run.rule".to_string(),
                    message: "must not be blank".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.fixmark/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".fixmark").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut FixmarkConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: FixmarkConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut FixmarkConfig, other: &FixmarkConfig) {
        // Verify
        if other.verify.message_match.is_some() {
            base.verify.message_match = other.verify.message_match;
        }
        if other.verify.check_columns.is_some() {
            base.verify.check_columns = other.verify.check_columns;
        }
        if other.verify.check_secondary_locations.is_some() {
            base.verify.check_secondary_locations = other.verify.check_secondary_locations;
        }
        if other.verify.strict_false_negatives.is_some() {
            base.verify.strict_false_negatives = other.verify.strict_false_negatives;
        }

        // Scan
        if !other.scan.extensions.is_empty() {
            base.scan.extensions = other.scan.extensions.clone();
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if other.scan.fixed_suffix.is_some() {
            base.scan.fixed_suffix = other.scan.fixed_suffix.clone();
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }

        // Run
        if other.run.threads.is_some() {
            base.run.threads = other.run.threads;
        }
        if other.run.rule.is_some() {
            base.run.rule = other.run.rule.clone();
        }

        // Report
        if other.report.format.is_some() {
            base.report.format = other.report.format.clone();
        }
        if other.report.color.is_some() {
            base.report.color = other.report.color;
        }
        if other.report.show_passed.is_some() {
            base.report.show_passed = other.report.show_passed;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `FIXMARK_MESSAGE_MATCH`, `FIXMARK_THREADS`, etc.
    fn apply_env_overrides(config: &mut FixmarkConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("FIXMARK_MESSAGE_MATCH") {
            let mode = val
                .parse::<MessageMatch>()
                .map_err(|message| ConfigError::InvalidValue {
                    field: "FIXMARK_MESSAGE_MATCH".to_string(),
                    message,
                })?;
            config.verify.message_match = Some(mode);
        }
        if let Ok(val) = std::env::var("FIXMARK_CHECK_COLUMNS") {
            if let Ok(v) = val.parse::<bool>() {
                config.verify.check_columns = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FIXMARK_STRICT_FALSE_NEGATIVES") {
            if let Ok(v) = val.parse::<bool>() {
                config.verify.strict_false_negatives = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FIXMARK_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.run.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FIXMARK_RULE") {
            config.run.rule = Some(val);
        }
        if let Ok(val) = std::env::var("FIXMARK_REPORT_FORMAT") {
            config.report.format = Some(val);
        }
        if let Ok(val) = std::env::var("FIXMARK_REPORT_COLOR") {
            if let Ok(v) = val.parse::<bool>() {
                config.report.color = Some(v);
            }
        }
        if std::env::var_os("NO_COLOR").is_some() {
            config.report.color = Some(false);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut FixmarkConfig, cli: &CliOverrides) {
        if let Some(v) = cli.message_match {
            config.verify.message_match = Some(v);
        }
        if let Some(v) = cli.strict_false_negatives {
            config.verify.strict_false_negatives = Some(v);
        }
        if let Some(v) = cli.threads {
            config.run.threads = Some(v);
        }
        if let Some(ref v) = cli.rule {
            config.run.rule = Some(v.clone());
        }
        if let Some(ref v) = cli.report_format {
            config.report.format = Some(v.clone());
        }
        if let Some(v) = cli.color {
            config.report.color = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
