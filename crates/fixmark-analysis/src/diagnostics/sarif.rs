//! SARIF 2.1.0 ingestion (the subset compilers write with `/errorlog`).

use serde::Deserialize;

use fixmark_core::errors::DiagnosticLogError;

use super::log::LoggedDiagnostic;
use super::recorded::normalize_path;
use super::types::{ActualDiagnostic, SecondaryLocation};
use crate::expectations::ColumnSpan;

#[derive(Debug, Deserialize)]
struct SarifLog {
    version: Option<String>,
    #[serde(default)]
    runs: Vec<SarifRun>,
}

#[derive(Debug, Deserialize)]
struct SarifRun {
    #[serde(default)]
    results: Vec<SarifResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: Option<String>,
    #[serde(default)]
    message: SarifMessage,
    #[serde(default)]
    locations: Vec<SarifLocation>,
    #[serde(default)]
    related_locations: Vec<SarifLocation>,
    #[serde(default)]
    suppressions: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct SarifMessage {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: Option<SarifPhysicalLocation>,
    message: Option<SarifMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: Option<SarifArtifactLocation>,
    region: Option<SarifRegion>,
}

#[derive(Debug, Deserialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SarifRegion {
    start_line: u32,
    start_column: Option<u32>,
    end_line: Option<u32>,
    end_column: Option<u32>,
}

impl SarifRegion {
    /// Single-line regions only; a caret span cannot describe more.
    fn span(&self) -> Option<ColumnSpan> {
        if self.end_line.is_some_and(|end| end != self.start_line) {
            return None;
        }
        match (self.start_column, self.end_column) {
            (Some(start), Some(end)) if end > start => Some(ColumnSpan::new(start, end)),
            _ => None,
        }
    }
}

/// Convert a parsed SARIF document into logged diagnostics.
///
/// Suppressed results and results without a physical location are skipped.
pub(crate) fn from_value(
    value: serde_json::Value,
    origin: &str,
) -> Result<Vec<LoggedDiagnostic>, DiagnosticLogError> {
    let log: SarifLog =
        serde_json::from_value(value).map_err(|e| DiagnosticLogError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

    let version = log.version.unwrap_or_default();
    if !version.starts_with("2.1") {
        return Err(DiagnosticLogError::UnsupportedVersion {
            path: origin.to_string(),
            version,
        });
    }

    let mut entries = Vec::new();
    for result in log.runs.into_iter().flat_map(|run| run.results) {
        if !result.suppressions.is_empty() {
            continue;
        }
        let Some((uri, region)) = result.locations.first().and_then(physical) else {
            tracing::debug!(
                rule_id = result.rule_id.as_deref().unwrap_or("?"),
                "skipping SARIF result without a physical location"
            );
            continue;
        };

        // Related locations in other files cannot be checked against this fixture.
        let primary_path = normalize_path(uri);
        let secondary_locations = result
            .related_locations
            .iter()
            .filter_map(|location| {
                let (related_uri, region) = physical(location)?;
                if normalize_path(related_uri) != primary_path {
                    tracing::debug!(
                        rule_id = result.rule_id.as_deref().unwrap_or("?"),
                        uri = related_uri,
                        "skipping related location in another file"
                    );
                    return None;
                }
                Some(SecondaryLocation {
                    line: region.start_line,
                    span: region.span(),
                    message: location.message.as_ref().and_then(|m| m.text.clone()),
                })
            })
            .collect();

        entries.push(LoggedDiagnostic {
            path: uri.to_string(),
            diagnostic: ActualDiagnostic {
                line: region.start_line,
                span: region.span(),
                message: result.message.text.clone().unwrap_or_default(),
                rule_id: result.rule_id.clone().unwrap_or_else(|| "unknown".to_string()),
                secondary_locations,
            },
        });
    }
    Ok(entries)
}

fn physical(location: &SarifLocation) -> Option<(&str, &SarifRegion)> {
    let physical = location.physical_location.as_ref()?;
    let uri = physical.artifact_location.as_ref()?.uri.as_str();
    Some((uri, physical.region.as_ref()?))
}
