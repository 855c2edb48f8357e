//! A recorded diagnostic log served as a rule engine.

use std::collections::BTreeMap;
use std::path::Path;

use fixmark_core::errors::EngineError;

use super::engine::RuleEngine;
use super::log::DiagnosticLog;
use super::types::ActualDiagnostic;

/// Replays diagnostics from a [`DiagnosticLog`].
///
/// Log entries are keyed by their normalized artifact path. A fixture is served
/// the entries of the key sharing the longest trailing run of path components
/// with it, so relative fixture paths match absolute URIs from another machine.
#[derive(Debug, Clone)]
pub struct RecordedEngine {
    by_path: BTreeMap<String, Vec<ActualDiagnostic>>,
    rule: Option<String>,
}

impl RecordedEngine {
    pub fn new(log: DiagnosticLog) -> Self {
        let mut by_path: BTreeMap<String, Vec<ActualDiagnostic>> = BTreeMap::new();
        for entry in log.entries() {
            by_path
                .entry(normalize_path(&entry.path))
                .or_default()
                .push(entry.diagnostic.clone());
        }
        for diagnostics in by_path.values_mut() {
            diagnostics.sort_by_key(ActualDiagnostic::sort_key);
        }
        Self {
            by_path,
            rule: None,
        }
    }

    /// Only serve diagnostics of `rule`.
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Number of distinct artifacts in the log.
    pub fn artifact_count(&self) -> usize {
        self.by_path.len()
    }

    fn lookup(&self, path: &Path) -> Option<&[ActualDiagnostic]> {
        let wanted = normalize_path(&path.to_string_lossy());
        let wanted: Vec<&str> = wanted.split('/').collect();

        // BTreeMap order makes the first of equally good keys win.
        let mut best: Option<(usize, &Vec<ActualDiagnostic>)> = None;
        for (key, diagnostics) in &self.by_path {
            let common = key
                .split('/')
                .rev()
                .zip(wanted.iter().rev())
                .take_while(|(a, b)| a == *b)
                .count();
            if common > 0 && best.map_or(true, |(score, _)| common > score) {
                best = Some((common, diagnostics));
            }
        }
        best.map(|(_, diagnostics)| diagnostics.as_slice())
    }
}

impl RuleEngine for RecordedEngine {
    fn name(&self) -> &str {
        "recorded"
    }

    fn rule_id(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    fn analyze(&self, path: &Path, _source: &str) -> Result<Vec<ActualDiagnostic>, EngineError> {
        let Some(diagnostics) = self.lookup(path) else {
            tracing::debug!(path = %path.display(), "no recorded diagnostics for fixture");
            return Ok(Vec::new());
        };
        Ok(diagnostics
            .iter()
            .filter(|d| self.rule.as_ref().map_or(true, |rule| &d.rule_id == rule))
            .cloned()
            .collect())
    }
}

/// Turn a path or `file://` URI into `/`-separated components without `.` or
/// empty segments.
pub(crate) fn normalize_path(raw: &str) -> String {
    let path = raw.strip_prefix("file://").unwrap_or(raw);
    let path = percent_decode(path).replace('\\', "/");
    path.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

fn percent_decode(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|h| u8::from_str_radix(h, 16).ok());
            if let Some(byte) = hex {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
