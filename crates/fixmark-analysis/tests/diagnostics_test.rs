//! Tests for diagnostic logs and the recorded rule engine.

use std::path::Path;

use fixmark_analysis::diagnostics::*;
use fixmark_analysis::expectations::ColumnSpan;
use fixmark_core::errors::DiagnosticLogError;

const SARIF: &str = r#"{
  "$schema": "https://json.schemastore.org/sarif-2.1.0.json",
  "version": "2.1.0",
  "runs": [
    {
      "tool": { "driver": { "name": "Microsoft (R) Visual C# Compiler" } },
      "results": [
        {
          "ruleId": "S1234",
          "level": "warning",
          "message": { "text": "Was '-=' meant instead?" },
          "locations": [
            {
              "physicalLocation": {
                "artifactLocation": { "uri": "file:///C:/src/Tests/TestCases/Rule.cs" },
                "region": { "startLine": 14, "startColumn": 16, "endLine": 14, "endColumn": 18 }
              }
            }
          ],
          "relatedLocations": [
            {
              "physicalLocation": {
                "artifactLocation": { "uri": "file:///C:/src/Tests/TestCases/Rule.cs" },
                "region": { "startLine": 12, "startColumn": 9, "endLine": 12, "endColumn": 15 }
              },
              "message": { "text": "declared here" }
            }
          ]
        },
        {
          "ruleId": "S1234",
          "message": { "text": "Spans two lines" },
          "locations": [
            {
              "physicalLocation": {
                "artifactLocation": { "uri": "file:///C:/src/Tests/TestCases/Rule.cs" },
                "region": { "startLine": 20, "startColumn": 5, "endLine": 22, "endColumn": 6 }
              }
            }
          ]
        },
        {
          "ruleId": "S1234",
          "message": { "text": "Suppressed" },
          "suppressions": [ { "kind": "inSource" } ],
          "locations": [
            {
              "physicalLocation": {
                "artifactLocation": { "uri": "file:///C:/src/Tests/TestCases/Rule.cs" },
                "region": { "startLine": 30 }
              }
            }
          ]
        },
        {
          "ruleId": "CS8019",
          "message": { "text": "No location" }
        }
      ]
    }
  ]
}"#;

/// DIAG-01: SARIF results become logged diagnostics.
#[test]
fn test_sarif_results() {
    let log = DiagnosticLog::from_json_str(SARIF, "test.sarif").unwrap();
    assert_eq!(log.len(), 2);

    let first = &log.entries()[0];
    assert_eq!(first.path, "file:///C:/src/Tests/TestCases/Rule.cs");
    assert_eq!(first.diagnostic.line, 14);
    assert_eq!(first.diagnostic.span, Some(ColumnSpan::new(16, 18)));
    assert_eq!(first.diagnostic.rule_id, "S1234");
    assert_eq!(
        first.diagnostic.secondary_locations,
        vec![SecondaryLocation {
            line: 12,
            span: Some(ColumnSpan::new(9, 15)),
            message: Some("declared here".to_string()),
        }]
    );

    let multi_line = &log.entries()[1];
    assert_eq!(multi_line.diagnostic.line, 20);
    assert_eq!(multi_line.diagnostic.span, None);
}

/// DIAG-02: Only SARIF 2.1 is accepted.
#[test]
fn test_sarif_version() {
    let old = r#"{ "version": "1.0.0", "runs": [] }"#;
    assert!(matches!(
        DiagnosticLog::from_json_str(old, "old.sarif"),
        Err(DiagnosticLogError::UnsupportedVersion { version, .. }) if version == "1.0.0"
    ));
}

/// DIAG-03: The native format is a JSON array of records.
#[test]
fn test_native_records() {
    let native = r#"[
      { "path": "Rule.cs", "line": 3, "message": "m", "rule_id": "S1" },
      { "path": "Rule.cs", "line": 1, "span": { "start": 2, "end": 5 }, "message": "n", "rule_id": "S1",
        "secondary_locations": [ { "line": 4 } ] }
    ]"#;
    let log = DiagnosticLog::from_json_str(native, "log.json").unwrap();

    assert_eq!(log.len(), 2);
    assert_eq!(log.entries()[1].diagnostic.span, Some(ColumnSpan::new(2, 5)));
    assert_eq!(log.entries()[1].diagnostic.secondary_locations[0].line, 4);
}

/// DIAG-04: Malformed documents are rejected with a useful error.
#[test]
fn test_invalid_logs() {
    assert!(matches!(
        DiagnosticLog::from_json_str("{ not json", "bad.json"),
        Err(DiagnosticLogError::ParseError { .. })
    ));
    assert!(matches!(
        DiagnosticLog::from_json_str(r#"{ "results": [] }"#, "bad.json"),
        Err(DiagnosticLogError::ParseError { .. })
    ));
    assert!(matches!(
        DiagnosticLog::from_json_str(r#"[ { "path": "a.cs" } ]"#, "bad.json"),
        Err(DiagnosticLogError::InvalidRecord { .. })
    ));
}

/// DIAG-05: The recorded engine matches fixtures by trailing path components.
#[test]
fn test_recorded_engine_suffix_match() {
    let log = DiagnosticLog::from_json_str(SARIF, "test.sarif").unwrap();
    let engine = RecordedEngine::new(log);

    let found = engine
        .analyze(Path::new("tests/TestCases/Rule.cs"), "")
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].line, 14);

    let elsewhere = engine
        .analyze(Path::new("/home/ci/src/Tests/TestCases/Rule.cs"), "")
        .unwrap();
    assert_eq!(elsewhere.len(), 2);

    assert!(engine.analyze(Path::new("Other.cs"), "").unwrap().is_empty());
    assert_eq!(engine.artifact_count(), 1);
    assert_eq!(engine.name(), "recorded");
}

/// DIAG-06: The longest matching artifact path wins.
#[test]
fn test_recorded_engine_longest_key() {
    let native = r#"[
      { "path": "Rule.cs", "line": 1, "message": "short", "rule_id": "S1" },
      { "path": "TestCases/Rule.cs", "line": 2, "message": "long", "rule_id": "S1" }
    ]"#;
    let engine = RecordedEngine::new(DiagnosticLog::from_json_str(native, "log.json").unwrap());

    let found = engine.analyze(Path::new("repo/TestCases/Rule.cs"), "").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].message, "long");
}

/// DIAG-07: A rule filter drops other rules' diagnostics.
#[test]
fn test_recorded_engine_rule_filter() {
    let native = r#"[
      { "path": "Rule.cs", "line": 1, "message": "a", "rule_id": "S1" },
      { "path": "Rule.cs", "line": 2, "message": "b", "rule_id": "CS0168" }
    ]"#;
    let engine = RecordedEngine::new(DiagnosticLog::from_json_str(native, "log.json").unwrap())
        .with_rule("S1");

    let found = engine.analyze(Path::new("Rule.cs"), "").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(engine.rule_id(), Some("S1"));
    assert_eq!(engine.apply_code_fix(Path::new("Rule.cs"), "").unwrap(), None);
}

/// DIAG-08: Logs load from disk.
#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("build.sarif");
    std::fs::write(&path, SARIF).unwrap();

    let log = DiagnosticLog::load(&path).unwrap();
    assert_eq!(log.len(), 2);

    assert!(matches!(
        DiagnosticLog::load(&dir.path().join("missing.sarif")),
        Err(DiagnosticLogError::IoError { .. })
    ));
}

/// DIAG-09: Related locations in another file are not secondary locations.
#[test]
fn test_sarif_related_location_in_other_file() {
    let sarif = r#"{
      "version": "2.1.0",
      "runs": [ { "results": [ {
        "ruleId": "S3242",
        "message": { "text": "Partial member" },
        "locations": [ { "physicalLocation": {
          "artifactLocation": { "uri": "file:///a/A.cs" },
          "region": { "startLine": 3 } } } ],
        "relatedLocations": [
          { "physicalLocation": {
              "artifactLocation": { "uri": "file:///a/Other.cs" },
              "region": { "startLine": 7 } } },
          { "physicalLocation": {
              "artifactLocation": { "uri": "file:///a/./A.cs" },
              "region": { "startLine": 5, "startColumn": 2, "endColumn": 4 } } }
        ]
      } ] } ]
    }"#;
    let log = DiagnosticLog::from_json_str(sarif, "partial.sarif").unwrap();

    assert_eq!(
        log.entries()[0].diagnostic.secondary_locations,
        vec![SecondaryLocation {
            line: 5,
            span: Some(ColumnSpan::new(2, 4)),
            message: None,
        }]
    );
}
