//! Tests for fixture discovery.

use std::fs;
use std::path::{Path, PathBuf};

use fixmark_analysis::scanner::*;
use fixmark_core::config::ScanConfig;
use fixmark_core::errors::ScanError;

fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, "class C {}\n").unwrap();
    path
}

fn names(fixtures: &[FixtureFile], root: &Path) -> Vec<String> {
    fixtures
        .iter()
        .map(|f| {
            f.path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

/// SCN-01: Only configured extensions are discovered, in sorted order.
#[test]
fn test_discovers_cs_files_sorted() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "b/Rule2.cs");
    touch(dir.path(), "a/Rule1.cs");
    touch(dir.path(), "a/notes.txt");

    let scanner = FixtureScanner::new(&ScanConfig::default()).unwrap();
    let fixtures = scanner.discover(&[dir.path().to_path_buf()]).unwrap();

    assert_eq!(names(&fixtures, dir.path()), vec!["a/Rule1.cs", "b/Rule2.cs"]);
    assert!(fixtures.iter().all(|f| f.kind == FixtureKind::Original));
}

/// SCN-02: Originals and fixed fixtures are paired.
#[test]
fn test_fixed_pairing() {
    let dir = tempfile::tempdir().unwrap();
    let original = touch(dir.path(), "Rule.cs");
    let fixed = touch(dir.path(), "Rule.Fixed.cs");
    touch(dir.path(), "Lonely.cs");

    let scanner = FixtureScanner::new(&ScanConfig::default()).unwrap();
    let fixtures = scanner.discover(&[dir.path().to_path_buf()]).unwrap();

    let by_name = |name: &str| fixtures.iter().find(|f| f.path.ends_with(name)).unwrap();
    assert_eq!(by_name("Rule.cs").fixed_sibling.as_deref(), Some(fixed.as_path()));
    assert_eq!(by_name("Rule.Fixed.cs").kind, FixtureKind::Fixed);
    assert_eq!(by_name("Rule.Fixed.cs").original.as_deref(), Some(original.as_path()));
    assert_eq!(by_name("Lonely.cs").fixed_sibling, None);
}

/// SCN-03: Extra ignore patterns and .gitignore are honoured.
#[test]
fn test_ignore_patterns() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "keep/Rule.cs");
    touch(dir.path(), "generated/Auto.cs");
    touch(dir.path(), "skipped/Old.cs");
    fs::write(dir.path().join(".gitignore"), "skipped/\n").unwrap();

    let config = ScanConfig {
        extra_ignore: vec!["generated/**".to_string()],
        ..ScanConfig::default()
    };
    let fixtures = FixtureScanner::new(&config)
        .unwrap()
        .discover(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(names(&fixtures, dir.path()), vec!["keep/Rule.cs"]);
}

/// SCN-04: A missing root is an error.
#[test]
fn test_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let scanner = FixtureScanner::new(&ScanConfig::default()).unwrap();

    assert!(matches!(
        scanner.discover(&[missing]),
        Err(ScanError::RootNotFound { .. })
    ));
}

/// SCN-05: File roots are taken as-is and duplicates collapse.
#[test]
fn test_file_roots_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    let rule = touch(dir.path(), "Rule.cs");

    let scanner = FixtureScanner::new(&ScanConfig::default()).unwrap();
    let fixtures = scanner
        .discover(&[dir.path().to_path_buf(), rule.clone()])
        .unwrap();

    assert_eq!(fixtures.len(), 1);
    assert_eq!(fixtures[0].path, rule);
}

/// SCN-06: Invalid ignore patterns are rejected up front.
#[test]
fn test_invalid_pattern() {
    let config = ScanConfig {
        extra_ignore: vec!["[".to_string()],
        ..ScanConfig::default()
    };
    assert!(matches!(
        FixtureScanner::new(&config),
        Err(ScanError::InvalidPattern { .. })
    ));
}

/// SCN-07: Naming helpers honour a custom suffix.
#[test]
fn test_custom_suffix() {
    assert!(is_fixed_fixture(Path::new("Rule.Batch.cs"), "Batch"));
    assert_eq!(
        fixed_sibling(Path::new("dir/Rule.cs"), "Batch"),
        Some(PathBuf::from("dir/Rule.Batch.cs"))
    );
    assert_eq!(
        original_of(Path::new("dir/Rule.Batch.cs"), "Batch"),
        Some(PathBuf::from("dir/Rule.cs"))
    );
}
