//! Gitignore-aware fixture walker built on `ignore`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;

use fixmark_core::config::ScanConfig;
use fixmark_core::errors::ScanError;
use fixmark_core::tracing::metrics;

use super::types::{FixtureFile, FixtureKind};

/// Discovers fixture files under one or more roots.
#[derive(Debug, Clone)]
pub struct FixtureScanner {
    extensions: Vec<String>,
    extra_ignore: Vec<String>,
    fixed_suffix: String,
    follow_symlinks: bool,
}

impl FixtureScanner {
    pub fn new(config: &ScanConfig) -> Result<Self, ScanError> {
        let scanner = Self {
            extensions: config.effective_extensions(),
            extra_ignore: config.extra_ignore.clone(),
            fixed_suffix: config.effective_fixed_suffix().to_string(),
            follow_symlinks: config.effective_follow_symlinks(),
        };
        // Reject bad patterns before any walking starts.
        scanner.overrides(Path::new("."))?;
        Ok(scanner)
    }

    /// Sorted, de-duplicated fixtures under `roots`.
    ///
    /// A root that is a file is taken as-is; directories are walked honouring
    /// `.gitignore`, `.ignore` and the configured extra patterns.
    pub fn discover(&self, roots: &[PathBuf]) -> Result<Vec<FixtureFile>, ScanError> {
        let start = Instant::now();
        let mut paths = BTreeSet::new();

        for root in roots {
            if root.is_file() {
                paths.insert(root.clone());
                continue;
            }
            if !root.is_dir() {
                return Err(ScanError::RootNotFound { path: root.clone() });
            }
            self.walk(root, &mut paths)?;
        }

        let fixtures: Vec<FixtureFile> = paths.iter().map(|path| self.classify(path, &paths)).collect();

        tracing::info!(
            { metrics::FIXTURES_FOUND } = fixtures.len(),
            { metrics::DISCOVERY_DURATION } = start.elapsed().as_millis() as u64,
            roots = roots.len(),
            "fixture discovery complete"
        );
        Ok(fixtures)
    }

    pub fn is_fixed_fixture(&self, path: &Path) -> bool {
        is_fixed_fixture(path, &self.fixed_suffix)
    }

    fn walk(&self, root: &Path, paths: &mut BTreeSet<PathBuf>) -> Result<(), ScanError> {
        let walker = WalkBuilder::new(root)
            .follow_links(self.follow_symlinks)
            .require_git(false)
            .hidden(true)
            .overrides(self.overrides(root)?)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if self.has_fixture_extension(entry.path()) {
                paths.insert(entry.into_path());
            }
        }
        Ok(())
    }

    fn overrides(&self, root: &Path) -> Result<Override, ScanError> {
        let mut builder = OverrideBuilder::new(root);
        for pattern in &self.extra_ignore {
            builder
                .add(&format!("!{pattern}"))
                .map_err(|e| ScanError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
        }
        builder.build().map_err(|e| ScanError::Walk {
            root: root.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn has_fixture_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
    }

    fn classify(&self, path: &Path, discovered: &BTreeSet<PathBuf>) -> FixtureFile {
        let present = |candidate: &PathBuf| discovered.contains(candidate) || candidate.is_file();

        if self.is_fixed_fixture(path) {
            FixtureFile {
                path: path.to_path_buf(),
                kind: FixtureKind::Fixed,
                fixed_sibling: None,
                original: original_of(path, &self.fixed_suffix).filter(present),
            }
        } else {
            FixtureFile {
                path: path.to_path_buf(),
                kind: FixtureKind::Original,
                fixed_sibling: fixed_sibling(path, &self.fixed_suffix).filter(present),
                original: None,
            }
        }
    }
}

/// `Rule.Fixed.cs` is a fixed fixture for suffix `Fixed`.
pub fn is_fixed_fixture(path: &Path, suffix: &str) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.rsplit_once('.'))
        .is_some_and(|(base, last)| !base.is_empty() && last == suffix)
}

/// `dir/Rule.cs` → `dir/Rule.Fixed.cs`. `None` for paths without a stem.
pub fn fixed_sibling(path: &Path, suffix: &str) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let name = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{stem}.{suffix}.{ext}"),
        None => format!("{stem}.{suffix}"),
    };
    Some(path.with_file_name(name))
}

/// `dir/Rule.Fixed.cs` → `dir/Rule.cs`. `None` unless `path` is a fixed fixture.
pub fn original_of(path: &Path, suffix: &str) -> Option<PathBuf> {
    if !is_fixed_fixture(path, suffix) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let (base, _) = stem.rsplit_once('.')?;
    let name = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{base}.{ext}"),
        None => base.to_string(),
    };
    Some(path.with_file_name(name))
}
