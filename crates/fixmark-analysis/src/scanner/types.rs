//! Scanner types.

use std::path::PathBuf;

use serde::Serialize;

/// Whether a fixture is an original or the expected result of a code fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureKind {
    Original,
    /// `Name.Fixed.cs`.
    Fixed,
}

/// A discovered fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureFile {
    pub path: PathBuf,
    pub kind: FixtureKind,
    /// For an original: its `.Fixed` sibling, when one exists.
    pub fixed_sibling: Option<PathBuf>,
    /// For a fixed fixture: the original it was derived from, when present.
    pub original: Option<PathBuf>,
}

impl FixtureFile {
    /// An original fixture with no fixed sibling.
    pub fn original(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: FixtureKind::Original,
            fixed_sibling: None,
            original: None,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.kind == FixtureKind::Fixed
    }
}
