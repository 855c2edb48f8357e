//! Fixture discovery.

pub mod types;
pub mod walker;

pub use types::{FixtureFile, FixtureKind};
pub use walker::{fixed_sibling, is_fixed_fixture, original_of, FixtureScanner};
