//! Expected-vs-actual diagnostic comparison.

pub mod comparator;
pub mod options;
pub mod types;

pub use comparator::compare;
pub use options::MatchOptions;
pub use types::{ActualLocation, Comparison, LocationRole, Mismatch, MismatchKind};
