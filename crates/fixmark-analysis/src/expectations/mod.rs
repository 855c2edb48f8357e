//! Expectation extraction: the annotation comment mini-language.
//!
//! Operates on comment-token text only; no C# grammar is involved.

mod marker;

pub mod extractor;
pub mod set;
pub mod strip;
pub mod types;

pub use extractor::{Expectations, Extractor};
pub use set::ExpectationSet;
pub use strip::strip_annotations;
pub use types::{ColumnSpan, Expectation, ExpectationKind, IssueGroup};
