//! Validated, sorted expectation table for one fixture.

use rustc_hash::FxHashMap;
use serde::Serialize;

use fixmark_core::errors::MalformedExpectation;

use super::extractor::Extractor;
use super::types::{Expectation, ExpectationKind, IssueGroup};

/// Every expectation of one fixture, sorted by line then start column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpectationSet {
    expectations: Vec<Expectation>,
}

impl ExpectationSet {
    /// Extract and validate all expectations of `source`.
    ///
    /// Issue ids are checked across the whole file: a `Secondary [id]` may
    /// appear before or after its `Noncompliant [id]`.
    pub fn extract(source: &str) -> Result<Self, MalformedExpectation> {
        let expectations = Extractor::new(source)
            .iter()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_expectations(expectations)
    }

    /// Validate issue groups and sort.
    pub fn from_expectations(mut expectations: Vec<Expectation>) -> Result<Self, MalformedExpectation> {
        let mut primaries: FxHashMap<&str, u32> = FxHashMap::default();
        for expectation in expectations.iter().filter(|e| e.is_primary()) {
            let Some(ref id) = expectation.issue_id else {
                continue;
            };
            if let Some(&first) = primaries.get(id.as_str()) {
                return Err(MalformedExpectation::DuplicateIssueId {
                    line: expectation.annotation_line,
                    id: id.clone(),
                    first,
                });
            }
            primaries.insert(id, expectation.annotation_line);
        }

        for expectation in expectations
            .iter()
            .filter(|e| e.kind == ExpectationKind::Secondary)
        {
            match expectation.issue_id {
                None => {
                    return Err(MalformedExpectation::UnnamedSecondary {
                        line: expectation.annotation_line,
                    })
                }
                Some(ref id) if !primaries.contains_key(id.as_str()) => {
                    return Err(MalformedExpectation::OrphanSecondary {
                        line: expectation.annotation_line,
                        id: id.clone(),
                    })
                }
                Some(_) => {}
            }
        }

        expectations.sort_by_key(Expectation::sort_key);
        Ok(Self { expectations })
    }

    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expectation> {
        self.expectations.iter()
    }

    pub fn as_slice(&self) -> &[Expectation] {
        &self.expectations
    }

    pub fn of_kind(&self, kind: ExpectationKind) -> impl Iterator<Item = &Expectation> {
        self.expectations.iter().filter(move |e| e.kind == kind)
    }

    pub fn primaries(&self) -> impl Iterator<Item = &Expectation> {
        self.of_kind(ExpectationKind::Primary)
    }

    pub fn secondaries(&self) -> impl Iterator<Item = &Expectation> {
        self.of_kind(ExpectationKind::Secondary)
    }

    pub fn false_negatives(&self) -> impl Iterator<Item = &Expectation> {
        self.of_kind(ExpectationKind::FalseNegative)
    }

    pub fn fixed_markers(&self) -> impl Iterator<Item = &Expectation> {
        self.of_kind(ExpectationKind::Fixed)
    }

    /// Secondary expectations pointing at issue `id`, in line order.
    pub fn secondaries_of<'s>(&'s self, id: &'s str) -> impl Iterator<Item = &'s Expectation> + 's {
        self.secondaries()
            .filter(move |e| e.issue_id.as_deref() == Some(id))
    }

    /// Issue groups in primary line order.
    pub fn issue_groups(&self) -> Vec<IssueGroup> {
        self.primaries()
            .filter_map(|primary| {
                let id = primary.issue_id.as_deref()?;
                Some(IssueGroup {
                    id: id.to_string(),
                    primary: primary.clone(),
                    secondaries: self.secondaries_of(id).cloned().collect(),
                })
            })
            .collect()
    }

    pub fn group(&self, id: &str) -> Option<IssueGroup> {
        self.issue_groups().into_iter().find(|g| g.id == id)
    }
}

impl<'a> IntoIterator for &'a ExpectationSet {
    type Item = &'a Expectation;
    type IntoIter = std::slice::Iter<'a, Expectation>;

    fn into_iter(self) -> Self::IntoIter {
        self.expectations.iter()
    }
}
