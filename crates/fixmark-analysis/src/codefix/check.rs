//! Fixed-fixture checks.
//!
//! A fixed fixture is the expected result of applying a rule's code fix to
//! its original fixture. It must carry no `Noncompliant` markers, and the
//! engine's own fix output must reproduce it line for line once annotations
//! are stripped from both sides.

use serde::Serialize;

use crate::expectations::{strip_annotations, Expectation, ExpectationSet};

/// One line where the engine's fix output differs from the fixed fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixDifference {
    /// 1-based line number.
    pub line: u32,
    /// Fixed-fixture text; `None` past its end.
    pub expected: Option<String>,
    /// Engine output; `None` past its end.
    pub actual: Option<String>,
}

/// Result of the code-fix checks for one fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FixCheck {
    /// `Noncompliant` markers left in a fixed fixture.
    pub remaining_noncompliant: Vec<Expectation>,
    /// Number of `Fixed` markers seen.
    pub fixed_markers: usize,
    pub differences: Vec<FixDifference>,
    /// Whether engine fix output was compared at all.
    pub compared_output: bool,
}

impl FixCheck {
    /// Checks that apply to a fixed fixture on its own.
    pub fn for_fixed_fixture(set: &ExpectationSet) -> Self {
        Self {
            remaining_noncompliant: remaining_noncompliant(set),
            fixed_markers: set.fixed_markers().count(),
            differences: Vec::new(),
            compared_output: false,
        }
    }

    /// Compare the engine's fix of an original fixture with its fixed sibling.
    pub fn for_fix_output(original: &ExpectationSet, expected_fixed: &str, actual_fixed: &str) -> Self {
        Self {
            remaining_noncompliant: Vec::new(),
            fixed_markers: original.fixed_markers().count(),
            differences: compare_fix_output(expected_fixed, actual_fixed),
            compared_output: true,
        }
    }

    pub fn passed(&self) -> bool {
        self.remaining_noncompliant.is_empty() && self.differences.is_empty()
    }
}

/// `Noncompliant` expectations still present in a fixed fixture.
pub fn remaining_noncompliant(set: &ExpectationSet) -> Vec<Expectation> {
    set.primaries().cloned().collect()
}

/// Line-by-line diff of fixed-fixture text and engine fix output.
///
/// Annotations and trailing whitespace are ignored on both sides, as are
/// trailing empty lines.
pub fn compare_fix_output(expected_fixed: &str, actual_fixed: &str) -> Vec<FixDifference> {
    let expected = normalized_lines(expected_fixed);
    let actual = normalized_lines(actual_fixed);

    (0..expected.len().max(actual.len()))
        .filter_map(|i| {
            let e = expected.get(i);
            let a = actual.get(i);
            (e != a).then(|| FixDifference {
                line: i as u32 + 1,
                expected: e.cloned(),
                actual: a.cloned(),
            })
        })
        .collect()
}

fn normalized_lines(text: &str) -> Vec<String> {
    let stripped = strip_annotations(text);
    let mut lines: Vec<String> = stripped
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_blank_lines_ignored() {
        assert!(compare_fix_output("a();\nb();\n", "a();  \nb();\n\n\n").is_empty());
    }

    #[test]
    fn test_extra_line_reported() {
        let diffs = compare_fix_output("a();\n", "a();\nb();\n");
        assert_eq!(
            diffs,
            vec![FixDifference {
                line: 2,
                expected: None,
                actual: Some("b();".to_string()),
            }]
        );
    }
}
