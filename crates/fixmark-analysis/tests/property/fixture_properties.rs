//! Property tests over generated fixtures.

use fixmark_analysis::compare::{compare, MatchOptions};
use fixmark_analysis::diagnostics::ActualDiagnostic;
use fixmark_analysis::expectations::{strip_annotations, ExpectationSet};
use proptest::prelude::*;

fn code_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}\\(\\);",
        "[a-z]{1,8}\\(\\); // Noncompliant",
        "[a-z]{1,8}\\(\\); // Noncompliant \\{\\{[a-z ]{1,12}\\}\\}",
        "[a-z]{1,8}\\(\\); // FN",
        "[a-z]{1,8}\\(\\); // ordinary comment",
        Just(String::new()),
    ]
}

fn fixture() -> impl Strategy<Value = String> {
    prop::collection::vec(code_line(), 1..30).prop_map(|lines| lines.join("\n") + "\n")
}

/// What a correct engine reports for a fixture.
fn perfect_engine(set: &ExpectationSet) -> Vec<ActualDiagnostic> {
    set.primaries()
        .map(|e| {
            let message = e.message.clone().unwrap_or_else(|| "issue".to_string());
            ActualDiagnostic::new("S1234", e.line, format!("{message}."))
        })
        .collect()
}

proptest! {
    #[test]
    fn correct_engine_matches_every_primary(source in fixture()) {
        let set = ExpectationSet::extract(&source).unwrap();
        let actual = perfect_engine(&set);
        let result = compare(&set, &actual, &MatchOptions::default());
        prop_assert!(result.passed(), "{:?}", result.mismatches);
        prop_assert_eq!(result.matched_primary, set.primaries().count());
    }

    #[test]
    fn comparison_is_idempotent(source in fixture(), lines in prop::collection::vec(1u32..30, 0..10)) {
        let set = ExpectationSet::extract(&source).unwrap();
        let actual: Vec<ActualDiagnostic> = lines
            .iter()
            .map(|&line| ActualDiagnostic::new("S1234", line, "m"))
            .collect();
        let options = MatchOptions::default();
        prop_assert_eq!(compare(&set, &actual, &options), compare(&set, &actual, &options));
    }

    #[test]
    fn stripping_preserves_lines_and_is_idempotent(source in fixture()) {
        let stripped = strip_annotations(&source);
        prop_assert_eq!(stripped.lines().count(), source.lines().count());
        prop_assert_eq!(strip_annotations(&stripped), stripped.clone());
        prop_assert!(ExpectationSet::extract(&stripped).unwrap().is_empty());
    }

    #[test]
    fn silent_engine_misses_exactly_the_primaries(source in fixture()) {
        let set = ExpectationSet::extract(&source).unwrap();
        let result = compare(&set, &[], &MatchOptions::default());
        prop_assert_eq!(result.mismatches.len(), set.primaries().count());
        prop_assert!(result.notes.is_empty());
    }
}
