//! One-pass merge of sorted expectations against sorted actual diagnostics.
//!
//! Both sides are walked line by line. Within a line, primaries are matched to
//! actuals as a maximum bipartite matching, so one expectation never takes an
//! actual another needs when a different assignment satisfies both.
//! Span-carrying expectations are placed first, then message-only ones, then
//! bare line expectations; FN expectations only see what is left.

use crate::diagnostics::{ActualDiagnostic, SecondaryLocation};
use crate::expectations::{ColumnSpan, Expectation, ExpectationKind, ExpectationSet};

use super::options::MatchOptions;
use super::types::{ActualLocation, Comparison, LocationRole, Mismatch, MismatchKind};

/// Compare `expected` against `actual`. Pure and deterministic.
pub fn compare(
    expected: &ExpectationSet,
    actual: &[ActualDiagnostic],
    options: &MatchOptions,
) -> Comparison {
    let mut actual: Vec<&ActualDiagnostic> = actual.iter().collect();
    actual.sort_by_key(|d| d.sort_key());

    let matchable: Vec<&Expectation> = expected
        .iter()
        .filter(|e| {
            matches!(
                e.kind,
                ExpectationKind::Primary | ExpectationKind::FalseNegative
            )
        })
        .collect();

    let mut state = State {
        options,
        comparison: Comparison::default(),
        matched: Vec::new(),
    };

    let (mut ei, mut ai) = (0, 0);
    while ei < matchable.len() || ai < actual.len() {
        let line = match (matchable.get(ei), actual.get(ai)) {
            (Some(e), Some(a)) => e.line.min(a.line),
            (Some(e), None) => e.line,
            (None, Some(a)) => a.line,
            (None, None) => break,
        };
        let e_end = ei + matchable[ei..].iter().take_while(|e| e.line == line).count();
        let a_end = ai + actual[ai..].iter().take_while(|a| a.line == line).count();
        state.match_line(&matchable[ei..e_end], &actual[ai..a_end]);
        ei = e_end;
        ai = a_end;
    }

    if options.check_secondary_locations {
        state.match_secondaries(expected);
    }

    let mut comparison = state.comparison;
    comparison.mismatches.sort_by_key(Mismatch::sort_key);
    comparison.notes.sort_by_key(Mismatch::sort_key);
    comparison
}

struct State<'a> {
    options: &'a MatchOptions,
    comparison: Comparison,
    /// Primary expectations paired with the actual they claimed.
    matched: Vec<(&'a Expectation, &'a ActualDiagnostic)>,
}

impl<'a> State<'a> {
    fn match_line(&mut self, expectations: &[&'a Expectation], actual: &[&'a ActualDiagnostic]) {
        let mut order: Vec<&'a Expectation> = expectations.to_vec();
        order.sort_by_key(|e| {
            (
                e.kind == ExpectationKind::FalseNegative,
                e.span.is_none(),
                e.message.is_none(),
            )
        });

        let split = order
            .iter()
            .position(|e| e.kind == ExpectationKind::FalseNegative)
            .unwrap_or(order.len());
        let (primaries, false_negatives) = order.split_at(split);

        // Maximum matching of primaries to actuals; earlier (more specific)
        // primaries keep a match once they have one.
        let mut owner: Vec<Option<usize>> = vec![None; actual.len()];
        for e in 0..primaries.len() {
            let mut visited = vec![false; actual.len()];
            self.augment(e, primaries, actual, &mut owner, &mut visited);
        }

        let mut claimed: Vec<bool> = owner.iter().map(Option::is_some).collect();
        let mut matched = vec![false; primaries.len()];
        for (i, e) in owner.iter().enumerate() {
            if let Some(e) = *e {
                matched[e] = true;
                self.comparison.matched_primary += 1;
                self.matched.push((primaries[e], actual[i]));
            }
        }
        let missing: Vec<&'a Expectation> = primaries
            .iter()
            .zip(&matched)
            .filter(|(_, &m)| !m)
            .map(|(e, _)| *e)
            .collect();

        for &expectation in false_negatives {
            let found = (0..actual.len()).find(|&i| !claimed[i] && self.accepts(expectation, actual[i]));
            let Some(i) = found else {
                continue;
            };
            claimed[i] = true;
            let finding = Mismatch {
                kind: MismatchKind::ResolvedFalseNegative,
                role: LocationRole::Primary,
                line: expectation.line,
                rule_id: Some(actual[i].rule_id.clone()),
                expected: Some(expectation.clone()),
                actual: Some(ActualLocation::from_diagnostic(actual[i])),
                nearest: None,
            };
            if self.options.strict_false_negatives {
                self.comparison.mismatches.push(finding);
            } else {
                self.comparison.notes.push(finding);
            }
        }

        for expectation in missing {
            let nearest = nearest_unclaimed(
                expectation.span,
                actual.iter().enumerate().filter(|&(i, _)| !claimed[i]).map(|(_, a)| (a.span, *a)),
            )
            .map(ActualLocation::from_diagnostic);
            self.comparison.mismatches.push(Mismatch {
                kind: MismatchKind::MissingDiagnostic,
                role: LocationRole::Primary,
                line: expectation.line,
                rule_id: None,
                expected: Some(expectation.clone()),
                actual: None,
                nearest,
            });
        }

        for (_, diagnostic) in actual.iter().enumerate().filter(|&(i, _)| !claimed[i]) {
            self.comparison.mismatches.push(Mismatch {
                kind: MismatchKind::UnexpectedDiagnostic,
                role: LocationRole::Primary,
                line: diagnostic.line,
                rule_id: Some(diagnostic.rule_id.clone()),
                expected: None,
                actual: Some(ActualLocation::from_diagnostic(diagnostic)),
                nearest: None,
            });
        }
    }

    /// Kuhn's augmenting path step: try to give `primaries[e]` an actual,
    /// re-routing earlier owners when they have an alternative.
    fn augment(
        &self,
        e: usize,
        primaries: &[&Expectation],
        actual: &[&ActualDiagnostic],
        owner: &mut [Option<usize>],
        visited: &mut [bool],
    ) -> bool {
        for i in 0..actual.len() {
            if visited[i] || !self.accepts(primaries[e], actual[i]) {
                continue;
            }
            visited[i] = true;
            let free = match owner[i] {
                None => true,
                Some(other) => self.augment(other, primaries, actual, owner, visited),
            };
            if free {
                owner[i] = Some(e);
                return true;
            }
        }
        false
    }

    fn match_secondaries(&mut self, expected: &'a ExpectationSet) {
        let matched = std::mem::take(&mut self.matched);
        for &(primary, diagnostic) in &matched {
            let declared: Vec<&Expectation> = match primary.issue_id {
                Some(ref id) => expected.secondaries_of(id).collect(),
                None => Vec::new(),
            };
            self.match_group(&declared, diagnostic);
        }

        // Secondaries of primaries that never matched cannot be satisfied.
        for primary in expected.primaries() {
            let Some(ref id) = primary.issue_id else {
                continue;
            };
            if matched.iter().any(|(p, _)| std::ptr::eq(*p, primary)) {
                continue;
            }
            for secondary in expected.secondaries_of(id) {
                self.comparison.mismatches.push(Mismatch {
                    kind: MismatchKind::MissingDiagnostic,
                    role: LocationRole::Secondary,
                    line: secondary.line,
                    rule_id: None,
                    expected: Some(secondary.clone()),
                    actual: None,
                    nearest: None,
                });
            }
        }
        self.matched = matched;
    }

    fn match_group(&mut self, declared: &[&Expectation], diagnostic: &ActualDiagnostic) {
        let locations = &diagnostic.secondary_locations;
        let mut claimed = vec![false; locations.len()];

        let mut order = declared.to_vec();
        order.sort_by_key(|e| (e.span.is_none(), e.message.is_none()));

        for secondary in order {
            let found = locations
                .iter()
                .enumerate()
                .find(|&(i, l)| !claimed[i] && self.accepts_secondary(secondary, l))
                .map(|(i, _)| i);
            if let Some(i) = found {
                claimed[i] = true;
                self.comparison.matched_secondary += 1;
                continue;
            }

            let nearest = nearest_unclaimed(
                secondary.span,
                locations
                    .iter()
                    .enumerate()
                    .filter(|&(i, l)| !claimed[i] && l.line == secondary.line)
                    .map(|(_, l)| (l.span, l)),
            )
            .map(|l| ActualLocation::from_secondary(l, &diagnostic.rule_id));
            self.comparison.mismatches.push(Mismatch {
                kind: MismatchKind::MissingDiagnostic,
                role: LocationRole::Secondary,
                line: secondary.line,
                rule_id: Some(diagnostic.rule_id.clone()),
                expected: Some(secondary.clone()),
                actual: None,
                nearest,
            });
        }

        for (_, location) in locations.iter().enumerate().filter(|&(i, _)| !claimed[i]) {
            self.comparison.mismatches.push(Mismatch {
                kind: MismatchKind::UnexpectedDiagnostic,
                role: LocationRole::Secondary,
                line: location.line,
                rule_id: Some(diagnostic.rule_id.clone()),
                expected: None,
                actual: Some(ActualLocation::from_secondary(location, &diagnostic.rule_id)),
                nearest: None,
            });
        }
    }

    fn accepts(&self, expectation: &Expectation, actual: &ActualDiagnostic) -> bool {
        self.span_ok(expectation.span, actual.span)
            && expectation
                .message
                .as_deref()
                .map_or(true, |m| self.options.message_match.matches(m, &actual.message))
    }

    fn accepts_secondary(&self, expectation: &Expectation, location: &SecondaryLocation) -> bool {
        expectation.line == location.line
            && self.span_ok(expectation.span, location.span)
            && match (expectation.message.as_deref(), location.message.as_deref()) {
                (None, _) => true,
                (Some(_), None) => false,
                (Some(expected), Some(actual)) => self.options.message_match.matches(expected, actual),
            }
    }

    /// An expected span only matches an identical actual span.
    fn span_ok(&self, expected: Option<ColumnSpan>, actual: Option<ColumnSpan>) -> bool {
        match expected {
            Some(span) if self.options.check_columns => actual == Some(span),
            _ => true,
        }
    }
}

/// The candidate whose start column is closest to `span`, or the first one.
fn nearest_unclaimed<T>(
    span: Option<ColumnSpan>,
    candidates: impl Iterator<Item = (Option<ColumnSpan>, T)>,
) -> Option<T> {
    let Some(span) = span else {
        return candidates.map(|(_, c)| c).next();
    };
    candidates
        .min_by_key(|(s, _)| s.map_or(u32::MAX, |s| s.start.abs_diff(span.start)))
        .map(|(_, c)| c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_prefers_closest_column() {
        let candidates = vec![
            (Some(ColumnSpan::new(1, 3)), "a"),
            (Some(ColumnSpan::new(9, 12)), "b"),
            (None, "c"),
        ];
        assert_eq!(
            nearest_unclaimed(Some(ColumnSpan::new(8, 9)), candidates.clone().into_iter()),
            Some("b")
        );
        assert_eq!(nearest_unclaimed(None, candidates.into_iter()), Some("a"));
    }
}
