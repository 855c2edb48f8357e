//! Lazy expectation extraction.
//!
//! [`Extractor::iter`] walks the source once per call and yields expectations as
//! the scan passes their target lines. An expectation stays open until a
//! non-caret line past its target is read, so caret underlines below the target
//! can still attach spans, including to `@+N` expectations declared above it.

use std::collections::VecDeque;
use std::iter::Enumerate;
use std::str::Lines;

use smallvec::SmallVec;

use fixmark_core::errors::MalformedExpectation;

use super::marker::{self, AnnotatedLine, CaretLine, Tail};
use super::types::{ColumnSpan, Expectation, ExpectationKind};

/// Extracts expectations from annotated source text.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'a> {
    source: &'a str,
    last_line: u32,
}

impl<'a> Extractor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            last_line: source.lines().count() as u32,
        }
    }

    /// A fresh pass over the source. May be called any number of times.
    pub fn iter(&self) -> Expectations<'a> {
        Expectations {
            lines: self.source.lines().enumerate(),
            last_line: self.last_line,
            anchor: None,
            open: Vec::new(),
            ready: VecDeque::new(),
            error: None,
            done: false,
        }
    }
}

impl<'a> IntoIterator for &Extractor<'a> {
    type Item = Result<Expectation, MalformedExpectation>;
    type IntoIter = Expectations<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the expectations of one source text.
///
/// Yields `Err` at most once; the sequence ends right after it.
#[derive(Debug, Clone)]
pub struct Expectations<'a> {
    lines: Enumerate<Lines<'a>>,
    last_line: u32,
    /// Nearest preceding non-caret line.
    anchor: Option<u32>,
    /// Expectations whose target line is the anchor or later.
    open: Vec<Expectation>,
    ready: VecDeque<Expectation>,
    error: Option<MalformedExpectation>,
    done: bool,
}

impl Iterator for Expectations<'_> {
    type Item = Result<Expectation, MalformedExpectation>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(expectation) = self.ready.pop_front() {
                return Some(Ok(expectation));
            }
            if let Some(error) = self.error.take() {
                self.done = true;
                return Some(Err(error));
            }
            if self.done {
                return None;
            }

            let Some((index, text)) = self.lines.next() else {
                self.ready.extend(self.open.drain(..));
                self.done = true;
                continue;
            };
            let line = index as u32 + 1;

            if let Err(error) = self.consume(text, line) {
                self.open.clear();
                self.error = Some(error);
            }
        }
    }
}

impl Expectations<'_> {
    fn consume(&mut self, text: &str, line: u32) -> Result<(), MalformedExpectation> {
        match marker::parse_line(text, line)? {
            AnnotatedLine::Caret(caret) => self.attach_caret(caret, line),
            parsed => {
                self.release_before(line);
                self.anchor = Some(line);
                if let AnnotatedLine::Marker(m) = parsed {
                    let target = self.target_line(line, m.tail.offset, line)?;
                    let created = expand(m.kind, m.tail, None, target, line);
                    self.open.extend(created);
                }
                Ok(())
            }
        }
    }

    /// Move expectations targeting lines before `line` to the ready queue.
    fn release_before(&mut self, line: u32) {
        let (done, open): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.open).into_iter().partition(|e| e.line < line);
        self.ready.extend(done);
        self.open = open;
    }

    fn attach_caret(&mut self, caret: CaretLine, line: u32) -> Result<(), MalformedExpectation> {
        let anchor = self
            .anchor
            .ok_or(MalformedExpectation::DanglingCaret { line })?;
        let target = self.target_line(anchor, caret.tail.offset, line)?;

        if let Some(kind) = caret.kind {
            let created = expand(kind, caret.tail, Some(caret.span), target, line);
            self.open.extend(created);
            return Ok(());
        }

        // A bare caret underlines the first span-less Primary/FN on the target
        // line, together with its siblings from the same `[a, b]` annotation.
        let wanted = |e: &Expectation| {
            e.line == target
                && e.span.is_none()
                && matches!(e.kind, ExpectationKind::Primary | ExpectationKind::FalseNegative)
                && (caret.tail.issue_ids.is_empty()
                    || e.issue_id
                        .as_ref()
                        .is_some_and(|id| caret.tail.issue_ids.contains(id)))
        };
        let declared_on = self
            .open
            .iter()
            .find(|e| wanted(*e))
            .map(|e| e.annotation_line)
            .ok_or(MalformedExpectation::DanglingCaret { line })?;

        for expectation in self
            .open
            .iter_mut()
            .filter(|e| e.annotation_line == declared_on)
        {
            if !wanted(&*expectation) {
                continue;
            }
            expectation.span = Some(caret.span);
            if let Some(ref message) = caret.tail.message {
                match expectation.message {
                    None => expectation.message = Some(message.clone()),
                    Some(ref existing) if existing == message => {}
                    Some(_) => {
                        return Err(MalformedExpectation::ConflictingMessage {
                            line,
                            primary_line: declared_on,
                        })
                    }
                }
            }
        }
        Ok(())
    }

    fn target_line(&self, base: u32, offset: i64, line: u32) -> Result<u32, MalformedExpectation> {
        let target = i64::from(base) + offset;
        if target < 1 || target > i64::from(self.last_line) {
            return Err(MalformedExpectation::TargetOutOfRange {
                line,
                target,
                last: self.last_line,
            });
        }
        Ok(target as u32)
    }
}

/// One expectation per issue id, or a single unnamed one.
fn expand(
    kind: ExpectationKind,
    tail: Tail,
    caret_span: Option<ColumnSpan>,
    target: u32,
    annotation_line: u32,
) -> SmallVec<[Expectation; 1]> {
    let span = caret_span.or(tail.span);
    let make = |issue_id: Option<String>| Expectation {
        line: target,
        span,
        message: tail.message.clone(),
        issue_id,
        kind,
        annotation_line,
    };
    if tail.issue_ids.is_empty() {
        smallvec::smallvec![make(None)]
    } else {
        tail.issue_ids.iter().cloned().map(|id| make(Some(id))).collect()
    }
}
