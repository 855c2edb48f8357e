//! Marker and caret-line parsing.
//!
//! Marker comment:  `// Noncompliant@-1 ^5#3 [a, b] {{message}}`
//! Caret line:      `//     ^^^^ Secondary [a] {{message}}`
//!
//! Every part after the keyword is optional; free text after the recognised
//! parts is ignored.

use std::sync::LazyLock;

use regex::Regex;
use smallvec::SmallVec;

use fixmark_core::errors::MalformedExpectation;

use super::types::{ColumnSpan, ExpectationKind};

/// A comment opener immediately followed by an annotation keyword.
static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(//|/\*)\s*(Noncompliant|Secondary|FN|Fixed)\b").expect("valid marker regex")
});

/// A line holding nothing but a `//` comment that starts with carets.
pub(crate) static CARET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*//\s*(\^+)").expect("valid caret regex"));

const KEYWORDS: [&str; 4] = ["Noncompliant", "Secondary", "FN", "Fixed"];

/// Everything that may follow a keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Tail {
    pub offset: i64,
    pub span: Option<ColumnSpan>,
    pub issue_ids: SmallVec<[String; 1]>,
    pub message: Option<String>,
}

/// A marker comment found on an ordinary source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Marker {
    pub kind: ExpectationKind,
    pub tail: Tail,
}

/// A caret underline line; `kind` is `None` for a bare `// ^^^`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CaretLine {
    pub span: ColumnSpan,
    pub kind: Option<ExpectationKind>,
    pub tail: Tail,
}

/// Classification of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AnnotatedLine {
    Plain,
    Marker(Marker),
    Caret(CaretLine),
}

/// Classify one line. `line` is the 1-based line number used in errors.
pub(crate) fn parse_line(text: &str, line: u32) -> Result<AnnotatedLine, MalformedExpectation> {
    if let Some(caps) = CARET_RE.captures(text) {
        let carets = caps.get(1).expect("caret group always participates");
        let index = text[..carets.start()].chars().count();
        let span = ColumnSpan::from_caret(index, carets.as_str().len());
        let rest = text[carets.end()..].trim_start();

        let (kind, tail_text) = match split_keyword(rest) {
            Some((kind, after)) => (Some(kind), after),
            None => (None, rest),
        };
        let tail = parse_tail(tail_text, line)?;
        return Ok(AnnotatedLine::Caret(CaretLine { span, kind, tail }));
    }

    if let Some(caps) = find_marker(text) {
        let keyword = caps.get(2).expect("keyword group always participates");
        let Some(kind) = ExpectationKind::from_keyword(keyword.as_str()) else {
            return Ok(AnnotatedLine::Plain);
        };
        let tail = parse_tail(&text[keyword.end()..], line)?;
        return Ok(AnnotatedLine::Marker(Marker { kind, tail }));
    }

    Ok(AnnotatedLine::Plain)
}

/// The first marker match on `text` that is not inside a string or char literal.
pub(crate) fn find_marker(text: &str) -> Option<regex::Captures<'_>> {
    MARKER_RE
        .captures_iter(text)
        .find(|caps| caps.get(0).is_some_and(|m| !in_literal(text, m.start())))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Code,
    Str,
    Verbatim,
    Char,
}

/// Whether byte offset `pos` of a C# line falls inside a string or char literal.
/// Comments opened before `pos` end the scan: nothing after them is code.
fn in_literal(text: &str, pos: usize) -> bool {
    let bytes = text.as_bytes();
    let mut state = Lexeme::Code;
    let mut i = 0;
    while i < pos {
        let next = bytes.get(i + 1).copied();
        match (state, bytes[i]) {
            (Lexeme::Code, b'/') if next == Some(b'/') => return false,
            (Lexeme::Code, b'/') if next == Some(b'*') => {
                match text[i + 2..].find("*/") {
                    Some(close) if i + 2 + close + 2 <= pos => i += 2 + close + 1,
                    _ => return false,
                }
            }
            (Lexeme::Code, b'@') if next == Some(b'"') => {
                state = Lexeme::Verbatim;
                i += 1;
            }
            (Lexeme::Code, b'"') => state = Lexeme::Str,
            (Lexeme::Code, b'\'') => state = Lexeme::Char,
            (Lexeme::Str | Lexeme::Char, b'\\') => i += 1,
            (Lexeme::Str, b'"') | (Lexeme::Char, b'\'') => state = Lexeme::Code,
            (Lexeme::Verbatim, b'"') if next == Some(b'"') => i += 1,
            (Lexeme::Verbatim, b'"') => state = Lexeme::Code,
            _ => {}
        }
        i += 1;
    }
    state != Lexeme::Code
}

/// Split a leading annotation keyword off `text`, honouring word boundaries.
fn split_keyword(text: &str) -> Option<(ExpectationKind, &str)> {
    KEYWORDS.iter().find_map(|kw| {
        let after = text.strip_prefix(kw)?;
        let boundary = after
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'));
        if !boundary {
            return None;
        }
        ExpectationKind::from_keyword(kw).map(|kind| (kind, after))
    })
}

/// Parse `@offset`, `^C#L`, `[ids]` and `{{message}}` in that order.
/// `[ids]` and `{{message}}` may be swapped.
pub(crate) fn parse_tail(text: &str, line: u32) -> Result<Tail, MalformedExpectation> {
    let mut tail = Tail::default();
    let mut rest = text;

    if let Some(after) = rest.strip_prefix('@') {
        let token_len = after
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '+' || c == '-'))))
            .map_or(after.len(), |(i, _)| i);
        let token = &after[..token_len];
        tail.offset = token
            .parse::<i64>()
            .map_err(|_| MalformedExpectation::InvalidOffset {
                line,
                text: format!("@{}", first_word(after)),
            })?;
        rest = &after[token_len..];
    }

    rest = rest.trim_start();
    if let Some(after) = rest.strip_prefix('^') {
        let token = first_word(after);
        tail.span = Some(parse_column_shorthand(token).ok_or_else(|| {
            MalformedExpectation::InvalidColumn {
                line,
                text: format!("^{token}"),
            }
        })?);
        rest = &after[token.len()..];
    }

    let mut seen_ids = false;
    let mut seen_message = false;
    loop {
        rest = rest.trim_start();
        if !seen_ids && rest.starts_with('[') {
            let close = rest.find(']').ok_or(MalformedExpectation::Unterminated {
                line,
                what: "issue id list",
            })?;
            tail.issue_ids = rest[1..close]
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();
            if tail.issue_ids.is_empty() {
                return Err(MalformedExpectation::EmptyIssueId { line });
            }
            rest = &rest[close + 1..];
            seen_ids = true;
        } else if !seen_message && rest.starts_with("{{") {
            let body = &rest[2..];
            let close = body.find("}}").ok_or(MalformedExpectation::Unterminated {
                line,
                what: "message",
            })?;
            tail.message = Some(body[..close].to_string());
            rest = &body[close + 2..];
            seen_message = true;
        } else {
            break;
        }
    }

    Ok(tail)
}

/// `C#L` → span starting at 1-based column `C` covering `L` characters.
fn parse_column_shorthand(token: &str) -> Option<ColumnSpan> {
    let (column, length) = token.split_once('#')?;
    let column: u32 = column.parse().ok()?;
    let length: u32 = length.parse().ok()?;
    if column == 0 || length == 0 {
        return None;
    }
    Some(ColumnSpan::new(column, column + length))
}

fn first_word(text: &str) -> &str {
    text.split(char::is_whitespace).next().unwrap_or("")
}
