//! Annotation removal.

use super::marker::{find_marker, CARET_RE};

/// Remove annotation comments from `source`, keeping every line in place.
///
/// Caret lines become empty lines; a `//` marker comment is cut to the end of
/// its line; a `/* marker */` block is cut out and the code after it kept.
/// Line endings are preserved, so line numbers stay valid for the engine.
pub fn strip_annotations(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for raw in source.split_inclusive('\n') {
        let (text, ending) = split_ending(raw);
        out.push_str(&strip_line(text));
        out.push_str(ending);
    }
    out
}

fn split_ending(raw: &str) -> (&str, &str) {
    if let Some(text) = raw.strip_suffix("\r\n") {
        (text, "\r\n")
    } else if let Some(text) = raw.strip_suffix('\n') {
        (text, "\n")
    } else {
        (raw, "")
    }
}

fn strip_line(text: &str) -> String {
    if CARET_RE.is_match(text) {
        return String::new();
    }
    let mut line = text.to_string();
    // A line may hold several block-comment markers.
    loop {
        let Some(start) = marker_start(&line) else {
            break;
        };
        if line[start..].starts_with("/*") {
            match line[start..].find("*/") {
                Some(close) => {
                    let end = start + close + 2;
                    let kept_before = line[..start].trim_end();
                    let kept_after = &line[end..];
                    line = if kept_after.starts_with(char::is_whitespace) || kept_before.is_empty() {
                        format!("{kept_before}{kept_after}")
                    } else {
                        format!("{kept_before} {kept_after}")
                    };
                }
                None => {
                    line.truncate(start);
                    break;
                }
            }
        } else {
            line.truncate(start);
            break;
        }
    }
    line.truncate(line.trim_end().len());
    line
}

fn marker_start(line: &str) -> Option<usize> {
    find_marker(line).and_then(|caps| caps.get(0)).map(|m| m.start())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_trailing_marker() {
        assert_eq!(
            strip_annotations("target =- num; // Noncompliant {{Was '-=' meant instead?}}\n"),
            "target =- num;\n"
        );
    }

    #[test]
    fn test_strip_keeps_line_count() {
        let source = "a(); // Noncompliant\r\n//  ^^\r\nb(); // regular comment\r\nc();";
        let stripped = strip_annotations(source);
        assert_eq!(stripped, "a();\r\n\r\nb(); // regular comment\r\nc();");
        assert_eq!(stripped.lines().count(), source.lines().count());
    }

    #[test]
    fn test_strip_keeps_string_literals() {
        assert_eq!(
            strip_annotations("var s = \"// FN\"; // Noncompliant\n"),
            "var s = \"// FN\";\n"
        );
        assert_eq!(strip_annotations("var s = \"// FN\";"), "var s = \"// FN\";");
    }

    #[test]
    fn test_strip_block_marker() {
        assert_eq!(
            strip_annotations("Call(/* Noncompliant */ x);"),
            "Call( x);"
        );
    }
}
