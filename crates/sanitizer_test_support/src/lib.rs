use std::fmt::Write;

pub mod cases;

/// Escapes control characters and quotes so fixture text prints on one line.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' || ch == '\u{7f}' => {
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Breaks serialized markup or CSS after every `>`, `}` and `;` so a long
/// single-line output diffs usefully with [`diff_lines`].
pub fn markup_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        if matches!(ch, '>' | '}' | ';') {
            lines.push(escape_text(&text[start..=i]));
            start = i + 1;
        }
    }
    if start < text.len() {
        lines.push(escape_text(&text[start..]));
    }
    lines
}

/// Renders the first mismatch between two line lists with a little context.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    const MISSING: &str = "<missing>";
    let line = |lines: &[String], i: usize| lines.get(i).map_or(MISSING, |s| s.as_str()).to_string();

    let total = expected.len().max(actual.len());
    let mut out = String::new();
    match (0..total).find(|&i| line(expected, i) != line(actual, i)) {
        Some(i) => {
            let from = i.saturating_sub(2);
            let to = (i + 3).min(total);
            let _ = writeln!(&mut out, "first mismatch at line {} (showing {}..={to}):", i + 1, from + 1);
            for n in from..to {
                let marker = if n == i { ">" } else { " " };
                let _ = writeln!(&mut out, "{marker} {:>4}  expected: {}", n + 1, line(expected, n));
                let _ = writeln!(&mut out, "{marker} {:>4}    actual: {}", n + 1, line(actual, n));
            }
        }
        None if expected.len() != actual.len() => {
            let _ = writeln!(&mut out, "prefix matched but lengths differ");
        }
        None => {}
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

/// Panics with a line diff when `actual` differs from `expected`.
pub fn assert_output_eq(case_id: &str, input: &str, expected: &str, actual: &str) {
    if expected == actual {
        return;
    }
    let diff = diff_lines(&markup_lines(expected), &markup_lines(actual));
    panic!(
        "case {case_id} failed\ninput: \"{}\"\n{diff}",
        escape_text(input)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_controls() {
        assert_eq!(escape_text("a\"b\n\u{1}"), "a\\\"b\\n\\u{01}");
    }

    #[test]
    fn splits_markup_at_boundaries() {
        assert_eq!(markup_lines("<b>x</b>tail"), vec!["<b>", "x</b>", "tail"]);
        assert_eq!(markup_lines("p{a:b;}"), vec!["p{a:b;", "}"]);
    }

    #[test]
    fn reports_first_mismatch() {
        let expected = vec!["a".to_string(), "b".to_string()];
        let actual = vec!["a".to_string(), "c".to_string()];
        let diff = diff_lines(&expected, &actual);
        assert!(diff.contains("first mismatch at line 2"), "{diff}");
        assert!(diff_lines(&expected, &expected).starts_with("expected 2 lines"));
    }
}
