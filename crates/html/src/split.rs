//! Splits markup into alternating literal runs and delimiter tokens.

/// Splits `html` on `</`, `<!--`, `<!`, `<?`, `<`, `>` and `&`.
///
/// The result always alternates `text, delimiter, text, ...` and starts and
/// ends with a (possibly empty) text run, so `parts[i + 1]` of a delimiter
/// is the literal that follows it.
pub fn split_html(html: &str) -> Vec<&str> {
    let bytes = html.as_bytes();
    let mut parts = Vec::new();
    let mut last = 0;
    let mut i = 0;

    while let Some(rel) = memchr::memchr3(b'<', b'>', b'&', &bytes[i..]) {
        let at = i + rel;
        let len = match bytes[at] {
            b'<' => match bytes.get(at + 1) {
                Some(b'/') => 2,
                Some(b'!') if bytes[at + 2..].starts_with(b"--") => 4,
                Some(b'!' | b'?') => 2,
                _ => 1,
            },
            _ => 1,
        };
        parts.push(&html[last..at]);
        parts.push(&html[at..at + len]);
        last = at + len;
        i = last;
    }

    parts.push(&html[last..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternates_text_and_delimiters() {
        assert_eq!(split_html(""), vec![""]);
        assert_eq!(split_html("plain"), vec!["plain"]);
        assert_eq!(
            split_html("<b>x</b>"),
            vec!["", "<", "b", ">", "x", "</", "b", ">", ""]
        );
    }

    #[test]
    fn recognizes_every_delimiter() {
        assert_eq!(
            split_html("a<!--c-->&amp;<!d><?p>"),
            vec!["a", "<!--", "c--", ">", "", "&", "amp;", "<!", "d", ">", "", "<?", "p", ">", ""]
        );
        assert_eq!(split_html("<!-x"), vec!["", "<!", "-x"]);
        assert_eq!(split_html("<"), vec!["", "<", ""]);
    }

    #[test]
    fn keeps_multibyte_text_intact() {
        assert_eq!(split_html("π<σ>"), vec!["π", "<", "σ", ">", ""]);
    }
}
