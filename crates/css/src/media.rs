//! Media query lists, accepted only in a conservative subset of the grammar.

pub(crate) const NOT_ALL: &str = "not all";

const MEDIA_TYPES: &[&str] = &[
    "all", "aural", "braille", "embossed", "handheld", "print", "projection", "screen", "speech",
    "tty", "tv",
];

const RANGED_FEATURES: &[&str] = &[
    "aspect-ratio",
    "height",
    "width",
    "device-aspect-ratio",
    "device-height",
    "device-width",
    "color",
    "color-index",
    "monochrome",
    "orientation",
    "resolution",
];

const PLAIN_FEATURES: &[&str] = &["grid", "hover", "luminosity", "pointer", "scan", "script"];

const UNITS: &[&str] = &[
    "pc", "px", "pt", "cm", "em", "mm", "in", "dpi", "dppx", "dpcm", "%",
];

fn is_word_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// `[a-z]\w+(-\w+)*`
fn is_value_word(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || !bytes[0].is_ascii_alphabetic() || !is_word_char(bytes[1]) {
        return false;
    }
    s[1..].split('-').all(|part| !part.is_empty() && part.bytes().all(is_word_char))
}

/// `\d+ ( \.\d+ )? unit?`
fn is_value_number(s: &str) -> bool {
    let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
    if int_len == 0 {
        return false;
    }
    let mut rest = &s[int_len..];
    if let Some(fraction) = rest.strip_prefix('.') {
        let frac_len = fraction.bytes().take_while(u8::is_ascii_digit).count();
        if frac_len == 0 {
            return false;
        }
        rest = &fraction[frac_len..];
    }
    rest.is_empty() || UNITS.contains(&rest)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_media_feature(s: &str) -> bool {
    if PLAIN_FEATURES.contains(&s) {
        return true;
    }
    let ranged = s
        .strip_prefix("min-")
        .or_else(|| s.strip_prefix("max-"))
        .unwrap_or(s);
    RANGED_FEATURES.contains(&ranged)
}

struct QueryMatcher<'t> {
    tokens: &'t [String],
    pos: usize,
}

impl QueryMatcher<'_> {
    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn eat(&mut self, expected: &str) -> bool {
        let matched = self.peek() == Some(expected);
        if matched {
            self.pos += 1;
        }
        matched
    }

    /// `-? (word | digits / digits | number unit?)`
    fn value(&mut self) -> bool {
        let Some(token) = self.peek() else {
            return false;
        };
        let unsigned = token.strip_prefix('-').unwrap_or(token);
        if is_value_word(unsigned) {
            self.pos += 1;
            return true;
        }
        let ratio = is_digits(unsigned)
            && self.tokens.get(self.pos + 1).is_some_and(|t| t == "/")
            && self.tokens.get(self.pos + 2).is_some_and(|t| is_digits(t));
        if ratio {
            self.pos += 3;
            return true;
        }
        if is_value_number(unsigned) {
            self.pos += 1;
            return true;
        }
        false
    }

    /// `( feature [: value] )`; `opened` when the caller consumed `and(`.
    fn expression(&mut self, opened: bool) -> bool {
        if !opened && !self.eat("(") {
            return false;
        }
        let Some(feature) = self.peek() else {
            return false;
        };
        if !is_media_feature(feature) {
            return false;
        }
        self.pos += 1;
        if self.eat(":") && !self.value() {
            return false;
        }
        self.eat(")")
    }

    fn query(&mut self) -> bool {
        let head_ok = match self.peek() {
            Some("(") => self.expression(false),
            Some(word) => {
                if matches!(word, "only" | "not") {
                    self.pos += 1;
                }
                match self.peek() {
                    Some(kind) if MEDIA_TYPES.contains(&kind) => {
                        self.pos += 1;
                        true
                    }
                    _ => false,
                }
            }
            None => false,
        };
        if !head_ok {
            return false;
        }
        loop {
            match self.peek() {
                Some("and") => {
                    self.pos += 1;
                    if !self.expression(false) {
                        return false;
                    }
                }
                Some("and(") => {
                    self.pos += 1;
                    if !self.expression(true) {
                        return false;
                    }
                }
                _ => return true,
            }
        }
    }

    fn query_list(&mut self) -> bool {
        if !self.query() {
            return false;
        }
        while self.eat(",") {
            if !self.query() {
                return false;
            }
        }
        self.pos == self.tokens.len()
    }
}

/// Normalizes a media query list, or replaces it with `not all` when any
/// part falls outside the accepted grammar.
///
/// An empty query list stays empty. A list that does not begin with a word
/// is prefixed with `not all , ` so old parsers that ignore the unknown
/// head cannot apply the rest.
pub fn sanitize_media_query(tokens: &[String]) -> String {
    let significant: Vec<String> = tokens
        .iter()
        .filter(|t| *t != " ")
        .map(|t| t.to_ascii_lowercase())
        .collect();
    if significant.is_empty() {
        return String::new();
    }
    let mut matcher = QueryMatcher {
        tokens: &significant,
        pos: 0,
    };
    if !matcher.query_list() {
        log::debug!(target: "sanitizer.css", "rejecting media query {:?}", tokens.concat());
        return NOT_ALL.to_string();
    }
    let css = tokens
        .iter()
        .filter(|t| *t != " ")
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    if css.as_bytes().first().copied().is_some_and(is_word_char) {
        css
    } else {
        format!("{NOT_ALL} , {css}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex_css;

    fn sanitize(query: &str) -> String {
        sanitize_media_query(&lex_css(query))
    }

    #[test]
    fn accepts_types_and_feature_expressions() {
        assert_eq!(sanitize("screen"), "screen");
        assert_eq!(
            sanitize("only screen and (min-width: 100px)"),
            "only screen and ( min-width : 100px )"
        );
        assert_eq!(sanitize("print, Screen"), "print , Screen");
        assert_eq!(
            sanitize("screen and (device-aspect-ratio: 16/9)"),
            "screen and ( device-aspect-ratio : 16 / 9 )"
        );
    }

    #[test]
    fn leading_expression_is_guarded() {
        assert_eq!(sanitize("(color)"), "not all , ( color )");
    }

    #[test]
    fn empty_query_stays_empty() {
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn rejects_anything_outside_the_grammar() {
        assert_eq!(sanitize("screen and (min-width: expression(1))"), NOT_ALL);
        assert_eq!(sanitize("screen;"), NOT_ALL);
        assert_eq!(sanitize("screen and"), NOT_ALL);
        assert_eq!(sanitize("(width: 1e3px)"), NOT_ALL);
        assert_eq!(sanitize("hologram"), NOT_ALL);
        assert_eq!(sanitize("screen and (evil: 1)"), NOT_ALL);
    }
}
