//! CSS tokenizer producing normalized token strings.
//!
//! Every token class is scanned by hand; at each position the classes are
//! tried in a fixed order and the first that matches wins. Characters that
//! start no token at all (a lone quote, a `/*` that never closes, a stray
//! backslash) are skipped.
//!
//! Output tokens are normalized so later stages can compare strings:
//! escapes are decoded, strings are re-quoted with `"` and never contain a
//! raw `"`, `url(...)` becomes `url("...")` with a percent-escaped body,
//! and comments, `<!--`, `-->`, BOMs and whitespace runs collapse into a
//! single `" "`. Leading whitespace is dropped.

use std::fmt::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Url,
    Str,
    Ignorable,
    Other,
}

fn char_at(s: &str, i: usize) -> Option<char> {
    s.get(i..).and_then(|rest| rest.chars().next())
}

fn is_css_space(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0c' | ' ')
}

fn is_non_ascii(c: char) -> bool {
    c >= '\u{80}' && c != '\u{fffe}' && c != '\u{ffff}'
}

fn is_escapable(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{7e}') || is_non_ascii(c)
}

fn starts_with_ignore_case(s: &str, i: usize, prefix: &str) -> bool {
    s.as_bytes()
        .get(i..i + prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

/// End of a backslash escape starting at `i`: up to six hex digits plus one
/// optional whitespace, or any other printable character.
fn escape_end(s: &str, i: usize) -> Option<usize> {
    let body = i + 1;
    let first = char_at(s, body)?;
    if first.is_ascii_hexdigit() {
        let digits = s[body..]
            .bytes()
            .take(6)
            .take_while(u8::is_ascii_hexdigit)
            .count();
        let end = body + digits;
        return Some(match char_at(s, end) {
            Some(c) if is_css_space(c) => end + 1,
            _ => end,
        });
    }
    is_escapable(first).then(|| body + first.len_utf8())
}

fn name_start_end(s: &str, i: usize) -> Option<usize> {
    match char_at(s, i)? {
        c if c.is_ascii_alphabetic() || c == '_' => Some(i + 1),
        c if is_non_ascii(c) => Some(i + c.len_utf8()),
        '\\' => escape_end(s, i),
        _ => None,
    }
}

fn name_char_end(s: &str, i: usize) -> Option<usize> {
    match char_at(s, i)? {
        c if c.is_ascii_alphanumeric() || c == '_' || c == '-' => Some(i + 1),
        _ => name_start_end(s, i),
    }
}

fn name_chars(s: &str, mut i: usize) -> usize {
    while let Some(end) = name_char_end(s, i) {
        i = end;
    }
    i
}

/// `-? nmstart nmchar*`
fn ident_end(s: &str, i: usize) -> Option<usize> {
    let start = if char_at(s, i) == Some('-') { i + 1 } else { i };
    name_start_end(s, start).map(|end| name_chars(s, end))
}

fn whitespace_end(s: &str, i: usize) -> usize {
    s[i..]
        .find(|c: char| !is_css_space(c))
        .map_or(s.len(), |rel| i + rel)
}

/// A `"..."` or `'...'` string; unescaped newlines end it unsuccessfully.
fn string_end(s: &str, i: usize) -> Option<usize> {
    let quote = char_at(s, i)?;
    let mut j = i + 1;
    loop {
        match char_at(s, j)? {
            c if c == quote => return Some(j + 1),
            '\n' | '\x0c' => return None,
            '\\' => {
                let escaped = char_at(s, j + 1)?;
                j += 1 + escaped.len_utf8();
            }
            c => j += c.len_utf8(),
        }
    }
}

fn url_char_end(s: &str, i: usize) -> Option<usize> {
    match char_at(s, i)? {
        '\t' | '!' | '#'..='&' | '('..='[' | ']'..='~' => Some(i + 1),
        c if is_non_ascii(c) => Some(i + c.len_utf8()),
        '\\' => escape_end(s, i),
        _ => None,
    }
}

fn unicode_range_end(s: &str, i: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    if !matches!(bytes.get(i), Some(b'u' | b'U')) || bytes.get(i + 1) != Some(&b'+') {
        return None;
    }
    let start = i + 2;
    let len = bytes[start..]
        .iter()
        .take(6)
        .take_while(|b| b.is_ascii_hexdigit() || **b == b'?')
        .count();
    if len == 0 {
        return None;
    }
    let end = start + len;
    if bytes.get(end) == Some(&b'-') {
        let tail = bytes[end + 1..]
            .iter()
            .take(6)
            .take_while(|b| b.is_ascii_hexdigit())
            .count();
        if tail > 0 {
            return Some(end + 1 + tail);
        }
    }
    Some(end)
}

fn numeric_end(s: &str, i: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let digits_from = |j: usize| bytes[j..].iter().take_while(|b| b.is_ascii_digit()).count();
    let mut j = i;
    if matches!(bytes.get(j), Some(b'+' | b'-')) {
        j += 1;
    }
    let int_len = digits_from(j);
    if int_len > 0 {
        j += int_len;
        if bytes.get(j) == Some(&b'.') && digits_from(j + 1) > 0 {
            j += 1 + digits_from(j + 1);
        }
    } else if bytes.get(j) == Some(&b'.') && digits_from(j + 1) > 0 {
        j += 1 + digits_from(j + 1);
    } else {
        return None;
    }
    if bytes.get(j) == Some(&b'%') {
        return Some(j + 1);
    }
    Some(ident_end(s, j).unwrap_or(j))
}

struct Lexer<'s> {
    src: &'s str,
    /// Scans for `*/` and for a `url(` close paren that already failed from
    /// an earlier position; later scans that start before these offsets
    /// would fail the same way.
    unclosed_comment_from: Option<usize>,
    unclosed_url_before: usize,
}

impl<'s> Lexer<'s> {
    fn new(src: &'s str) -> Self {
        Self {
            src,
            unclosed_comment_from: None,
            unclosed_url_before: 0,
        }
    }

    fn url_end(&mut self, i: usize) -> Option<usize> {
        let s = self.src;
        if !starts_with_ignore_case(s, i, "url(") || i < self.unclosed_url_before {
            return None;
        }
        let body = whitespace_end(s, i + 4);
        if matches!(char_at(s, body), Some('"' | '\'')) {
            let after = whitespace_end(s, string_end(s, body)?);
            return (char_at(s, after) == Some(')')).then_some(after + 1);
        }

        let mut boundaries = vec![body];
        let mut end = body;
        while let Some(next) = url_char_end(s, end) {
            end = next;
            boundaries.push(end);
        }
        let after = whitespace_end(s, end);
        if char_at(s, after) == Some(')') {
            return Some(after + 1);
        }
        // The run itself may contain the closing paren.
        let closed_inside = boundaries
            .iter()
            .rev()
            .find(|&&b| b < end && s.as_bytes()[b] == b')');
        match closed_inside {
            Some(&b) => Some(b + 1),
            None => {
                self.unclosed_url_before = end;
                None
            }
        }
    }

    fn comment_end(&mut self, i: usize) -> Option<usize> {
        let bytes = self.src.as_bytes();
        match bytes.get(i + 1) {
            Some(b'*') => {
                if self.unclosed_comment_from.is_some_and(|from| i + 2 >= from) {
                    return None;
                }
                match memchr::memmem::find(&bytes[i + 2..], b"*/") {
                    Some(rel) => Some(i + 2 + rel + 2),
                    None => {
                        self.unclosed_comment_from = Some(i + 2);
                        None
                    }
                }
            }
            Some(b'/') => Some(
                memchr::memchr2(b'\n', b'\x0c', &bytes[i..]).map_or(bytes.len(), |rel| i + rel),
            ),
            _ => None,
        }
    }

    /// Scans one token at `i`, trying each token class in priority order.
    fn token_end(&mut self, i: usize) -> Option<(usize, Kind)> {
        let s = self.src;
        let c = char_at(s, i)?;
        if c == '\u{feff}' {
            return Some((i + c.len_utf8(), Kind::Ignorable));
        }
        if let Some(end) = unicode_range_end(s, i) {
            return Some((end, Kind::Other));
        }
        if let Some(end) = self.url_end(i) {
            return Some((end, Kind::Url));
        }
        if !starts_with_ignore_case(s, i, "url(") {
            if let Some(end) = ident_end(s, i).filter(|&end| char_at(s, end) == Some('(')) {
                return Some((end + 1, Kind::Other));
            }
        }
        if c == '#' {
            return Some((name_chars(s, i + 1), Kind::Other));
        }
        let word_from = if c == '@' { i + 1 } else { i };
        if let Some(end) = ident_end(s, word_from) {
            return Some((end, Kind::Other));
        }
        if c == '"' || c == '\'' {
            if let Some(end) = string_end(s, i) {
                return Some((end, Kind::Str));
            }
        }
        if let Some(end) = numeric_end(s, i) {
            return Some((end, Kind::Other));
        }
        if s[i..].starts_with("<!--") {
            return Some((i + 4, Kind::Ignorable));
        }
        if s[i..].starts_with("-->") {
            return Some((i + 3, Kind::Ignorable));
        }
        if is_css_space(c) {
            return Some((whitespace_end(s, i), Kind::Ignorable));
        }
        if c == '/' {
            if let Some(end) = self.comment_end(i) {
                return Some((end, Kind::Ignorable));
            }
        }
        if matches!(c, '~' | '|' | '^' | '$' | '*') && s[i + 1..].starts_with('=') {
            return Some((i + 2, Kind::Other));
        }
        match c {
            '"' | '\'' | '\\' => None,
            '/' => match char_at(s, i + 1) {
                Some('/' | '*') => None,
                _ => Some((i + 1, Kind::Other)),
            },
            _ => Some((i + c.len_utf8(), Kind::Other)),
        }
    }
}

/// Decodes CSS backslash escapes. Escaped newlines vanish; code points that
/// cannot be represented become U+FFFD.
pub fn decode_css(s: &str) -> String {
    let Some(first) = s.find('\\') else {
        return s.to_string();
    };
    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut i = first;
    while i < s.len() {
        let Some(c) = char_at(s, i) else { break };
        if c != '\\' {
            out.push(c);
            i += c.len_utf8();
            continue;
        }
        match char_at(s, i + 1) {
            Some('\n' | '\x0c') => i += 2,
            Some(h) if h.is_ascii_hexdigit() => {
                let end = escape_end(s, i).unwrap_or(i + 2);
                let hex: String = s[i + 1..end].chars().take_while(char::is_ascii_hexdigit).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or('\u{fffd}');
                out.push(decoded);
                i = end;
            }
            Some(e) if is_escapable(e) => {
                out.push(e);
                i += 1 + e.len_utf8();
            }
            _ => {
                out.push('\\');
                i += 1;
            }
        }
    }
    out
}

fn push_hex_escape(out: &mut String, c: char) {
    let _ = write!(out, "\\{:x} ", c as u32);
}

/// Quotes `body` as a CSS string, escaping controls, quotes, backslashes
/// and angle brackets.
pub fn escape_css_string(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 2);
    out.push('"');
    for c in body.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\0'..='\x1f' | '"' | '<' | '>' => push_hex_escape(&mut out, c),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn escape_url_body(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 2);
    out.push('"');
    for c in body.chars() {
        match c {
            '\0'..='\x1f' | '"' | '<' | '>' | '\\' => {
                let _ = write!(out, "%{:02x}", c as u32);
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `url(  "x"  )` → `x`, without the quotes or surrounding whitespace.
fn url_body(token: &str) -> &str {
    let mut body = &token[4..];
    body = body.trim_start_matches(is_css_space);
    body = body.strip_prefix(['"', '\'']).unwrap_or(body);
    body = body.strip_suffix(')').unwrap_or(body);
    body = body.trim_end_matches(is_css_space);
    body.strip_suffix(['"', '\'']).unwrap_or(body)
}

fn normalize(raw: &str, kind: Kind) -> String {
    if kind == Kind::Ignorable {
        return " ".to_string();
    }
    let decoded = decode_css(raw);
    let first = decoded.chars().next();
    match (kind, first) {
        (_, Some('"' | '\'')) => {
            let chars: Vec<char> = decoded.chars().collect();
            let body: String = if chars.len() >= 2 {
                chars[1..chars.len() - 1].iter().collect()
            } else {
                decoded.clone()
            };
            escape_css_string(&body)
        }
        (_, None) => " ".to_string(),
        (_, Some(c)) if c <= ' ' => " ".to_string(),
        (Kind::Url, _) => format!("url({})", escape_url_body(url_body(&decoded))),
        _ => decoded,
    }
}

/// Splits CSS text into normalized tokens.
pub fn lex_css(css: &str) -> Vec<String> {
    let text = if css.contains('\r') {
        css.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        css.to_string()
    };

    let mut lexer = Lexer::new(&text);
    let mut tokens: Vec<String> = Vec::new();
    let mut last_was_space = true;
    let mut i = 0;
    while let Some(c) = char_at(&text, i) {
        let Some((end, kind)) = lexer.token_end(i) else {
            i += c.len_utf8();
            continue;
        };
        let token = normalize(&text[i..end], kind);
        i = end;
        let is_space = token == " ";
        if !(is_space && last_was_space) {
            tokens.push(token);
        }
        last_was_space = is_space;
    }
    tokens
}
