//! Character reference decoding and output escaping.

/// Named references the sanitizer understands. Anything else is left as
/// written.
const NAMED: &[(&str, char)] = &[
    ("lt", '<'),
    ("LT", '<'),
    ("gt", '>'),
    ("GT", '>'),
    ("amp", '&'),
    ("AMP", '&'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

#[inline]
fn is_word_byte(b: &u8) -> bool {
    b.is_ascii_alphanumeric() || *b == b'_'
}

/// Length of the reference body after `&` (`#123`, `#x1F`, `name`) when it
/// is terminated by `;`. Does not validate the code point.
pub(crate) fn reference_len(bytes: &[u8]) -> Option<usize> {
    let (start, accept) = match bytes {
        [b'#', b'x' | b'X', ..] => (2, u8::is_ascii_hexdigit as fn(&u8) -> bool),
        [b'#', ..] => (1, u8::is_ascii_digit as fn(&u8) -> bool),
        _ => (0, is_word_byte as fn(&u8) -> bool),
    };
    let digits = bytes[start..].iter().take_while(|b| accept(b)).count();
    let end = start + digits;
    (digits > 0 && bytes.get(end) == Some(&b';')).then_some(end)
}

/// Decodes one reference body (without `&` and `;`).
fn decode_reference(body: &str) -> Option<char> {
    if let Some(num) = body.strip_prefix('#') {
        let (digits, radix, max) = match num.strip_prefix(['x', 'X']) {
            Some(hex) => (hex, 16, MAX_HEX_DIGITS),
            None => (num, 10, MAX_DEC_DIGITS),
        };
        if digits.len() > max {
            return None;
        }
        return u32::from_str_radix(digits, radix)
            .ok()
            .filter(|&cp| cp != 0)
            .and_then(char::from_u32);
    }
    NAMED
        .iter()
        .find(|(name, _)| *name == body)
        .map(|&(_, ch)| ch)
}

/// Decodes `&name;`, `&#123;` and `&#x1F;` references.
///
/// Unknown names, missing semicolons, NUL, surrogates and out-of-range code
/// points are left unchanged.
pub fn unescape_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let Some(first) = memchr::memchr(b'&', bytes) else {
        return s.to_string();
    };
    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut i = first;
    let mut copy_start = first;

    while let Some(rel) = memchr::memchr(b'&', &bytes[i..]) {
        let amp = i + rel;
        let body_start = amp + 1;
        i = body_start;
        let Some(len) = reference_len(&bytes[body_start..]) else {
            continue;
        };
        let Some(ch) = decode_reference(&s[body_start..body_start + len]) else {
            continue;
        };
        out.push_str(&s[copy_start..amp]);
        out.push(ch);
        i = body_start + len + 1;
        copy_start = i;
    }

    out.push_str(&s[copy_start..]);
    out
}

/// Removes NUL characters.
pub fn strip_nuls(s: &str) -> String {
    if s.contains('\0') {
        s.replace('\0', "")
    } else {
        s.to_string()
    }
}

/// Escapes text for a double-quoted attribute value.
pub fn escape_attrib(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(ch),
        }
    }
    out
}

/// An `&` that cannot begin a character reference: followed by a non-letter,
/// by `#` plus a non-digit, or by `#x` plus a non-hex digit.
fn is_loose_amp(rest: &[u8]) -> bool {
    match rest {
        [] => true,
        [b'#'] => true,
        [b'#', b'x' | b'X'] => true,
        [b'#', b'x' | b'X', next, ..] => !next.is_ascii_hexdigit(),
        [b'#', next, ..] => !next.is_ascii_digit(),
        [next, ..] => !next.is_ascii_alphabetic(),
    }
}

/// Escapes `<`, `>` and loose ampersands while keeping existing references,
/// so escapable raw text can be emitted without creating markup.
pub fn normalize_rcdata(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut copy_start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let replacement = match b {
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'&' if is_loose_amp(&bytes[i + 1..]) => "&amp;",
            _ => continue,
        };
        out.push_str(&s[copy_start..i]);
        out.push_str(replacement);
        copy_start = i + 1;
    }
    out.push_str(&s[copy_start..]);
    out
}
