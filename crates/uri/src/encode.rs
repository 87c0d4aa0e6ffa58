//! Percent-encoding helpers mirroring the browser `encodeURI` /
//! `encodeURIComponent` / `decodeURIComponent` character sets.

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Bytes `encodeURIComponent` leaves untouched.
#[inline]
fn is_component_safe(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

/// Bytes `encodeURI` leaves untouched (component set plus URI reserved set).
#[inline]
fn is_uri_safe(b: u8) -> bool {
    is_component_safe(b)
        || matches!(
            b,
            b';' | b',' | b'/' | b'?' | b':' | b'@' | b'&' | b'=' | b'+' | b'$' | b'#'
        )
}

#[inline]
pub(crate) fn push_escaped(out: &mut String, b: u8) {
    out.push('%');
    out.push(HEX[(b >> 4) as usize] as char);
    out.push(HEX[(b & 0xf) as usize] as char);
}

fn encode_bytes(input: &str, keep: impl Fn(u8) -> bool) -> String {
    let mut out = String::with_capacity(input.len());
    let mut copy_start = 0;
    for (i, &b) in input.as_bytes().iter().enumerate() {
        if keep(b) {
            continue;
        }
        if copy_start < i {
            out.push_str(&input[copy_start..i]);
        }
        push_escaped(&mut out, b);
        copy_start = i + 1;
    }
    if copy_start < input.len() {
        out.push_str(&input[copy_start..]);
    }
    out
}

/// Percent-encodes everything outside the unreserved set.
pub fn encode_component(input: &str) -> String {
    encode_bytes(input, is_component_safe)
}

/// Percent-encodes like `encodeURI`, additionally escaping every byte in `extra`.
pub fn encode_uri(input: &str, extra: &[u8]) -> String {
    encode_bytes(input, |b| is_uri_safe(b) && !extra.contains(&b))
}

/// Escapes query text, keeping only `?&=`, alphanumerics, `_-~.` and
/// already-present `%` escapes.
pub(crate) fn encode_raw_query(input: &str) -> String {
    encode_bytes(input, |b| {
        b.is_ascii_alphanumeric() || matches!(b, b'?' | b'&' | b'=' | b'_' | b'-' | b'~' | b'.' | b'%')
    })
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decodes `%XX` escapes.
///
/// Malformed escapes are kept literally and byte sequences that are not valid
/// UTF-8 decode to U+FFFD, so decoding never fails.
pub fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    if !bytes.contains(&b'%') {
        return input.to_string();
    }
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value);
            let lo = bytes.get(i + 2).copied().and_then(hex_value);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(b);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_encoding_matches_browser_set() {
        assert_eq!(encode_component("a b/c?d"), "a%20b%2Fc%3Fd");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn uri_encoding_keeps_reserved_but_honors_extra() {
        assert_eq!(encode_uri("/a b/c?d#e", b""), "/a%20b/c?d#e");
        assert_eq!(encode_uri("/a b/c?d#e", b"#?"), "/a%20b/c%3Fd%23e");
        assert_eq!(encode_uri("user@host", b"#/?@"), "user%40host");
    }

    #[test]
    fn raw_query_escapes_everything_unusual() {
        assert_eq!(encode_raw_query("a=b c&d=%20"), "a=b%20c&d=%20");
        assert_eq!(encode_raw_query("x+y"), "x%2By");
    }

    #[test]
    fn decode_round_trips_and_tolerates_garbage() {
        assert_eq!(decode("a%20b"), "a b");
        assert_eq!(decode("%C3%A9"), "é");
        assert_eq!(decode("100%"), "100%");
        assert_eq!(decode("%zz%4"), "%zz%4");
        assert_eq!(decode("%FF"), "\u{FFFD}");
    }
}
