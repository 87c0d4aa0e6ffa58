//! Whitelist filtering of one property's value tokens.

use crate::schema::{PropBits, PropertySchema, is_known_property, property_schema};

/// Substituted for a URL the rewriter refused.
pub const NO_EFFECT_URL: &str = "url(\"about:blank\")";

const VENDOR_PREFIXES: &[&str] = &[
    "apple", "css", "epub", "khtml", "moz", "ms", "mso", "o", "rim", "wap", "webkit", "xv",
];

/// Schemes a stylesheet URL may carry; relative URLs are always considered.
const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "geo", "mailto", "sms", "tel"];

/// Decides the fate of a URL found in CSS.
///
/// Receives the absolute URL and the property it appeared in. Returning
/// `None` replaces the URL with `about:blank`.
pub trait CssUriRewriter {
    fn rewrite(&self, url: &str, property: &str) -> Option<String>;
}

impl<F> CssUriRewriter for F
where
    F: Fn(&str, &str) -> Option<String>,
{
    fn rewrite(&self, url: &str, property: &str) -> Option<String> {
        self(url, property)
    }
}

/// Inputs shared by every property of one stylesheet or style attribute.
#[derive(Clone, Copy, Default)]
pub struct PropertyContext<'a> {
    /// Without a rewriter every URL is dropped.
    pub uri_rewriter: Option<&'a dyn CssUriRewriter>,
    pub base_uri: Option<&'a str>,
    /// Appended to names that are global to the document (animation names).
    pub id_suffix: Option<&'a str>,
}

/// `-webkit-transition` → `transition`; the prefix must be followed by a
/// letter.
pub fn without_vendor_prefix(name: &str) -> &str {
    let Some(rest) = name.strip_prefix('-') else {
        return name;
    };
    let Some((prefix, tail)) = rest.split_once('-') else {
        return name;
    };
    let known = VENDOR_PREFIXES.contains(&prefix);
    if known && tail.starts_with(|c: char| c.is_ascii_lowercase()) {
        tail
    } else {
        name
    }
}

/// The scheme a browser would read: leading spaces and C0 controls are
/// trimmed and tabs or newlines are ignored anywhere.
fn url_scheme(url: &str) -> Option<String> {
    let mut scheme = String::new();
    for c in url.trim_start_matches(|c: char| c <= ' ').chars() {
        match c {
            '\t' | '\n' | '\r' => continue,
            ':' => return (!scheme.is_empty()).then_some(scheme),
            '/' | '?' | '#' | ' ' => return None,
            c => scheme.push(c),
        }
    }
    None
}

/// Relative URLs and the web, mail and phone schemes.
pub(crate) fn has_allowed_scheme(url: &str) -> bool {
    url_scheme(url).is_none_or(|scheme| {
        ALLOWED_URL_SCHEMES
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&scheme))
    })
}

fn safe_uri(url: &str, property: &str, rewriter: &dyn CssUriRewriter) -> Option<String> {
    if !has_allowed_scheme(url) {
        log::debug!(target: "sanitizer.css", "dropping url {url:?} in {property}");
        return None;
    }
    rewriter.rewrite(url, property)
}

/// Wraps a rewritten URL as `url("...")`, escaping characters that could
/// end the token.
pub fn normalize_url(url: Option<&str>) -> String {
    let Some(url) = url else {
        return NO_EFFECT_URL.to_string();
    };
    let mut out = String::with_capacity(url.len() + 7);
    out.push_str("url(\"");
    for c in url.chars() {
        match c {
            '\n' => out.push_str("%0a"),
            '\x0c' => out.push_str("%0c"),
            '\r' => out.push_str("%0d"),
            '"' => out.push_str("%22"),
            '\'' => out.push_str("%27"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '*' => out.push_str("%2a"),
            '<' => out.push_str("%3c"),
            '>' => out.push_str("%3e"),
            _ => out.push(c),
        }
    }
    out.push_str("\")");
    out
}

fn rewrite_url(raw: &str, property: &str, ctx: &PropertyContext<'_>) -> Option<String> {
    let rewriter = ctx.uri_rewriter?;
    let absolute = match ctx.base_uri {
        Some(base) => uri::resolve(base, raw),
        None => Some(raw.to_string()),
    };
    let rewritten = absolute.and_then(|url| safe_uri(&url, property, rewriter));
    Some(normalize_url(rewritten.as_deref()))
}

fn is_hex_color(token: &str) -> bool {
    token.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 4 | 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit())
    })
}

fn starts_with_number(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(b) if b.is_ascii_digit() => true,
        Some(b'.') => bytes.get(1).is_some_and(u8::is_ascii_digit),
        _ => false,
    }
}

fn is_identifier(token: &str) -> bool {
    let body = token.strip_prefix('-').unwrap_or(token);
    let mut chars = body.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    head_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !token.ends_with("__")
}

fn is_word(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Tokens ending in `(` open a call; quoted strings never do.
fn opens_call(token: &str) -> bool {
    token.ends_with('(') && !token.contains(['"', '\''])
}

/// Index of the `)` matching each call opener, computed in one pass.
fn matching_closers(tokens: &[String]) -> Vec<Option<usize>> {
    let mut closers = vec![None; tokens.len()];
    let mut open = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if token == ")" {
            if let Some(opener) = open.pop() {
                closers[opener] = Some(i);
            }
        } else if opens_call(token) {
            open.push(i);
        }
    }
    closers
}

struct ValueFilter<'c, 'a> {
    property: &'c str,
    schema: &'static PropertySchema,
    ctx: &'c PropertyContext<'a>,
    out: Vec<String>,
    last_quoted: Option<usize>,
}

impl ValueFilter<'_, '_> {
    fn string_disposition(&self) -> PropBits {
        self.schema.bits & (PropBits::URL | PropBits::UNRESERVED_WORD)
    }

    fn ident_disposition(&self) -> PropBits {
        self.schema.bits & (PropBits::GLOBAL_NAME | PropBits::PROPERTY_NAME)
    }

    fn allows(&self, bits: PropBits) -> bool {
        self.schema.bits.contains(bits)
    }

    fn quoted_string(&self, original: &str, lowered: String) -> Option<String> {
        let strings = self.string_disposition();
        if strings == PropBits::URL {
            let body = original
                .get(1..original.len().saturating_sub(1))
                .unwrap_or_default();
            return rewrite_url(&crate::lexer::decode_css(body), self.property, self.ctx);
        }
        (self.allows(PropBits::QSTRING) && strings.bits().count_ones() <= 1).then_some(lowered)
    }

    fn signed_number(&self, sign: char, rest: &str) -> Option<String> {
        let leading_zero = if rest.starts_with('.') { "0" } else { "" };
        match sign {
            '+' => self
                .allows(PropBits::QUANTITY)
                .then(|| format!("{leading_zero}{rest}")),
            _ if self.allows(PropBits::NEGATIVE_QUANTITY) => {
                Some(format!("-{leading_zero}{rest}"))
            }
            _ if self.allows(PropBits::QUANTITY) => Some("0".to_string()),
            _ => None,
        }
    }

    fn identifier(&self, original: &str, lowered: &str) -> Option<String> {
        let names = self.ident_disposition();
        match self.ctx.id_suffix {
            Some(suffix) if names == PropBits::GLOBAL_NAME => Some(format!("{original}{suffix}")),
            _ if names == PropBits::PROPERTY_NAME && is_known_property(lowered) => {
                Some(lowered.to_string())
            }
            _ => None,
        }
    }

    /// Either extends the previous quoted word run or starts a new one.
    fn unreserved_word(&mut self, word: &str) -> Option<String> {
        if let Some(last) = self.last_quoted.filter(|&last| last + 1 == self.out.len()) {
            let quoted = &mut self.out[last];
            quoted.pop();
            quoted.push(' ');
            quoted.push_str(word);
            quoted.push('"');
            return None;
        }
        self.last_quoted = Some(self.out.len());
        Some(format!("\"{word}\""))
    }

    /// Filters a whole call; returns the index to resume from.
    fn call(&mut self, tokens: &[String], i: usize, close: usize, lowered: &str) -> usize {
        let bare = without_vendor_prefix(lowered);
        let allowed = self.schema.functions().iter().find(|f| f.starts_with(bare));
        if let Some(signature) = allowed {
            let args = sanitize_with_schema(signature, &tokens[i + 1..close], self.ctx, None);
            self.out.push(format!("{lowered}{})", args.join(" ")));
        } else {
            log::trace!(target: "sanitizer.css", "dropping call {lowered} in {}", self.property);
        }
        close + 1
    }

    fn run(&mut self, tokens: &[String]) {
        let closers = matching_closers(tokens);
        let mut i = 0;
        while i < tokens.len() {
            let original = tokens[i].as_str();
            let token = original.to_lowercase();
            let first = token.chars().next().unwrap_or(' ');
            let second = token.chars().nth(1);
            let kept = if token == " " {
                None
            } else if first == '"' || first == '\'' {
                self.quoted_string(original, token.clone())
            } else if token == "inherit" || self.schema.allows_literal(without_vendor_prefix(&token)) {
                Some(token.clone())
            } else if first == '#' {
                (is_hex_color(&token) && self.allows(PropBits::HASH_VALUE)).then(|| token.clone())
            } else if first.is_ascii_digit() {
                self.allows(PropBits::QUANTITY).then(|| token.clone())
            } else if matches!(first, '+' | '-') && starts_with_number(&token[1..]) {
                self.signed_number(first, &token[1..])
            } else if first == '.' && second.is_some_and(|c| c.is_ascii_digit()) {
                self.allows(PropBits::QUANTITY).then(|| format!("0{token}"))
            } else if token.starts_with("url(\"") {
                if self.allows(PropBits::URL) {
                    let body = original
                        .get(5..original.len().saturating_sub(2))
                        .unwrap_or_default();
                    rewrite_url(body, self.property, self.ctx)
                } else {
                    None
                }
            } else if token.ends_with('(') {
                match closers[i] {
                    Some(close) => {
                        i = self.call(tokens, i, close, &token);
                        continue;
                    }
                    None => None,
                }
            } else if !self.ident_disposition().is_empty() && is_identifier(&token) {
                self.identifier(original, &token)
            } else if self.string_disposition() == PropBits::UNRESERVED_WORD
                && self.allows(PropBits::QSTRING)
                && is_word(&token)
            {
                self.unreserved_word(&token)
            } else {
                None
            };
            if let Some(kept) = kept {
                self.out.push(kept);
            }
            i += 1;
        }
    }
}

fn sanitize_with_schema(
    property: &str,
    tokens: &[String],
    ctx: &PropertyContext<'_>,
    id_suffix: Option<&str>,
) -> Vec<String> {
    let Some(schema) = property_schema(property) else {
        return Vec::new();
    };
    let scoped = PropertyContext { id_suffix, ..*ctx };
    let mut filter = ValueFilter {
        property,
        schema,
        ctx: &scoped,
        out: Vec::new(),
        last_quoted: None,
    };
    filter.run(tokens);
    filter.out
}

/// Keeps the value tokens of `property` that its schema allows, rewriting
/// numbers, URLs and names into their safe forms.
///
/// `property` is lowercase; vendor prefixes are ignored for the lookup.
/// Unknown properties yield no tokens. A value that reduces to nothing but
/// a refused URL also yields no tokens.
pub fn sanitize_css_property(
    property: &str,
    tokens: &[String],
    ctx: &PropertyContext<'_>,
) -> Vec<String> {
    let key = without_vendor_prefix(property);
    let mut out = sanitize_with_schema(key, tokens, ctx, ctx.id_suffix);
    if out.len() == 1 && out[0] == NO_EFFECT_URL {
        out.clear();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex_css;

    fn sanitize(property: &str, value: &str) -> String {
        sanitize_css_property(property, &lex_css(value), &PropertyContext::default()).join(" ")
    }

    fn with_rewriter(property: &str, value: &str) -> String {
        let rewriter = |url: &str, _: &str| Some(url.to_string());
        let ctx = PropertyContext {
            uri_rewriter: Some(&rewriter),
            base_uri: Some("http://example.com/css/"),
            id_suffix: None,
        };
        sanitize_css_property(property, &lex_css(value), &ctx).join(" ")
    }

    #[test]
    fn keeps_literals_colors_and_quantities() {
        assert_eq!(sanitize("color", "red"), "red");
        assert_eq!(sanitize("color", "#ABCDEF"), "#abcdef");
        assert_eq!(sanitize("color", "#abcde"), "");
        assert_eq!(sanitize("margin", "1px -2em +3px .5em"), "1px -2em 3px 0.5em");
        assert_eq!(sanitize("-moz-border-radius", "4px"), "4px");
    }

    #[test]
    fn rejects_unknown_properties_and_scripts() {
        assert_eq!(sanitize("behavior", "url(x.htc)"), "");
        assert_eq!(sanitize("width", "expression(alert(1))"), "");
        assert_eq!(sanitize("color", "red; background: url(x)"), "red");
    }

    #[test]
    fn negative_values_clamp_where_not_allowed() {
        assert_eq!(sanitize("padding", "-5px"), "0");
        assert_eq!(sanitize("margin", "-5px"), "-5px");
    }

    #[test]
    fn allowed_functions_are_filtered_recursively() {
        assert_eq!(sanitize("color", "rgb(1, 2, 3)"), "rgb(1 , 2 , 3)");
        assert_eq!(sanitize("color", "RGB(1,foo,3)"), "rgb(1 , , 3)");
        assert_eq!(sanitize("color", "calc(1px)"), "");
    }

    #[test]
    fn unclosed_call_drops_only_the_opener() {
        assert_eq!(sanitize("margin", "foo( 1px"), "1px");
    }

    #[test]
    fn font_family_words_are_quoted_and_merged() {
        assert_eq!(
            sanitize("font-family", "Times New Roman, serif"),
            "\"times new roman\" , serif"
        );
        assert_eq!(sanitize("font-family", "'Comic Sans'"), "\"comic sans\"");
    }

    #[test]
    fn urls_need_a_rewriter() {
        assert_eq!(sanitize("background-image", "url(a.png)"), "");
        assert_eq!(
            with_rewriter("background-image", "url(a.png)"),
            "url(\"http://example.com/css/a.png\")"
        );
        assert_eq!(
            with_rewriter("background", "'../b.png' red"),
            "url(\"http://example.com/b.png\") red"
        );
    }

    #[test]
    fn refused_urls_become_about_blank() {
        assert_eq!(with_rewriter("background-image", "url(javascript:alert(1))"), "");
        assert_eq!(
            with_rewriter("background", "url(javascript:x) red"),
            "url(\"about:blank\") red"
        );
    }

    #[test]
    fn escaped_whitespace_does_not_hide_a_scheme() {
        assert_eq!(
            with_rewriter("background", r#"url("\20 javascript:alert(1)") red"#),
            "url(\"about:blank\") red"
        );
        assert_eq!(
            with_rewriter("background", r#"url("\20 data:image/svg+xml,x") red"#),
            "url(\"about:blank\") red"
        );
        assert_eq!(
            with_rewriter("background", r#"url("java\9 script:x") red"#),
            "url(\"about:blank\") red"
        );
        assert!(!has_allowed_scheme("\u{1}\n javascript:x"));
        assert!(has_allowed_scheme(" https://example.com/"));
        assert!(has_allowed_scheme("a b:c"));
    }

    #[test]
    fn global_names_take_the_id_suffix() {
        let ctx = PropertyContext {
            id_suffix: Some("-sfx"),
            ..PropertyContext::default()
        };
        let out = sanitize_css_property("animation-name", &lex_css("Spin"), &ctx);
        assert_eq!(out, vec!["Spin-sfx"]);
        let out = sanitize_css_property("animation-name", &lex_css("bad__"), &ctx);
        assert!(out.is_empty());
    }

    #[test]
    fn property_names_must_be_known() {
        assert_eq!(sanitize("transition-property", "color, bogus"), "color ,");
    }

    #[test]
    fn vendor_prefix_needs_a_letter_after_it() {
        assert_eq!(without_vendor_prefix("-webkit-transition"), "transition");
        assert_eq!(without_vendor_prefix("-webkit-1x"), "-webkit-1x");
        assert_eq!(without_vendor_prefix("-foo-bar"), "-foo-bar");
    }

    #[test]
    fn normalize_url_escapes_token_breakers() {
        assert_eq!(normalize_url(Some("a(b)\"c")), "url(\"a%28b%29%22c\")");
        assert_eq!(normalize_url(None), NO_EFFECT_URL);
    }
}
