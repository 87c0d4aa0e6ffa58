//! Whole-stylesheet sanitizing: rulesets, `@media`, `@keyframes` and
//! `@import`.

use crate::lexer::{decode_css, lex_css};
use crate::media::{NOT_ALL, sanitize_media_query};
use crate::parser::{StylesheetHandler, parse_stylesheet};
use crate::property::{CssUriRewriter, PropertyContext, has_allowed_scheme, sanitize_css_property};
use crate::selector::{Virtualization, sanitize_css_selectors};

/// One piece of sanitized output. Imports stay as placeholders until the
/// import session fills them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Chunk {
    Text(String),
    Import(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingImport {
    pub url: String,
    pub media_query: String,
}

#[derive(Debug, Default)]
pub(crate) struct SanitizedSheet {
    pub chunks: Vec<Chunk>,
    pub imports: Vec<PendingImport>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Block {
    Media,
    Keyframes,
}

struct StylesheetSanitizer<'v> {
    virtualization: &'v Virtualization<'v>,
    properties: PropertyContext<'v>,
    imports_enabled: bool,
    sheet: SanitizedSheet,
    /// `None` entries mark regions whose content is not emitted.
    blocks: Vec<Option<Block>>,
    elide: bool,
}

impl StylesheetSanitizer<'_> {
    fn emit(&mut self, text: &str) {
        if let Some(Chunk::Text(last)) = self.sheet.chunks.last_mut() {
            last.push_str(text);
        } else {
            self.sheet.chunks.push(Chunk::Text(text.to_string()));
        }
    }

    fn check_elide(&mut self) {
        self.elide = matches!(self.blocks.last(), Some(None));
    }

    fn keyframes(&mut self, name: &str, header: &[String]) -> Option<Block> {
        let [animation] = header else {
            return None;
        };
        let valid = !animation.ends_with("__")
            && animation
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            log::debug!(target: "sanitizer.stylesheet", "eliding {name} {animation}");
            return None;
        }
        let suffix = &self.virtualization.id_suffix;
        self.emit(&format!("{name} {animation}{suffix}"));
        Some(Block::Keyframes)
    }

    fn import(&mut self, header: &[String]) {
        if !self.imports_enabled {
            log::info!(target: "sanitizer.stylesheet", "@import {} elided", header.join(" "));
            return;
        }
        let media_query = sanitize_media_query(&header[1..]);
        if media_query == NOT_ALL {
            log::debug!(target: "sanitizer.stylesheet", "dropping @import with unmatchable media");
            return;
        }
        let Some(target) = import_target(&header[0]) else {
            log::debug!(target: "sanitizer.stylesheet", "dropping @import of {:?}", header[0]);
            return;
        };
        let url = match self.properties.base_uri {
            Some(base) => uri::resolve(base, &target),
            None => Some(target),
        };
        let Some(url) = url.filter(|url| has_allowed_scheme(url)) else {
            log::debug!(target: "sanitizer.stylesheet", "dropping @import with disallowed url");
            return;
        };
        self.sheet.chunks.push(Chunk::Import(self.sheet.imports.len()));
        self.sheet.imports.push(PendingImport { url, media_query });
    }
}

/// The URL of an `@import` header token: a string or a `url(...)`.
fn import_target(token: &str) -> Option<String> {
    let wrapped = token
        .strip_prefix("url(")
        .and_then(|rest| rest.strip_suffix(')'));
    let inner = wrapped.unwrap_or(token);
    for quote in ['"', '\''] {
        if let Some(body) = inner.strip_prefix(quote).and_then(|b| b.strip_suffix(quote)) {
            return Some(decode_css(body));
        }
    }
    wrapped.map(str::to_string)
}

/// `from`, `to` and percentages, comma separated; whitespace is removed.
fn keyframe_selector(tokens: &[String]) -> Option<String> {
    let significant: Vec<&str> = tokens
        .iter()
        .map(String::as_str)
        .filter(|t| *t != " ")
        .collect();
    let stop_ok = |t: &str| {
        t.eq_ignore_ascii_case("from")
            || t.eq_ignore_ascii_case("to")
            || t.strip_suffix('%').is_some_and(is_decimal)
    };
    let mut expect_stop = true;
    for token in &significant {
        let ok = if expect_stop { stop_ok(token) } else { *token == "," };
        if !ok {
            return None;
        }
        expect_stop = !expect_stop;
    }
    (!significant.is_empty() && !expect_stop).then(|| significant.concat())
}

fn is_decimal(s: &str) -> bool {
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    digits(int) && frac.is_none_or(digits)
}

impl StylesheetHandler for StylesheetSanitizer<'_> {
    fn start_at_rule(&mut self, name: &str, header: &[String]) {
        let kind = if self.elide {
            None
        } else {
            match name {
                "@media" => {
                    let query = sanitize_media_query(header);
                    self.emit(&format!("@media {query}"));
                    Some(Block::Media)
                }
                "@keyframes" | "@-webkit-keyframes" => self.keyframes(name, header),
                "@import" if !header.is_empty() => {
                    self.import(header);
                    None
                }
                _ => {
                    log::debug!(target: "sanitizer.stylesheet", "eliding {name}");
                    None
                }
            }
        };
        self.elide = kind.is_none();
        self.blocks.push(kind);
    }

    fn end_at_rule(&mut self) {
        self.blocks.pop();
        if !self.elide {
            self.emit(";");
        }
        self.check_elide();
    }

    fn start_block(&mut self) {
        if !self.elide {
            self.emit("{");
        }
    }

    fn end_block(&mut self) {
        if !self.elide {
            self.emit("}");
            // The at-rule that owned the block must not add its `;`.
            self.elide = true;
        }
    }

    fn start_ruleset(&mut self, selector: &[String]) {
        if !self.elide {
            let safe = if self.blocks.last() == Some(&Some(Block::Keyframes)) {
                keyframe_selector(selector)
            } else {
                sanitize_css_selectors(selector, self.virtualization, None)
                    .filter(|list| !list.is_empty())
                    .map(|list| list.join(", "))
            };
            match safe {
                Some(selector) => {
                    self.emit(&selector);
                    self.emit("{");
                }
                None => self.elide = true,
            }
        }
        self.blocks.push(None);
    }

    fn end_ruleset(&mut self) {
        self.blocks.pop();
        if !self.elide {
            self.emit("}");
        }
        self.check_elide();
    }

    fn declaration(&mut self, property: &str, mut value: Vec<String>) {
        if self.elide {
            return;
        }
        let n = value.len();
        let important =
            n >= 2 && value[n - 2] == "!" && value[n - 1].eq_ignore_ascii_case("important");
        if important {
            value.truncate(n - 2);
        }
        let safe = sanitize_css_property(property, &value, &self.properties);
        if safe.is_empty() {
            log::debug!(target: "sanitizer.stylesheet", "dropping declaration of {property}");
            return;
        }
        let tail = if important { " !important;" } else { ";" };
        self.emit(&format!("{property}:{}{tail}", safe.join(" ")));
    }
}

pub(crate) fn sanitize_sheet(
    base_uri: Option<&str>,
    css: &str,
    virtualization: &Virtualization<'_>,
    uri_rewriter: Option<&dyn CssUriRewriter>,
    imports_enabled: bool,
) -> SanitizedSheet {
    let id_suffix = Some(virtualization.id_suffix.as_str()).filter(|s| !s.is_empty());
    let mut handler = StylesheetSanitizer {
        virtualization,
        properties: PropertyContext {
            uri_rewriter,
            base_uri,
            id_suffix,
        },
        imports_enabled,
        sheet: SanitizedSheet::default(),
        blocks: Vec::new(),
        elide: false,
    };
    parse_stylesheet(&lex_css(css), &mut handler);
    handler.sheet
}

/// Sanitizes a stylesheet in one pass. `@import` rules are dropped.
///
/// URLs are resolved against `base_uri` before `uri_rewriter` sees them;
/// without a rewriter every URL-valued declaration is dropped.
pub fn sanitize_stylesheet(
    base_uri: Option<&str>,
    css: &str,
    virtualization: &Virtualization<'_>,
    uri_rewriter: Option<&dyn CssUriRewriter>,
) -> String {
    let sheet = sanitize_sheet(base_uri, css, virtualization, uri_rewriter, false);
    sheet
        .chunks
        .into_iter()
        .filter_map(|chunk| match chunk {
            Chunk::Text(text) => Some(text),
            Chunk::Import(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(css: &str) -> String {
        sanitize_stylesheet(None, css, &Virtualization::default(), None)
    }

    fn scoped(css: &str) -> String {
        let virtualization = Virtualization {
            container_class: Some("ns".to_string()),
            id_suffix: "-v1".to_string(),
            ..Virtualization::default()
        };
        sanitize_stylesheet(None, css, &virtualization, None)
    }

    #[test]
    fn rulesets_are_rebuilt() {
        assert_eq!(
            sanitize("p, a { color: red; width: 1px !important; bogus: 1 }"),
            "p, a{color:red;width:1px !important;}"
        );
    }

    #[test]
    fn empty_selector_lists_drop_the_ruleset() {
        assert_eq!(sanitize("script { color: red } b { color: blue }"), "b{color:blue;}");
    }

    #[test]
    fn media_blocks_keep_their_rules() {
        assert_eq!(
            sanitize("@media print { p { color: red } } i { color: blue }"),
            "@media print{p{color:red;}}i{color:blue;}"
        );
        assert_eq!(sanitize("@media evil { p { color: red } }"), "@media not all{p{color:red;}}");
    }

    #[test]
    fn keyframes_take_the_suffix() {
        assert_eq!(
            scoped("@keyframes spin { from { width: 1px } 50%, TO { width: 2px } }"),
            "@keyframes spin-v1{from{width:1px;}50%,TO{width:2px;}}"
        );
        assert_eq!(scoped("@keyframes bad__ { from { width: 1px } }"), "");
        assert_eq!(scoped("@keyframes spin { p { width: 1px } }"), "@keyframes spin-v1{}");
    }

    #[test]
    fn selectors_are_scoped() {
        assert_eq!(scoped("a.foo, #x { color: red }"), ".ns a.foo, .ns #x-v1{color:red;}");
    }

    #[test]
    fn imports_without_a_fetcher_are_elided() {
        assert_eq!(sanitize("@import url(other.css); p { color: red }"), "p{color:red;}");
    }

    #[test]
    fn unknown_at_rules_are_elided_with_their_blocks() {
        assert_eq!(
            sanitize("@font-face { src: url(x) } @page :first { margin: 1in } p { color: red }"),
            "p{color:red;}"
        );
    }

    #[test]
    fn urls_resolve_against_the_base() {
        let rewriter = |url: &str, _: &str| Some(url.to_string());
        let out = sanitize_stylesheet(
            Some("https://example.com/css/site.css"),
            "p { background: url(../img/a.png) }",
            &Virtualization::default(),
            Some(&rewriter),
        );
        assert_eq!(out, "p{background:url(\"https://example.com/img/a.png\");}");
    }

    #[test]
    fn imports_with_escaped_schemes_are_dropped() {
        let sheet = sanitize_sheet(
            Some("https://example.com/a.css"),
            r#"@import "\20 data:text/css,x"; @import url("\20 javascript:x"); @import "b.css";"#,
            &Virtualization::default(),
            None,
            true,
        );
        let urls: Vec<&str> = sheet.imports.iter().map(|import| import.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.com/b.css"]);
    }

    #[test]
    fn import_targets_accept_strings_and_urls() {
        assert_eq!(import_target("\"a.css\""), Some("a.css".to_string()));
        assert_eq!(import_target("url(\"b.css\")"), Some("b.css".to_string()));
        assert_eq!(import_target("url(c.css)"), Some("c.css".to_string()));
        assert_eq!(import_target("screen"), None);
    }
}
