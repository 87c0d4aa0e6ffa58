//! Event-driven HTML parser.
//!
//! The parser works over the output of [`split_html`]: a flat list of text
//! runs and delimiters. It never builds a tree; each recognised construct is
//! reported to a [`SaxHandler`] which may suspend the parse after any event.
//! Calling [`SaxParser::run`] again resumes at the next event.
//!
//! Malformed input degrades to escaped text: a `<` that does not begin a tag
//! is reported as `&lt;`, a stray `>` as `&gt;`. A start or end tag whose
//! closing `>` never arrives swallows the rest of the input. Searches for
//! `-->` and for `>` after `<!`/`<?` remember when they fail so repeated
//! unterminated openers stay linear.

use crate::entities::{reference_len, strip_nuls, unescape_entities};
use crate::schema::{ElementFlags, element_flags};
use crate::split::split_html;

/// Attribute list handed to handlers and policies, in source order.
///
/// Policies set a value to `None` to drop that attribute from the output.
pub type Attributes = Vec<(String, Option<String>)>;

/// Handler verdict after each event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Stop the current [`SaxParser::run`] call; the next call resumes after
    /// this event.
    Suspend,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseStatus {
    Complete,
    Suspended,
}

/// Receives parse events. Every method defaults to ignoring the event.
///
/// Tag and attribute names arrive lower-cased; attribute values arrive with
/// quotes removed, NULs stripped and character references decoded.
/// `pcdata` text is already markup-safe and can be copied to output as is.
pub trait SaxHandler {
    fn start_document(&mut self) -> Flow {
        Flow::Continue
    }

    fn start_tag(&mut self, _name: &str, _attribs: Attributes) -> Flow {
        Flow::Continue
    }

    fn end_tag(&mut self, _name: &str) -> Flow {
        Flow::Continue
    }

    fn pcdata(&mut self, _text: &str) -> Flow {
        Flow::Continue
    }

    /// Escapable raw text (`<textarea>`, `<title>`), already normalized.
    fn rcdata(&mut self, _text: &str) -> Flow {
        Flow::Continue
    }

    /// Raw text (`<script>`, `<style>`, ...), passed through verbatim.
    fn cdata(&mut self, _text: &str) -> Flow {
        Flow::Continue
    }

    fn comment(&mut self, _text: &str) -> Flow {
        Flow::Continue
    }

    fn end_document(&mut self) -> Flow {
        Flow::Continue
    }
}

#[derive(Debug)]
enum Stage {
    StartDocument,
    Markup,
    /// Raw text body of the element just opened.
    TextBlock { name: String, flags: ElementFlags },
    EndDocument,
    Finished,
}

pub struct SaxParser<'a> {
    parts: Vec<&'a str>,
    pos: usize,
    stage: Stage,
    no_more_gt: bool,
    no_more_end_comments: bool,
}

struct ScannedTag {
    name: String,
    attribs: Attributes,
    /// Index of the part after the closing `>`. May exceed the part count
    /// when an unterminated quote consumed the rest of the input.
    next: usize,
}

impl<'a> SaxParser<'a> {
    pub fn new(html: &'a str) -> Self {
        Self {
            parts: split_html(html),
            pos: 0,
            stage: Stage::StartDocument,
            no_more_gt: false,
            no_more_end_comments: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.stage, Stage::Finished)
    }

    /// Drives the handler until the input is exhausted or the handler
    /// suspends. Once `Complete` is returned further calls are no-ops.
    pub fn run<H: SaxHandler + ?Sized>(&mut self, handler: &mut H) -> ParseStatus {
        loop {
            let flow = match std::mem::replace(&mut self.stage, Stage::Markup) {
                Stage::StartDocument => handler.start_document(),
                Stage::Markup => self.step(handler),
                Stage::TextBlock { name, flags } => self.text_block(&name, flags, handler),
                Stage::EndDocument => {
                    self.stage = Stage::Finished;
                    handler.end_document()
                }
                Stage::Finished => {
                    self.stage = Stage::Finished;
                    return ParseStatus::Complete;
                }
            };
            if flow == Flow::Suspend && !self.is_finished() {
                return ParseStatus::Suspended;
            }
        }
    }

    fn part(&self, index: usize) -> &'a str {
        self.parts.get(index).copied().unwrap_or("")
    }

    fn step<H: SaxHandler + ?Sized>(&mut self, handler: &mut H) -> Flow {
        let Some(&current) = self.parts.get(self.pos) else {
            self.stage = Stage::EndDocument;
            return Flow::Continue;
        };
        self.pos += 1;
        let next = self.part(self.pos);

        match current {
            "&" => {
                if reference_len(next.as_bytes()).is_some() {
                    self.pos += 1;
                    handler.pcdata(&format!("&{next}"))
                } else {
                    handler.pcdata("&amp;")
                }
            }
            "</" => self.end_tag(next, handler),
            "<" => self.start_tag(next, handler),
            "<!--" => self.comment(handler),
            "<!" => {
                if next.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_')
                    && self.skip_past_gt()
                {
                    Flow::Continue
                } else {
                    handler.pcdata("&lt;!")
                }
            }
            "<?" => {
                if self.skip_past_gt() {
                    Flow::Continue
                } else {
                    handler.pcdata("&lt;?")
                }
            }
            ">" => handler.pcdata("&gt;"),
            "" => Flow::Continue,
            text => handler.pcdata(text),
        }
    }

    /// Skips a declaration or processing instruction up to the next `>`.
    fn skip_past_gt(&mut self) -> bool {
        if self.no_more_gt {
            return false;
        }
        match self.parts[self.pos..].iter().position(|&p| p == ">") {
            Some(rel) => {
                self.pos += rel + 1;
                true
            }
            None => {
                self.no_more_gt = true;
                false
            }
        }
    }

    fn comment<H: SaxHandler + ?Sized>(&mut self, handler: &mut H) -> Flow {
        if !self.no_more_end_comments {
            let close = (self.pos + 1..self.parts.len())
                .find(|&p| self.parts[p] == ">" && self.parts[p - 1].ends_with("--"));
            match close {
                Some(p) => {
                    let body = self.parts[self.pos..p].concat();
                    self.pos = p + 1;
                    return handler.comment(&body[..body.len() - 2]);
                }
                None => self.no_more_end_comments = true,
            }
        }
        handler.pcdata("&lt;!--")
    }

    fn end_tag<H: SaxHandler + ?Sized>(&mut self, next: &str, handler: &mut H) -> Flow {
        let name_len = tag_name_len(next);
        if name_len == 0 {
            return handler.pcdata("&lt;/");
        }
        if !next[name_len..].contains(['"', '\'']) && self.part(self.pos + 1) == ">" {
            self.pos += 2;
            return handler.end_tag(&next[..name_len].to_ascii_lowercase());
        }
        match scan_tag(&self.parts, self.pos) {
            Some(tag) => {
                self.pos = tag.next.min(self.parts.len());
                handler.end_tag(&tag.name)
            }
            None => {
                self.pos = self.parts.len();
                Flow::Continue
            }
        }
    }

    fn start_tag<H: SaxHandler + ?Sized>(&mut self, next: &str, handler: &mut H) -> Flow {
        let name_len = tag_name_len(next);
        if name_len == 0 {
            return handler.pcdata("&lt;");
        }
        let (name, attribs) = if is_bare_start_tag(&next[name_len..])
            && self.part(self.pos + 1) == ">"
        {
            self.pos += 2;
            (next[..name_len].to_ascii_lowercase(), Vec::new())
        } else {
            let Some(tag) = scan_tag(&self.parts, self.pos) else {
                self.pos = self.parts.len();
                return Flow::Continue;
            };
            self.pos = tag.next.min(self.parts.len());
            (tag.name, tag.attribs)
        };

        if let Some(flags) = element_flags(&name).filter(|f| f.is_text_block()) {
            self.stage = Stage::TextBlock {
                name: name.clone(),
                flags,
            };
        }
        handler.start_tag(&name, attribs)
    }

    /// Reports everything up to the matching `</name` as one text event.
    fn text_block<H: SaxHandler + ?Sized>(
        &mut self,
        name: &str,
        flags: ElementFlags,
        handler: &mut H,
    ) -> Flow {
        let first = self.pos;
        let end = self.parts.len();
        let stop = (first + 1..end)
            .find(|&p| self.parts[p - 1] == "</" && closes_text_block(self.parts[p], name))
            .map_or(end, |p| p - 1);
        let body = self.parts[first.min(stop)..stop].concat();
        self.pos = stop;
        log::trace!(target: "sanitizer.html", "raw text block <{name}> of {} bytes", body.len());

        if flags.contains(ElementFlags::CDATA) {
            handler.cdata(&body)
        } else {
            handler.rcdata(&crate::entities::normalize_rcdata(&body))
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':')
}

fn is_attr_name_char(c: char) -> bool {
    is_name_char(c) || c == '.'
}

fn tag_name_len(s: &str) -> usize {
    s.find(|c: char| !is_name_char(c)).unwrap_or(s.len())
}

/// `\s*/?` with nothing after it.
fn is_bare_start_tag(rest: &str) -> bool {
    let rest = rest.trim_start();
    rest.is_empty() || rest == "/"
}

fn closes_text_block(part: &str, name: &str) -> bool {
    let Some(head) = part.get(..name.len()) else {
        return false;
    };
    head.eq_ignore_ascii_case(name)
        && part[name.len()..]
            .chars()
            .next()
            .is_none_or(|c| c.is_whitespace() || c == '/')
}

enum AttrMatch<'b> {
    NoMatch,
    Unterminated(char),
    Attribute {
        name: &'b str,
        value: Option<&'b str>,
        len: usize,
    },
}

fn skip_whitespace(s: &str, from: usize) -> usize {
    s[from..]
        .find(|c: char| !c.is_whitespace())
        .map_or(s.len(), |rel| from + rel)
}

fn scan_attr_name(s: &str, from: usize) -> Option<usize> {
    let rest = &s[from..];
    if let Some(inner) = rest.strip_prefix('[') {
        let len = inner.find(|c: char| !is_attr_name_char(c)).unwrap_or(inner.len());
        if len > 0 && inner[len..].starts_with(']') {
            return Some(from + len + 2);
        }
    }
    let len = rest.find(|c: char| !is_attr_name_char(c)).unwrap_or(rest.len());
    (len > 0).then_some(from + len)
}

/// `[a-z][-\w]*\s*=`, case-insensitively: the next token is another
/// attribute, so `a= b=c` gives `a` an empty value.
fn starts_with_assignment(s: &str) -> bool {
    if !s.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return false;
    }
    let after_name = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(s.len());
    s[after_name..].trim_start().starts_with('=')
}

/// Matches one `name`, `name=value`, `name="value"` or `name='value'` at the
/// start of `buf`, after optional whitespace.
fn match_attribute(buf: &str) -> AttrMatch<'_> {
    let start = skip_whitespace(buf, 0);
    let Some(name_end) = scan_attr_name(buf, start) else {
        return AttrMatch::NoMatch;
    };
    let name = &buf[start..name_end];
    let eq = skip_whitespace(buf, name_end);
    if !buf[eq..].starts_with('=') {
        return AttrMatch::Attribute {
            name,
            value: None,
            len: name_end,
        };
    }
    let value_start = skip_whitespace(buf, eq + 1);
    let rest = &buf[value_start..];
    let value_len = match rest.chars().next() {
        Some(quote @ ('"' | '\'')) => match rest[1..].find(quote) {
            Some(close) => close + 2,
            None => return AttrMatch::Unterminated(quote),
        },
        _ if starts_with_assignment(rest) => 0,
        _ => rest
            .find(|c: char| c == '"' || c == '\'' || c.is_whitespace())
            .unwrap_or(rest.len()),
    };
    AttrMatch::Attribute {
        name,
        value: Some(&rest[..value_len]),
        len: value_start + value_len,
    }
}

fn decode_value(raw: &str) -> String {
    let inner = match raw.as_bytes() {
        [q @ (b'"' | b'\''), .., last] if last == q => &raw[1..raw.len() - 1],
        _ => raw,
    };
    unescape_entities(&strip_nuls(inner))
}

/// Drops one character and any following run that is neither a lower-case
/// ASCII letter nor whitespace.
fn skip_garbage(buf: &str) -> usize {
    let mut chars = buf.char_indices().skip(1);
    chars
        .find(|&(_, c)| c.is_ascii_lowercase() || c.is_whitespace())
        .map_or(buf.len(), |(i, _)| i)
}

/// Scans a tag whose name starts `parts[pos]`, collecting attributes up to
/// the first `>` outside quotes. `None` when no `>` follows.
fn scan_tag(parts: &[&str], pos: usize) -> Option<ScannedTag> {
    let head = parts[pos];
    let name_len = tag_name_len(head);
    let name = head[..name_len].to_ascii_lowercase();

    let end = parts.len();
    let mut p = pos + 1;
    let mut buf = head[name_len..].to_string();
    while p < end && parts[p] != ">" {
        buf.push_str(parts[p]);
        p += 1;
    }
    if p >= end {
        return None;
    }

    let mut attribs = Vec::new();
    let mut cursor = 0;
    while cursor < buf.len() {
        let rest = &buf[cursor..];
        match match_attribute(rest) {
            AttrMatch::NoMatch => cursor += skip_garbage(rest),
            AttrMatch::Unterminated(quote) => {
                // The `>` we stopped at was quoted: keep reading until the
                // quote closes and another `>` follows.
                let mut joined = rest.to_string();
                joined.push_str(parts[p]);
                p += 1;
                let mut saw_quote = false;
                while p < end {
                    if saw_quote {
                        if parts[p] == ">" {
                            break;
                        }
                    } else if parts[p].contains(quote) {
                        saw_quote = true;
                    }
                    joined.push_str(parts[p]);
                    p += 1;
                }
                if p >= end {
                    break;
                }
                buf = joined;
                cursor = 0;
            }
            AttrMatch::Attribute { name, value, len } => {
                let value = value.map(decode_value).unwrap_or_default();
                attribs.push((name.to_ascii_lowercase(), Some(value)));
                cursor += len;
            }
        }
    }

    Some(ScannedTag {
        name,
        attribs,
        next: p + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        suspend_every: bool,
    }

    impl Recorder {
        fn record(&mut self, event: String) -> Flow {
            self.events.push(event);
            if self.suspend_every {
                Flow::Suspend
            } else {
                Flow::Continue
            }
        }
    }

    impl SaxHandler for Recorder {
        fn start_document(&mut self) -> Flow {
            self.record("startDoc".into())
        }
        fn start_tag(&mut self, name: &str, attribs: Attributes) -> Flow {
            let attrs: Vec<String> = attribs
                .into_iter()
                .map(|(k, v)| format!("{k}={}", v.unwrap_or_default()))
                .collect();
            self.record(format!("start {name} [{}]", attrs.join(",")))
        }
        fn end_tag(&mut self, name: &str) -> Flow {
            self.record(format!("end {name}"))
        }
        fn pcdata(&mut self, text: &str) -> Flow {
            self.record(format!("pcdata {text}"))
        }
        fn rcdata(&mut self, text: &str) -> Flow {
            self.record(format!("rcdata {text}"))
        }
        fn cdata(&mut self, text: &str) -> Flow {
            self.record(format!("cdata {text}"))
        }
        fn comment(&mut self, text: &str) -> Flow {
            self.record(format!("comment {text}"))
        }
        fn end_document(&mut self) -> Flow {
            self.record("endDoc".into())
        }
    }

    fn events(html: &str) -> Vec<String> {
        let mut recorder = Recorder::default();
        let status = SaxParser::new(html).run(&mut recorder);
        assert_eq!(status, ParseStatus::Complete, "parsing {html:?}");
        recorder.events
    }

    fn body(html: &str) -> Vec<String> {
        let mut all = events(html);
        assert_eq!(all.first().map(String::as_str), Some("startDoc"));
        assert_eq!(all.last().map(String::as_str), Some("endDoc"));
        all.pop();
        all.remove(0);
        all
    }

    #[test]
    fn reports_tags_and_text() {
        assert_eq!(
            body("<B>hi</B>"),
            vec!["start b []", "pcdata hi", "end b"]
        );
        assert_eq!(body("<br/>"), vec!["start br []"]);
        assert_eq!(body("<br />x"), vec!["start br []", "pcdata x"]);
    }

    #[test]
    fn parses_attribute_forms() {
        assert_eq!(
            body(r#"<a HREF="x&amp;y" title='t' data-n=3 checked>"#),
            vec!["start a [href=x&y,title=t,data-n=3,checked=]"]
        );
        assert_eq!(body("<p a= b=c>"), vec!["start p [a=,b=c]"]);
        assert_eq!(body("<p [x]=1>"), vec!["start p [[x]=1]"]);
    }

    #[test]
    fn quoted_gt_is_part_of_the_value() {
        assert_eq!(
            body(r#"<a title="x > y">t</a>"#),
            vec!["start a [title=x > y]", "pcdata t", "end a"]
        );
    }

    #[test]
    fn unterminated_quote_loses_the_attribute_garbage() {
        assert_eq!(body(r#"<a title="x>y"#), vec!["start a []"]);
    }

    #[test]
    fn skips_garbage_between_attributes() {
        assert_eq!(body("<p ## a=1 ==>"), vec!["start p [a=1]"]);
        assert_eq!(body(r#"<p a=b"c>"#), vec!["start p [a=b,c=]"]);
    }

    #[test]
    fn unclosed_tag_drops_rest_of_input() {
        assert_eq!(body("a<b c=d"), vec!["pcdata a"]);
        assert_eq!(body("a</b c"), vec!["pcdata a"]);
    }

    #[test]
    fn stray_markup_is_escaped() {
        assert_eq!(body("1 < 2"), vec!["pcdata 1 ", "pcdata &lt;", "pcdata  2"]);
        assert_eq!(body("a>b"), vec!["pcdata a", "pcdata &gt;", "pcdata b"]);
        assert_eq!(body("</ x"), vec!["pcdata &lt;/", "pcdata  x"]);
    }

    #[test]
    fn ampersands_keep_valid_references() {
        assert_eq!(body("&lt;x"), vec!["pcdata &lt;x"]);
        assert_eq!(body("a & b"), vec!["pcdata a ", "pcdata &amp;", "pcdata  b"]);
        assert_eq!(body("&#65;"), vec!["pcdata &#65;"]);
    }

    #[test]
    fn comments_are_reported_and_unterminated_ones_escaped() {
        assert_eq!(body("<!-- a > b -->x"), vec!["comment  a > b ", "pcdata x"]);
        assert_eq!(
            body("<!-- open"),
            vec!["pcdata &lt;!--", "pcdata  open"]
        );
    }

    #[test]
    fn declarations_and_processing_instructions_are_skipped() {
        assert_eq!(body("<!DOCTYPE html>x"), vec!["pcdata x"]);
        assert_eq!(body("<?xml version=1?>x"), vec!["pcdata x"]);
        assert_eq!(body("<! x"), vec!["pcdata &lt;!", "pcdata  x"]);
        assert_eq!(body("<?x"), vec!["pcdata &lt;?", "pcdata x"]);
    }

    #[test]
    fn raw_text_elements_consume_until_their_end_tag() {
        assert_eq!(
            body("<script>if (a < b) x = '</p>';</script>"),
            vec![
                "start script []",
                "cdata if (a < b) x = '</p>';",
                "end script"
            ]
        );
        assert_eq!(
            body("<textarea><b>&amp; & </TEXTAREA >"),
            vec![
                "start textarea []",
                "rcdata &lt;b&gt;&amp; &amp; ",
                "end textarea"
            ]
        );
        assert_eq!(
            body("<style>p{}"),
            vec!["start style []", "cdata p{}"]
        );
    }

    #[test]
    fn end_tag_with_attributes_takes_slow_path() {
        assert_eq!(body(r#"<b>x</b title="y">"#), vec!["start b []", "pcdata x", "end b"]);
    }

    #[test]
    fn suspension_resumes_at_next_event() {
        let html = "<p class=a>one<textarea>two</textarea></p>";
        let expected = events(html);

        let mut recorder = Recorder {
            suspend_every: true,
            ..Recorder::default()
        };
        let mut parser = SaxParser::new(html);
        let mut runs = 0;
        while parser.run(&mut recorder) == ParseStatus::Suspended {
            runs += 1;
            assert!(runs <= expected.len(), "parser failed to make progress");
        }
        assert_eq!(recorder.events, expected);
        assert_eq!(parser.run(&mut recorder), ParseStatus::Complete);
        assert_eq!(recorder.events, expected);
    }

    #[test]
    fn repeated_unterminated_openers_stay_linear() {
        let html = "<!--<!x<?".repeat(20_000);
        let events = events(&html);
        assert!(events.len() > 60_000);
    }
}
