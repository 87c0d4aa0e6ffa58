//! Event-based parser over lexed CSS tokens.
//!
//! Recognizes top-level at-rules and rulesets, the rulesets and body-less
//! at-rules inside an at-rule block, and declarations. Braces that belong
//! to nothing are skipped as a balanced unit. Nesting never recurses, so
//! deeply nested input cannot exhaust the stack.

/// Receives the statements of a stylesheet as they are recognized.
pub trait StylesheetHandler {
    /// `name` is lowercase and includes the `@`. `header` is every token
    /// up to the `{` or `;`, without surrounding whitespace.
    fn start_at_rule(&mut self, _name: &str, _header: &[String]) {}
    fn end_at_rule(&mut self) {}
    fn start_block(&mut self) {}
    fn end_block(&mut self) {}
    /// `selector` is trimmed of trailing whitespace.
    fn start_ruleset(&mut self, _selector: &[String]) {}
    fn end_ruleset(&mut self) {}
    /// `property` is lowercase; `value` never contains whitespace tokens.
    fn declaration(&mut self, _property: &str, _value: Vec<String>) {}
}

fn first_char(token: &str) -> char {
    token.chars().next().unwrap_or(' ')
}

struct Parser<'t, 'h, H: ?Sized> {
    tokens: &'t [String],
    handler: &'h mut H,
}

impl<H: StylesheetHandler + ?Sized> Parser<'_, '_, H> {
    fn at(&self, i: usize) -> Option<&str> {
        self.tokens.get(i).map(String::as_str)
    }

    fn stylesheet(&mut self) {
        let tokens = self.tokens;
        let mut i = 0;
        while i < tokens.len() {
            i = match tokens[i].as_str() {
                " " => i + 1,
                "{" => self.skip_balanced(i),
                token if token.starts_with('@') => self.at_rule(i, true),
                _ => self.ruleset(i),
            };
        }
    }

    /// Skips a `{ ... }` run including everything nested inside it.
    fn skip_balanced(&mut self, start: usize) -> usize {
        let mut depth = 0usize;
        for (offset, token) in self.tokens[start..].iter().enumerate() {
            match token.as_str() {
                "{" => depth += 1,
                "}" => {
                    depth -= 1;
                    if depth == 0 {
                        return start + offset + 1;
                    }
                }
                _ => {}
            }
        }
        self.tokens.len()
    }

    /// Parses `@name header ;` or, when `block_ok`, `@name header { ... }`.
    ///
    /// A rule that reaches the end of input, or that opens a block where
    /// none is allowed, is dropped; the returned index then points at the
    /// `{` so the caller can skip it.
    fn at_rule(&mut self, start: usize, block_ok: bool) -> usize {
        let n = self.tokens.len();
        let mut i = start + 1;
        while i < n && !matches!(self.tokens[i].as_str(), "{" | ";") {
            i += 1;
        }
        let terminated = i < n && (block_ok || self.tokens[i] == ";");
        if !terminated {
            log::trace!(target: "sanitizer.css", "dropping malformed {}", self.tokens[start]);
            return i;
        }

        let mut header = &self.tokens[start + 1..i];
        if header.first().is_some_and(|t| t == " ") {
            header = &header[1..];
        }
        if header.last().is_some_and(|t| t == " ") {
            header = &header[..header.len() - 1];
        }
        let name = self.tokens[start].to_lowercase();
        self.handler.start_at_rule(&name, header);
        let next = if self.tokens[i] == "{" {
            self.block(i)
        } else {
            i + 1
        };
        self.handler.end_at_rule();
        next
    }

    /// The body of a top-level at-rule. Nested at-rules may not have
    /// blocks of their own.
    fn block(&mut self, open: usize) -> usize {
        let n = self.tokens.len();
        let mut i = open + 1;
        self.handler.start_block();
        while i < n {
            match first_char(&self.tokens[i]) {
                '}' => {
                    i += 1;
                    break;
                }
                ' ' | ';' => i += 1,
                '@' => i = self.at_rule(i, false),
                '{' => i = self.skip_balanced(i),
                _ => i = self.ruleset(i),
            }
        }
        self.handler.end_block();
        i
    }

    /// Scans a selector (or declaration value) up to a statement boundary.
    ///
    /// Stops at `{`, `}`, `;` or `@`, and at `:` when `allow_colon` is off.
    /// Unbalanced `[`/`(` make the run malformed; the error carries the
    /// index just past the stopping token.
    fn selector(&self, start: usize, allow_colon: bool) -> Result<usize, usize> {
        let n = self.tokens.len();
        let mut brackets: Vec<char> = Vec::new();
        let mut i = start;
        while i < n {
            let token = &self.tokens[i];
            match first_char(token) {
                '[' | '(' if token.len() == 1 => brackets.push(first_char(token)),
                ']' | ')' if token.len() == 1 => {
                    let opener = if token == "]" { '[' } else { '(' };
                    if brackets.last() == Some(&opener) {
                        brackets.pop();
                    }
                }
                '{' | '}' | ';' | '@' => break,
                ':' if !allow_colon => break,
                _ => {}
            }
            i += 1;
        }
        if brackets.is_empty() { Ok(i) } else { Err(i + 1) }
    }

    fn ruleset(&mut self, start: usize) -> usize {
        let end = match self.selector(start, true) {
            Ok(end) => end,
            Err(stop) => return stop.max(start + 1),
        };
        if self.at(end) != Some("{") {
            return end.max(start + 1);
        }
        let mut selector = &self.tokens[start..end];
        if selector.last().is_some_and(|t| t == " ") {
            selector = &selector[..selector.len() - 1];
        }
        self.handler.start_ruleset(selector);

        let tokens = self.tokens;
        let mut i = end + 1;
        while i < tokens.len() {
            match tokens[i].as_str() {
                "}" => {
                    i += 1;
                    break;
                }
                " " => i += 1,
                _ => i = self.declaration(i),
            }
        }
        self.handler.end_ruleset();
        i
    }

    fn skip_declaration(&self, mut i: usize) -> usize {
        let n = self.tokens.len();
        while i < n && !matches!(self.tokens[i].as_str(), ";" | "}") {
            i += 1;
        }
        if self.at(i) == Some(";") { i + 1 } else { i }
    }

    /// `property : value ;`. Declarations whose value is followed by stray
    /// tokens before the `;` are dropped.
    fn declaration(&mut self, start: usize) -> usize {
        let property = &self.tokens[start];
        let named = property
            .strip_prefix('-')
            .unwrap_or(property)
            .starts_with(|c: char| c.is_ascii_alphabetic());
        let mut i = start + 1;
        if !named {
            return if property == ";" { i } else { self.skip_declaration(i) };
        }
        if self.at(i) == Some(" ") {
            i += 1;
        }
        if self.at(i) != Some(":") {
            return self.skip_declaration(i);
        }
        i += 1;
        if self.at(i) == Some(" ") {
            i += 1;
        }

        let value_start = i;
        let value_end = match self.selector(value_start, false) {
            Ok(end) => end,
            Err(stop) => return stop,
        };
        let mut value: Vec<String> = self.tokens[value_start..value_end]
            .iter()
            .filter(|t| *t != " ")
            .cloned()
            .collect();

        let n = self.tokens.len();
        let mut i = value_end;
        while i < n && !matches!(self.tokens[i].as_str(), ";" | "}") {
            value.clear();
            i += 1;
        }
        if self.at(i) == Some(";") {
            i += 1;
        }
        if !value.is_empty() {
            let property = self.tokens[start].to_lowercase();
            self.handler.declaration(&property, value);
        }
        i
    }

    fn declarations(&mut self) {
        let n = self.tokens.len();
        let mut i = 0;
        while i < n {
            i = if self.tokens[i] == " " {
                i + 1
            } else {
                self.declaration(i)
            };
        }
    }
}

/// Feeds every statement in `tokens` to `handler`.
pub fn parse_stylesheet<H: StylesheetHandler + ?Sized>(tokens: &[String], handler: &mut H) {
    Parser { tokens, handler }.stylesheet();
}

/// Feeds the declarations of a style attribute body to `handler`.
pub fn parse_declarations<H: StylesheetHandler + ?Sized>(tokens: &[String], handler: &mut H) {
    Parser { tokens, handler }.declarations();
}

struct DeclarationSink<F>(F);

impl<F: FnMut(&str, Vec<String>)> StylesheetHandler for DeclarationSink<F> {
    fn declaration(&mut self, property: &str, value: Vec<String>) {
        (self.0)(property, value);
    }
}

/// Lexes `css` as a declaration list and calls `on_declaration` with each
/// lowercase property and its value tokens.
pub fn parse_css_declarations<F>(css: &str, on_declaration: F)
where
    F: FnMut(&str, Vec<String>),
{
    let tokens = crate::lexer::lex_css(css);
    parse_declarations(&tokens, &mut DeclarationSink(on_declaration));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex_css;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl StylesheetHandler for Recorder {
        fn start_at_rule(&mut self, name: &str, header: &[String]) {
            self.events.push(format!("at {name} [{}]", header.concat()));
        }
        fn end_at_rule(&mut self) {
            self.events.push("end at".to_string());
        }
        fn start_block(&mut self) {
            self.events.push("{".to_string());
        }
        fn end_block(&mut self) {
            self.events.push("}".to_string());
        }
        fn start_ruleset(&mut self, selector: &[String]) {
            self.events.push(format!("rule [{}]", selector.concat()));
        }
        fn end_ruleset(&mut self) {
            self.events.push("end rule".to_string());
        }
        fn declaration(&mut self, property: &str, value: Vec<String>) {
            self.events.push(format!("{property}={}", value.join(" ")));
        }
    }

    fn stylesheet(css: &str) -> Vec<String> {
        let mut recorder = Recorder::default();
        parse_stylesheet(&lex_css(css), &mut recorder);
        recorder.events
    }

    fn declarations(css: &str) -> Vec<String> {
        let mut recorder = Recorder::default();
        parse_declarations(&lex_css(css), &mut recorder);
        recorder.events
    }

    #[test]
    fn rulesets_and_declarations() {
        assert_eq!(
            stylesheet("p, a { color: red; Margin : 0 1px }"),
            vec!["rule [p, a]", "color=red", "margin=0 1px", "end rule"]
        );
    }

    #[test]
    fn at_rules_with_and_without_blocks() {
        assert_eq!(
            stylesheet("@import 'x.css' screen; @MEDIA print { p { color: red } }"),
            vec![
                "at @import [\"x.css\" screen]",
                "end at",
                "at @media [print]",
                "{",
                "rule [p]",
                "color=red",
                "end rule",
                "}",
                "end at",
            ]
        );
    }

    #[test]
    fn nested_at_rule_blocks_are_skipped() {
        assert_eq!(
            stylesheet("@media screen { @font-face { src: x } p { color: red } }"),
            vec!["at @media [screen]", "{", "rule [p]", "color=red", "end rule", "}", "end at"]
        );
    }

    #[test]
    fn stray_blocks_are_skipped_whole() {
        assert_eq!(
            stylesheet("{ a { b: c } } p { color: red }"),
            vec!["rule [p]", "color=red", "end rule"]
        );
    }

    #[test]
    fn malformed_declarations_are_dropped() {
        assert_eq!(
            declarations("color: red blue green; 1x: y; width: 1px 2px : 3px; height:;top:0"),
            vec!["color=red blue green", "top=0"]
        );
    }

    #[test]
    fn declaration_callback_sees_each_declaration() {
        let mut seen = Vec::new();
        parse_css_declarations("COLOR: Red; ; margin: 0", |property, value| {
            seen.push(format!("{property}={}", value.concat()));
        });
        assert_eq!(seen, vec!["color=Red", "margin=0"]);
    }

    #[test]
    fn unbalanced_selectors_are_skipped() {
        assert_eq!(
            stylesheet("a[href { color: red } p { color: blue }"),
            vec!["rule [p]", "color=blue", "end rule"]
        );
    }

    #[test]
    fn unterminated_at_rule_is_dropped() {
        assert!(stylesheet("@import 'x.css'").is_empty());
    }

    #[test]
    fn deep_nesting_does_not_recurse() {
        let css = format!("{}{}", "{".repeat(100_000), "}".repeat(100_000));
        assert!(stylesheet(&css).is_empty());
        let at_rules = "@media screen {".repeat(50_000);
        assert!(!stylesheet(&at_rules).is_empty());
    }
}
