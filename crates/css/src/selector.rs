//! Rewrites selector lists so they only reach into the sanitized subtree.
//!
//! Element names pass through the tag policy, ids get the document suffix,
//! attribute selectors are checked against the attribute schema, and each
//! complex selector can be scoped under a container class.

use html::{
    AttributeType, Attributes, ElementFlags, TagDecision, TagPolicy, attribute_type, element_flags,
};

const PSEUDO_CLASSES: &[&str] = &[
    "active",
    "after",
    "before",
    "blank",
    "checked",
    "default",
    "disabled",
    "drop",
    "empty",
    "enabled",
    "first",
    "first-child",
    "first-letter",
    "first-line",
    "first-of-type",
    "fullscreen",
    "focus",
    "hover",
    "in-range",
    "indeterminate",
    "invalid",
    "last-child",
    "last-of-type",
    "left",
    "link",
    "only-child",
    "only-of-type",
    "optional",
    "out-of-range",
    "placeholder-shown",
    "read-only",
    "read-write",
    "required",
    "right",
    "root",
    "scope",
    "user-error",
    "valid",
    "visited",
];

fn known_safe_element(name: &str, attribs: Attributes) -> TagDecision {
    match element_flags(name) {
        Some(flags) if !flags.contains(ElementFlags::UNSAFE) => TagDecision::keep(attribs),
        _ => TagDecision::Reject,
    }
}

/// Maps a `(element, attribute)` pair to the attribute name the output
/// markup actually carries, or `None` when the selector must not target it.
pub type AttrNameMapper<'a> = &'a dyn Fn(&str, &str) -> Option<String>;

/// How selectors are confined to the sanitized subtree.
pub struct Virtualization<'a> {
    /// Prefixed as `.class ` to every complex selector.
    pub container_class: Option<String>,
    /// Appended to `#id` selectors and id-valued attribute matches.
    pub id_suffix: String,
    /// Accepts, renames or rejects element names.
    pub tag_policy: &'a dyn TagPolicy,
    pub virtualize_attr_name: Option<AttrNameMapper<'a>>,
}

impl Default for Virtualization<'_> {
    fn default() -> Self {
        Self {
            container_class: None,
            id_suffix: String::new(),
            tag_policy: &known_safe_element,
            virtualize_attr_name: None,
        }
    }
}

impl std::fmt::Debug for Virtualization<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Virtualization")
            .field("container_class", &self.container_class)
            .field("id_suffix", &self.id_suffix)
            .finish_non_exhaustive()
    }
}

fn is_combinator(token: &str) -> bool {
    matches!(token, ">" | "+" | "~")
}

fn is_class_name(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b':' | b'_' | b'-'))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_attr_value(value: &str) -> bool {
    let Some(body) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) else {
        return false;
    };
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return false,
            '\\' if chars.next().is_none() => return false,
            _ => {}
        }
    }
    true
}

fn escape_with_backslash(s: &str, keep: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if !keep(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Drops whitespace that is not a descendant combinator: inside brackets and
/// next to `>`, `+` or `~`.
fn compact(tokens: &[String]) -> Vec<String> {
    let mut depth = 0usize;
    let mut kept = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        match token.as_str() {
            "(" | "[" => depth += 1,
            ")" | "]" => depth = depth.saturating_sub(1),
            " " => {
                let beside_combinator = (i > 0 && is_combinator(&tokens[i - 1]))
                    || tokens.get(i + 1).is_some_and(|t| is_combinator(t));
                if depth > 0 || beside_combinator {
                    continue;
                }
            }
            _ => {}
        }
        kept.push(token.clone());
    }
    kept
}

struct Compound<'v, 't> {
    virtualization: &'v Virtualization<'v>,
    tokens: &'t [String],
    pos: usize,
    element: String,
    class_id: String,
    attrs: String,
    pseudo: String,
}

impl<'t> Compound<'_, 't> {
    fn peek(&self) -> Option<&'t str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn element_name(&mut self) {
        let Some(token) = self.peek() else { return };
        if token == "*" {
            self.element = "*".to_string();
            self.pos += 1;
            return;
        }
        if !token.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return;
        }
        let lowered = token.to_ascii_lowercase();
        if let TagDecision::Accept { tag_name, .. } =
            self.virtualization.tag_policy.decide(&lowered, Vec::new())
        {
            self.element = tag_name.unwrap_or_else(|| token.to_string());
            self.pos += 1;
        }
    }

    fn id(&mut self, token: &str) -> bool {
        let bad = token.starts_with("#_")
            || token.ends_with("__")
            || token[1..]
                .chars()
                .any(|c| !(is_word_char(c) || matches!(c, '#' | ':' | '-')));
        if bad {
            return false;
        }
        self.class_id.push_str(token);
        self.class_id.push_str(&self.virtualization.id_suffix);
        true
    }

    fn class(&mut self) -> bool {
        let Some(name) = self.tokens.get(self.pos + 1) else {
            return false;
        };
        if !is_class_name(name) || name.starts_with('_') || name.ends_with("__") {
            return false;
        }
        self.class_id.push('.');
        self.class_id.push_str(name);
        self.pos += 1;
        true
    }

    fn attribute_type(&self, attr: &str) -> Option<(String, AttributeType)> {
        let element = self.element.to_ascii_lowercase();
        let known = attribute_type(&element, attr);
        match self.virtualization.virtualize_attr_name {
            Some(rename) => {
                let renamed = rename(&element, attr)?;
                Some((renamed, known.unwrap_or(AttributeType::None)))
            }
            None => known.map(|kind| (attr.to_string(), kind)),
        }
    }

    /// `[attr]`, `[attr op value]` with an optional trailing ` i`. The
    /// cursor starts on `[` and ends on `]`.
    fn attribute(&mut self) -> bool {
        self.pos += 1;
        let Some(attr) = self.peek().map(str::to_ascii_lowercase) else {
            return false;
        };
        self.pos += 1;
        let Some((name, kind)) = self.attribute_type(&attr) else {
            return false;
        };

        let mut op = "";
        let mut value = String::new();
        let mut ignore_case = false;
        let operator = self
            .peek()
            .filter(|t| matches!(*t, "=" | "~=" | "^=" | "$=" | "*=" | "|="));
        if let Some(candidate) = operator {
            op = candidate;
            value = self.tokens.get(self.pos + 1).cloned().unwrap_or_default();
            self.pos += 2;
            if is_class_name(&value) {
                value = format!("\"{value}\"");
            } else if value == "]" {
                value = "\"\"".to_string();
                self.pos -= 1;
            }
            if !is_attr_value(&value) {
                return false;
            }
            if self.peek() == Some("i") {
                ignore_case = true;
                self.pos += 1;
            }
        }
        if self.peek() != Some("]") {
            return false;
        }

        match kind {
            AttributeType::Classes | AttributeType::LocalName | AttributeType::None => {}
            AttributeType::GlobalName | AttributeType::Id | AttributeType::IdRef => {
                if matches!(op, "=" | "~=" | "$=") && value != "\"\"" && !ignore_case {
                    value.pop();
                    value.push_str(&self.virtualization.id_suffix);
                    value.push('"');
                } else if !matches!(op, "|=" | "") {
                    return false;
                }
            }
            AttributeType::Uri | AttributeType::UriFragment => {
                if !op.is_empty() {
                    return false;
                }
            }
            _ => return false,
        }

        self.attrs.push('[');
        self.attrs
            .push_str(&escape_with_backslash(&name, |c| is_word_char(c) || c == '-'));
        self.attrs.push_str(op);
        self.attrs.push_str(&value);
        self.attrs.push_str(if ignore_case { " i]" } else { "]" });
        true
    }

    fn pseudo_class(&mut self) -> bool {
        let Some(name) = self.tokens.get(self.pos + 1) else {
            return false;
        };
        if !PSEUDO_CLASSES.contains(&name.as_str()) {
            return false;
        }
        self.pseudo.push(':');
        self.pseudo.push_str(name);
        self.pos += 1;
        true
    }

    /// Consumes the whole compound selector or reports it untranslatable.
    fn translate(mut self, combinator: &str) -> Option<String> {
        self.element_name();
        while let Some(token) = self.peek() {
            let ok = match token {
                t if t.starts_with('#') => self.id(t),
                "." => self.class(),
                "[" if self.pos + 1 < self.tokens.len() => self.attribute(),
                ":" => self.pseudo_class(),
                _ => false,
            };
            if !ok {
                return None;
            }
            self.pos += 1;
        }
        let head = escape_with_backslash(&format!("{}{}", self.element, self.class_id), |c| {
            is_word_char(c) || matches!(c, ' ' | '.' | '*' | '#' | '-')
        });
        Some(format!("{head}{}{}{combinator}", self.attrs, self.pseudo))
    }
}

fn translate_complex(tokens: &[String], virtualization: &Virtualization<'_>) -> Option<String> {
    let mut tokens = tokens;
    while tokens.first().is_some_and(|t| t == " ") {
        tokens = &tokens[1..];
    }
    while tokens.last().is_some_and(|t| t == " ") {
        tokens = &tokens[..tokens.len() - 1];
    }

    let mut parts = Vec::new();
    let mut start = 0;
    let mut translate = |from: usize, to: usize, combinator: &str| -> Option<()> {
        let compound = Compound {
            virtualization,
            tokens: &tokens[from..to],
            pos: 0,
            element: String::new(),
            class_id: String::new(),
            attrs: String::new(),
            pseudo: String::new(),
        };
        let translated = compound.translate(combinator)?;
        if !translated.is_empty() {
            parts.push(translated);
        }
        Some(())
    };
    for (i, token) in tokens.iter().enumerate() {
        if token == " " || is_combinator(token) {
            translate(start, i, token)?;
            start = i + 1;
        }
    }
    translate(start, tokens.len(), "")?;

    if parts.is_empty() {
        return Some(String::new());
    }
    let joined = parts.concat();
    Some(match &virtualization.container_class {
        Some(class) => format!(".{class} {joined}"),
        None => joined,
    })
}

/// Callback for complex selectors that cannot be made safe. Returning
/// `false` aborts the whole list.
pub type UntranslatableHandler<'a> = &'a mut dyn FnMut(&[String]) -> bool;

/// Sanitizes a comma separated selector list.
///
/// Returns the safe complex selectors, or `None` when `on_untranslatable`
/// asked to abort. Without a handler unsafe selectors are silently dropped.
pub fn sanitize_css_selectors(
    tokens: &[String],
    virtualization: &Virtualization<'_>,
    mut on_untranslatable: Option<UntranslatableHandler<'_>>,
) -> Option<Vec<String>> {
    let compacted = compact(tokens);
    let mut safe = Vec::new();
    for complex in compacted.split(|t| t == ",") {
        match translate_complex(complex, virtualization) {
            Some(selector) if !selector.is_empty() => safe.push(selector),
            Some(_) => {}
            None => {
                log::debug!(target: "sanitizer.css", "dropping selector {:?}", complex.concat());
                if let Some(handler) = on_untranslatable.as_mut() {
                    if !handler(complex) {
                        return None;
                    }
                }
            }
        }
    }
    Some(safe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex_css;

    fn scoped() -> Virtualization<'static> {
        Virtualization {
            container_class: Some("sandbox".to_string()),
            id_suffix: "-x".to_string(),
            ..Virtualization::default()
        }
    }

    fn sanitize(selectors: &str, virtualization: &Virtualization<'_>) -> Vec<String> {
        sanitize_css_selectors(&lex_css(selectors), virtualization, None).unwrap_or_default()
    }

    #[test]
    fn scopes_and_suffixes() {
        assert_eq!(
            sanitize("p.note > #intro a:hover, li", &scoped()),
            vec![".sandbox p.note>#intro-x a:hover", ".sandbox li"]
        );
    }

    #[test]
    fn drops_unsafe_elements_and_ids() {
        let v = scoped();
        assert_eq!(sanitize("script, p", &v), vec![".sandbox p"]);
        assert_eq!(sanitize("#_hidden, #ok", &v), vec![".sandbox #ok-x"]);
        assert_eq!(sanitize("#bad__", &v), Vec::<String>::new());
    }

    #[test]
    fn checks_attribute_selectors_against_the_schema() {
        let v = Virtualization::default();
        assert_eq!(sanitize("a[title=x]", &v), vec!["a[title=\"x\"]"]);
        assert_eq!(sanitize("a[href]", &v), vec!["a[href]"]);
        assert!(sanitize("a[href^=\"javascript\"]", &v).is_empty());
        assert!(sanitize("a[onclick]", &v).is_empty());
        assert_eq!(sanitize("a[ title = \"y\" i ]", &v), vec!["a[title=\"y\" i]"]);
    }

    #[test]
    fn id_valued_attributes_get_the_suffix() {
        let v = scoped();
        assert_eq!(sanitize("[id=main]", &v), vec![".sandbox [id=\"main-x\"]"]);
        assert!(sanitize("[id^=main]", &v).is_empty());
        assert!(sanitize("[id*=main]", &v).is_empty());
        assert_eq!(sanitize("[id|=main]", &v), vec![".sandbox [id|=\"main\"]"]);
    }

    #[test]
    fn universal_selector_skips_the_tag_policy() {
        let v = Virtualization::default();
        assert_eq!(sanitize("*", &v), vec!["*"]);
        assert_eq!(sanitize("p *, *.a", &v), vec!["p *", "*.a"]);
        assert_eq!(sanitize("*", &scoped()), vec![".sandbox *"]);
    }

    #[test]
    fn unknown_pseudo_classes_are_untranslatable() {
        let v = Virtualization::default();
        assert!(sanitize("a:visited-x", &v).is_empty());
        assert!(sanitize("a::before", &v).is_empty());
        assert!(sanitize("a:", &v).is_empty());
    }

    #[test]
    fn handler_can_abort_the_list() {
        let v = Virtualization::default();
        let mut seen = Vec::new();
        let mut handler = |tokens: &[String]| {
            seen.push(tokens.concat());
            false
        };
        let result = sanitize_css_selectors(&lex_css("p, script"), &v, Some(&mut handler));
        assert_eq!(result, None);
        assert_eq!(seen, vec![" script".to_string()]);
    }

    #[test]
    fn tag_policy_can_rename_elements() {
        let rename = |name: &str, attribs: Attributes| match name {
            "blink" => TagDecision::rename("span", attribs),
            _ => TagDecision::keep(attribs),
        };
        let v = Virtualization {
            tag_policy: &rename,
            ..Virtualization::default()
        };
        assert_eq!(sanitize("blink b", &v), vec!["span b"]);
    }

    #[test]
    fn attribute_names_can_be_virtualized() {
        let mapper = |_: &str, attr: &str| Some(format!("data-{attr}"));
        let v = Virtualization {
            virtualize_attr_name: Some(&mapper),
            ..Virtualization::default()
        };
        assert_eq!(sanitize("[foo]", &v), vec!["[data-foo]"]);
    }
}
