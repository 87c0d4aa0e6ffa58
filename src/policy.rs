//! The default tag and attribute policy.

use std::fmt;

use css::{CssUriRewriter, PropertyContext, parse_css_declarations, sanitize_css_property};
use html::{
    AttributeType, Attributes, ElementFlags, TagDecision, TagPolicy, attribute_type,
    element_flags, loader_type, uri_effect,
};

use crate::audit::{AttributeChange, AuditLog, ChangeKind};
use crate::names::NameTokenPolicy;
use crate::rewriter::{CssUris, UriHints, UriRewriter, safe_uri};

/// Rejects elements the schema marks unsafe and sanitizes the attributes
/// of everything else.
///
/// Without a `uri_rewriter`, URI attributes are dropped. Without a
/// `name_tokens` policy, id and class values are kept as they are.
#[derive(Clone, Copy, Default)]
pub struct HtmlPolicy<'a> {
    pub uri_rewriter: Option<&'a dyn UriRewriter>,
    pub name_tokens: Option<&'a dyn NameTokenPolicy>,
    pub audit: Option<&'a dyn AuditLog>,
}

impl fmt::Debug for HtmlPolicy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlPolicy")
            .field("uri_rewriter", &self.uri_rewriter.is_some())
            .field("name_tokens", &self.name_tokens.is_some())
            .field("audit", &self.audit.is_some())
            .finish()
    }
}

impl HtmlPolicy<'_> {
    /// Sanitizes each value in place. Dropped attributes keep their slot
    /// with a `None` value so positions still line up with the input.
    pub fn sanitize_attributes(&self, tag_name: &str, attribs: Attributes) -> Attributes {
        attribs
            .into_iter()
            .map(|(name, old)| {
                let new = old
                    .as_deref()
                    .and_then(|value| self.attribute_value(tag_name, &name, value));
                self.report(tag_name, Some(name.as_str()), old.as_deref(), new.as_deref());
                (name, new)
            })
            .collect()
    }

    fn attribute_value(&self, tag_name: &str, name: &str, value: &str) -> Option<String> {
        let Some(kind) = attribute_type(tag_name, name) else {
            log::debug!(target: "sanitizer.html", "dropping unknown attribute {tag_name}.{name}");
            return None;
        };
        match kind {
            AttributeType::None => Some(value.to_string()),
            AttributeType::Style => self.style(value),
            AttributeType::Uri => {
                let rewriter = self.uri_rewriter?;
                let hints = UriHints::Markup {
                    tag: tag_name,
                    attribute: name,
                };
                safe_uri(
                    value,
                    uri_effect(tag_name, name),
                    loader_type(tag_name, name),
                    &hints,
                    rewriter,
                )
            }
            AttributeType::UriFragment => {
                let target = value.strip_prefix('#')?;
                let target = match self.name_tokens {
                    Some(policy) => policy.apply(target, kind)?,
                    None => target.to_string(),
                };
                Some(format!("#{target}"))
            }
            kind if kind.is_name_token() => match self.name_tokens {
                Some(policy) => policy.apply(value, kind),
                None => Some(value.to_string()),
            },
            _ => None,
        }
    }

    /// Sanitizes an inline style as a declaration list, rejoined as
    /// `prop: value ; prop: value`.
    fn style(&self, value: &str) -> Option<String> {
        let css_uris = self.uri_rewriter.map(CssUris);
        let context = PropertyContext {
            uri_rewriter: css_uris.as_ref().map(|uris| uris as &dyn CssUriRewriter),
            ..PropertyContext::default()
        };
        let mut declarations = Vec::new();
        parse_css_declarations(value, |property, tokens| {
            let safe = sanitize_css_property(property, &tokens, &context);
            if !safe.is_empty() {
                declarations.push(format!("{property}: {}", safe.join(" ")));
            }
        });
        (!declarations.is_empty()).then(|| declarations.join(" ; "))
    }

    fn report(
        &self,
        tag_name: &str,
        attrib_name: Option<&str>,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) {
        let Some(audit) = self.audit else {
            return;
        };
        let kind = match attrib_name {
            None => Some(ChangeKind::Removed),
            Some(_) => ChangeKind::classify(old_value, new_value),
        };
        if let Some(kind) = kind {
            audit.record(&AttributeChange {
                tag_name,
                attrib_name,
                old_value,
                new_value,
                kind,
            });
        }
    }
}

impl TagPolicy for HtmlPolicy<'_> {
    fn decide(&self, tag_name: &str, attribs: Attributes) -> TagDecision {
        let unsafe_element =
            element_flags(tag_name).is_none_or(|flags| flags.contains(ElementFlags::UNSAFE));
        if unsafe_element {
            log::debug!(target: "sanitizer.html", "rejecting unsafe element <{tag_name}>");
            self.report(tag_name, None, None, None);
            return TagDecision::Reject;
        }
        TagDecision::keep(self.sanitize_attributes(tag_name, attribs))
    }
}
