//! Re-serializes parse events into balanced markup under a [`TagPolicy`].

use crate::entities::{escape_attrib, normalize_rcdata};
use crate::policy::{TagDecision, TagPolicy};
use crate::sax::{Attributes, Flow, SaxHandler, SaxParser};
use crate::schema::{ElementFlags, element_flags};

#[derive(Debug)]
struct OpenElement {
    orig: String,
    rep: String,
}

/// A [`SaxHandler`] that writes sanitized markup to an output buffer.
///
/// Unknown and foldable elements are elided while their content is kept.
/// A rejected non-void element suppresses everything up to the next end
/// tag. Every accepted element is closed by the time the document ends.
pub struct HtmlSanitizer<'p, P: TagPolicy + ?Sized> {
    policy: &'p P,
    out: String,
    stack: Vec<OpenElement>,
    ignoring: bool,
}

fn flags_of(tag: &str) -> ElementFlags {
    element_flags(tag).unwrap_or_else(ElementFlags::empty)
}

impl<'p, P: TagPolicy + ?Sized> HtmlSanitizer<'p, P> {
    pub fn new(policy: &'p P) -> Self {
        Self {
            policy,
            out: String::new(),
            stack: Vec::new(),
            ignoring: false,
        }
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn into_output(self) -> String {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if !self.ignoring {
            self.out.push_str(text);
        }
    }

    fn close(&mut self, rep: &str) {
        self.out.push_str("</");
        self.out.push_str(rep);
        self.out.push('>');
    }

    /// Index of the open element an end tag for `tag` closes, if any.
    fn matching_open(&self, tag: &str, flags: ElementFlags) -> Option<usize> {
        if !flags.contains(ElementFlags::OPTIONAL_ENDTAG) {
            return self.stack.iter().rposition(|open| open.orig == tag);
        }
        for (index, open) in self.stack.iter().enumerate().rev() {
            if open.orig == tag {
                return Some(index);
            }
            if !flags_of(&open.orig).contains(ElementFlags::OPTIONAL_ENDTAG) {
                return None;
            }
        }
        None
    }
}

impl<P: TagPolicy + ?Sized> SaxHandler for HtmlSanitizer<'_, P> {
    fn start_document(&mut self) -> Flow {
        self.stack.clear();
        self.ignoring = false;
        Flow::Continue
    }

    fn start_tag(&mut self, tag: &str, attribs: Attributes) -> Flow {
        if self.ignoring {
            return Flow::Continue;
        }
        let Some(orig_flags) = element_flags(tag) else {
            log::trace!(target: "sanitizer.html", "eliding unknown element <{tag}>");
            return Flow::Continue;
        };
        if orig_flags.contains(ElementFlags::FOLDABLE) {
            return Flow::Continue;
        }

        let (attribs, rep) = match self.policy.decide(tag, attribs) {
            TagDecision::Reject => {
                log::trace!(target: "sanitizer.html", "policy rejected <{tag}>");
                self.ignoring = !orig_flags.contains(ElementFlags::EMPTY);
                return Flow::Continue;
            }
            TagDecision::Accept { attribs, tag_name } => {
                (attribs, tag_name.unwrap_or_else(|| tag.to_string()))
            }
        };
        let rep_flags = if rep == tag { orig_flags } else { flags_of(&rep) };

        // A renamed optional-end-tag sibling would otherwise nest inside the
        // previous one.
        if orig_flags.contains(ElementFlags::OPTIONAL_ENDTAG) {
            let renamed_sibling = self
                .stack
                .last()
                .is_some_and(|top| top.orig == tag && (top.rep != rep || rep != tag));
            if renamed_sibling {
                if let Some(top) = self.stack.pop() {
                    self.close(&top.rep);
                }
            }
        }

        let is_empty = orig_flags.contains(ElementFlags::EMPTY);
        if !is_empty {
            self.stack.push(OpenElement {
                orig: tag.to_string(),
                rep: rep.clone(),
            });
        }

        self.out.push('<');
        self.out.push_str(&rep);
        for (name, value) in &attribs {
            if let Some(value) = value {
                self.out.push(' ');
                self.out.push_str(name);
                self.out.push_str("=\"");
                self.out.push_str(&escape_attrib(value));
                self.out.push('"');
            }
        }
        self.out.push('>');

        if is_empty && !rep_flags.contains(ElementFlags::EMPTY) {
            self.close(&rep);
        }
        Flow::Continue
    }

    fn end_tag(&mut self, tag: &str) -> Flow {
        if self.ignoring {
            self.ignoring = false;
            return Flow::Continue;
        }
        let Some(flags) = element_flags(tag) else {
            return Flow::Continue;
        };
        if flags.intersects(ElementFlags::EMPTY | ElementFlags::FOLDABLE) {
            return Flow::Continue;
        }
        let Some(index) = self.matching_open(tag, flags) else {
            log::trace!(target: "sanitizer.html", "dropping unmatched </{tag}>");
            return Flow::Continue;
        };
        for open in self.stack.split_off(index).into_iter().rev() {
            self.close(&open.rep);
        }
        Flow::Continue
    }

    fn pcdata(&mut self, text: &str) -> Flow {
        self.emit(text);
        Flow::Continue
    }

    fn rcdata(&mut self, text: &str) -> Flow {
        self.emit(text);
        Flow::Continue
    }

    /// Raw text stays raw only inside an accepted `<style>` or `<script>`.
    /// Other raw-text bodies (`<iframe>`, `<template>`, ...) can hold live
    /// markup and are escaped.
    fn cdata(&mut self, text: &str) -> Flow {
        let raw_parent = self.stack.last().is_some_and(|open| {
            flags_of(&open.rep).intersects(ElementFlags::STYLE | ElementFlags::SCRIPT)
        });
        if raw_parent {
            self.emit(text);
        } else {
            self.emit(&normalize_rcdata(text));
        }
        Flow::Continue
    }

    fn end_document(&mut self) -> Flow {
        while let Some(open) = self.stack.pop() {
            self.close(&open.rep);
        }
        Flow::Continue
    }
}

/// Sanitizes `html`, asking `policy` about every known, non-foldable start
/// tag.
pub fn sanitize_with_policy<P: TagPolicy + ?Sized>(html: &str, policy: &P) -> String {
    let mut sanitizer = HtmlSanitizer::new(policy);
    SaxParser::new(html).run(&mut sanitizer);
    sanitizer.into_output()
}
