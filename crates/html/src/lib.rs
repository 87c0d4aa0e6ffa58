//! HTML4 element/attribute schema, a forgiving event parser, and a
//! policy-driven re-serializer that always emits balanced markup.

pub mod entities;
pub mod policy;
pub mod sanitizer;
pub mod sax;
pub mod schema;
mod split;

pub use entities::{escape_attrib, normalize_rcdata, strip_nuls, unescape_entities};
pub use policy::{TagDecision, TagPolicy};
pub use sanitizer::{HtmlSanitizer, sanitize_with_policy};
pub use sax::{Attributes, Flow, ParseStatus, SaxHandler, SaxParser};
pub use schema::{
    AttributeType, ElementFlags, LoaderType, UriEffect, attribute_type, element_flags, loader_type,
    uri_effect,
};
pub use split::split_html;
