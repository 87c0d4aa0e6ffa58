//! CSS sanitizing: a forgiving lexer, a property whitelist, selector
//! scoping, media queries and whole stylesheets with `@import`.
//!
//! Everything works on the normalized token strings produced by
//! [`lex_css`]; malformed input is never an error, only dropped.

mod error;
pub mod import;
pub mod lexer;
pub mod media;
pub mod parser;
pub mod property;
pub mod schema;
pub mod selector;
pub mod stylesheet;

pub use error::ImportError;
pub use import::{
    ImportId, ImportRequest, ImportSession, MAX_IMPORT_DEPTH, sanitize_stylesheet_with_loader,
};
pub use lexer::{decode_css, escape_css_string, lex_css};
pub use media::sanitize_media_query;
pub use parser::{StylesheetHandler, parse_css_declarations, parse_declarations, parse_stylesheet};
pub use property::{
    CssUriRewriter, NO_EFFECT_URL, PropertyContext, normalize_url, sanitize_css_property,
    without_vendor_prefix,
};
pub use schema::{PropBits, PropertySchema, is_known_property, property_schema};
pub use selector::{AttrNameMapper, UntranslatableHandler, Virtualization, sanitize_css_selectors};
pub use stylesheet::sanitize_stylesheet;
