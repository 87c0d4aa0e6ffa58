//! Sanitizes untrusted HTML and CSS into markup and stylesheets that
//! cannot run script.
//!
//! The HTML entry points walk the input with [`html::SaxParser`] and
//! re-serialize it through a [`TagPolicy`]; [`HtmlPolicy`] is the stock
//! policy built from a [`UriRewriter`] and a [`NameTokenPolicy`].
//! Stylesheets are handled by the [`css`] crate, re-exported here.
//!
//! Nothing in this crate fails on hostile input: whatever cannot be made
//! safe is dropped.

mod audit;
mod names;
mod policy;
mod rewriter;

pub use audit::{AttributeChange, AuditLog, ChangeKind, LogAudit};
pub use css::{
    CssUriRewriter, ImportError, ImportId, ImportRequest, ImportSession, Virtualization,
    sanitize_stylesheet, sanitize_stylesheet_with_loader,
};
pub use html::{Attributes, TagDecision, TagPolicy};
pub use names::{NameTokenPolicy, ScopedNames};
pub use policy::HtmlPolicy;
pub use rewriter::{CssUris, PassThroughUris, UriHints, UriRewriter};

/// Sanitizes `html` with the default [`HtmlPolicy`].
///
/// URI attributes are dropped when `uri_rewriter` is `None`; name tokens
/// are kept unchanged when `name_tokens` is `None`.
pub fn sanitize_html(
    html: &str,
    uri_rewriter: Option<&dyn UriRewriter>,
    name_tokens: Option<&dyn NameTokenPolicy>,
) -> String {
    let policy = HtmlPolicy {
        uri_rewriter,
        name_tokens,
        audit: None,
    };
    sanitize_html_with_policy(html, &policy)
}

/// Sanitizes `html`, asking `policy` about every known start tag.
pub fn sanitize_html_with_policy<P: TagPolicy + ?Sized>(html: &str, policy: &P) -> String {
    html::sanitize_with_policy(html, policy)
}

/// Calls `handler` with each declaration of a standalone declaration list
/// such as a `style` attribute. Properties are lowercase; values are
/// normalized tokens without whitespace.
pub fn sanitize_css_declarations<F>(css: &str, handler: F)
where
    F: FnMut(&str, Vec<String>),
{
    css::parse_css_declarations(css, handler)
}

/// Starts sanitizing a stylesheet whose `@import`s are fetched by the
/// caller.
///
/// `fetch` receives one [`ImportRequest`] per import; the caller answers
/// through [`ImportSession::resolve`]. `continuation` is called after each
/// import is filled with that import's sanitized text and whether more are
/// outstanding. Read [`ImportSession::result`] once nothing is.
pub fn sanitize_stylesheet_with_externals<'v, F, C>(
    base_uri: Option<&str>,
    css: &str,
    virtualization: &'v Virtualization<'v>,
    uri_rewriter: Option<&'v dyn CssUriRewriter>,
    fetch: F,
    continuation: C,
) -> ImportSession<'v, F, C>
where
    F: FnMut(ImportRequest),
    C: FnMut(&str, bool),
{
    ImportSession::start(base_uri, css, virtualization, uri_rewriter, fetch, continuation)
}
