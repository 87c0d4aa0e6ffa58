use css::CssUriRewriter;
use html::{LoaderType, UriEffect};
use uri::Uri;

/// Schemes a URI may carry and still reach a [`UriRewriter`]. Relative
/// URIs have no scheme and are always passed on.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "geo", "mailto", "sms", "tel"];

/// Where a URI being rewritten was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UriHints<'a> {
    /// An attribute value in markup.
    Markup { tag: &'a str, attribute: &'a str },
    /// A `url(...)` inside a CSS property value.
    Css { property: &'a str },
}

/// Rewrites (or rejects) URIs that survived the scheme check.
///
/// `effect` and `loader` come from the attribute schema and are `None`
/// for attributes the schema does not annotate. Returning `None` drops the
/// attribute, or turns a CSS URL into `about:blank`.
pub trait UriRewriter {
    fn rewrite(
        &self,
        uri: &Uri,
        effect: Option<UriEffect>,
        loader: Option<LoaderType>,
        hints: &UriHints<'_>,
    ) -> Option<String>;
}

impl<F> UriRewriter for F
where
    F: Fn(&Uri, Option<UriEffect>, Option<LoaderType>, &UriHints<'_>) -> Option<String>,
{
    fn rewrite(
        &self,
        uri: &Uri,
        effect: Option<UriEffect>,
        loader: Option<LoaderType>,
        hints: &UriHints<'_>,
    ) -> Option<String> {
        self(uri, effect, loader, hints)
    }
}

/// Keeps every URI that passes the scheme check unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThroughUris;

impl UriRewriter for PassThroughUris {
    fn rewrite(
        &self,
        uri: &Uri,
        _effect: Option<UriEffect>,
        _loader: Option<LoaderType>,
        _hints: &UriHints<'_>,
    ) -> Option<String> {
        Some(uri.to_string())
    }
}

fn allowed_scheme(uri: &Uri) -> bool {
    uri.scheme()
        .is_none_or(|scheme| ALLOWED_SCHEMES.contains(&scheme.as_str()))
}

/// Parses `value`, enforces the scheme allow-list and hands the result to
/// `rewriter`.
pub(crate) fn safe_uri(
    value: &str,
    effect: Option<UriEffect>,
    loader: Option<LoaderType>,
    hints: &UriHints<'_>,
    rewriter: &dyn UriRewriter,
) -> Option<String> {
    let Some(uri) = Uri::parse(value) else {
        log::debug!(target: "sanitizer.html", "unparseable uri {value:?}");
        return None;
    };
    if !allowed_scheme(&uri) {
        log::debug!(target: "sanitizer.html", "disallowed scheme in {value:?}");
        return None;
    }
    rewriter.rewrite(&uri, effect, loader, hints)
}

/// Lets a markup [`UriRewriter`] serve CSS `url(...)` values.
///
/// CSS URLs are reported as same-document, sandboxed loads.
#[derive(Clone, Copy)]
pub struct CssUris<'a>(pub &'a dyn UriRewriter);

impl CssUriRewriter for CssUris<'_> {
    fn rewrite(&self, url: &str, property: &str) -> Option<String> {
        safe_uri(
            url,
            Some(UriEffect::SameDocument),
            Some(LoaderType::Sandboxed),
            &UriHints::Css { property },
            self.0,
        )
    }
}

impl std::fmt::Debug for CssUris<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CssUris").finish_non_exhaustive()
    }
}
