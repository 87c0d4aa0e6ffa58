//! A small, relaxed URI model: parse, build from parts, resolve against a
//! base. Components are stored percent-encoded and decoded on access.

mod encode;
mod error;
mod params;
mod path;

use std::fmt;

pub use encode::{decode, encode_component, encode_uri};
pub use error::UriError;
pub use path::collapse_dots;

const DISALLOWED_IN_SCHEME_OR_CREDENTIALS: &[u8] = b"#/?@";
const DISALLOWED_IN_PATH: &[u8] = b"#?";

/// A mutable URI.
///
/// Every component is optional and kept in raw form; `toString` order is
/// `scheme:` `//credentials@domain:port` `path` `?query` `#fragment`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Uri {
    scheme: Option<String>,
    credentials: Option<String>,
    domain: Option<String>,
    port: Option<u16>,
    path: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
}

fn non_empty(part: &str) -> Option<String> {
    (!part.is_empty()).then(|| part.to_string())
}

fn checked_port(port: u32) -> Result<u16, UriError> {
    match u16::try_from(port) {
        Ok(p) if p != 0 => Ok(p),
        _ => Err(UriError::BadPort(port)),
    }
}

impl Uri {
    /// Parses `text` with a permissive grammar.
    ///
    /// Returns `None` only when the fragment spans a line break or the port
    /// does not fit `1..=65535`.
    pub fn parse(text: &str) -> Option<Uri> {
        let mut uri = Uri::default();
        let mut rest = text;

        // Fragment first: everything after the first '#'.
        if let Some(hash) = rest.find('#') {
            let fragment = &rest[hash + 1..];
            if fragment.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
                return None;
            }
            uri.fragment = non_empty(fragment);
            rest = &rest[..hash];
        }
        if let Some(q) = rest.find('?') {
            uri.query = non_empty(&rest[q + 1..]);
            rest = &rest[..q];
        }

        if let Some(end) = rest.find([':', '/', '?', '#']) {
            if end > 0 && rest.as_bytes()[end] == b':' {
                uri.scheme = Some(rest[..end].to_string());
                rest = &rest[end + 1..];
            }
        }

        if let Some(after_slashes) = rest.strip_prefix("//") {
            let authority_end = after_slashes.find('/').unwrap_or(after_slashes.len());
            let authority = &after_slashes[..authority_end];
            let mut host = authority;
            if let Some(at) = authority.rfind('@') {
                uri.credentials = non_empty(&authority[..at]);
                host = &authority[at + 1..];
            }
            let domain_end = host.find([':', '@']).unwrap_or(host.len());
            uri.domain = non_empty(&host[..domain_end]);
            let mut tail = &host[domain_end..];
            if let Some(port_text) = tail.strip_prefix(':') {
                let digits = port_text.bytes().take_while(u8::is_ascii_digit).count();
                if digits > 0 {
                    let port = port_text[..digits]
                        .parse::<u32>()
                        .ok()
                        .and_then(|p| checked_port(p).ok());
                    let Some(port) = port else {
                        log::trace!(target: "sanitizer.uri", "rejecting port in {text:?}");
                        return None;
                    };
                    uri.port = Some(port);
                    tail = &port_text[digits..];
                }
            }
            // Leftover authority text (`:abc`, a stray `@`) reads as path.
            let path_start = authority.len() - tail.len();
            rest = &after_slashes[path_start..];
        }

        uri.path = non_empty(rest);
        Some(uri)
    }

    /// Builds a URI from unencoded parts, escaping each one for its position.
    pub fn create(
        scheme: Option<&str>,
        credentials: Option<&str>,
        domain: Option<&str>,
        port: Option<u32>,
        path: Option<&str>,
        query: Option<&str>,
        fragment: Option<&str>,
    ) -> Result<Uri, UriError> {
        let mut uri = Uri {
            scheme: scheme.map(|s| encode_uri(s, DISALLOWED_IN_SCHEME_OR_CREDENTIALS)),
            credentials: credentials.map(|c| encode_uri(c, DISALLOWED_IN_SCHEME_OR_CREDENTIALS)),
            domain: domain.map(encode_component),
            port: port.map(checked_port).transpose()?,
            path: path.map(|p| encode_uri(p, DISALLOWED_IN_PATH)),
            query: None,
            fragment: fragment.map(encode_component),
        };
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            uri.query = Some(encode::encode_raw_query(query));
        }
        Ok(uri)
    }

    /// Resolves `relative` against `self` (RFC 3986 section 5.2, relaxed).
    pub fn resolve(&self, relative: &Uri) -> Uri {
        let mut absolute = self.clone();

        let mut overridden = relative.has_scheme();
        if overridden {
            absolute.scheme = relative.scheme.clone();
        } else {
            overridden = relative.has_credentials();
        }
        if overridden {
            absolute.credentials = relative.credentials.clone();
        } else {
            overridden = relative.has_domain();
        }
        if overridden {
            absolute.set_raw_domain(relative.domain.clone());
        } else {
            overridden = relative.has_port();
        }

        let raw_path = relative.raw_path();
        let mut simplified = raw_path.map(collapse_dots);
        if overridden {
            absolute.port = relative.port;
            simplified = simplified.map(|p| path::strip_extra_parents(&p).to_string());
        } else {
            overridden = raw_path.is_some();
            if let Some(relative_path) = raw_path {
                if !relative_path.starts_with('/') {
                    let base = collapse_dots(absolute.raw_path().unwrap_or(""));
                    let base = path::strip_extra_parents(&base);
                    let dir = base.rfind('/').map_or("", |slash| &base[..=slash]);
                    let merged = collapse_dots(&format!("{dir}{}", collapse_dots(relative_path)));
                    simplified = Some(path::strip_extra_parents(&merged).to_string());
                }
            }
        }

        if overridden {
            let path = simplified.map(|p| path::clamp_to_root(&p));
            absolute.set_raw_path(path);
        } else {
            overridden = relative.has_query();
        }
        if overridden {
            absolute.set_raw_query(relative.query.clone());
        } else {
            overridden = relative.has_fragment();
        }
        if overridden {
            absolute.fragment = relative.fragment.clone();
        }
        absolute
    }

    pub fn scheme(&self) -> Option<String> {
        self.scheme.as_deref().map(|s| decode(s).to_ascii_lowercase())
    }

    pub fn raw_scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn set_scheme(&mut self, scheme: Option<&str>) -> &mut Self {
        self.scheme = scheme.map(|s| encode_uri(s, DISALLOWED_IN_SCHEME_OR_CREDENTIALS));
        self
    }

    pub fn set_raw_scheme(&mut self, scheme: Option<String>) -> &mut Self {
        self.scheme = scheme.filter(|s| !s.is_empty());
        self
    }

    pub fn has_scheme(&self) -> bool {
        self.scheme.is_some()
    }

    pub fn credentials(&self) -> Option<String> {
        self.credentials.as_deref().map(decode)
    }

    pub fn raw_credentials(&self) -> Option<&str> {
        self.credentials.as_deref()
    }

    pub fn set_credentials(&mut self, credentials: Option<&str>) -> &mut Self {
        self.credentials =
            credentials.map(|c| encode_uri(c, DISALLOWED_IN_SCHEME_OR_CREDENTIALS));
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn domain(&self) -> Option<String> {
        self.domain.as_deref().map(decode)
    }

    pub fn raw_domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn set_domain(&mut self, domain: Option<&str>) -> &mut Self {
        self.set_raw_domain(domain.map(encode_component))
    }

    /// Sets the encoded domain and re-anchors a relative path under it.
    pub fn set_raw_domain(&mut self, domain: Option<String>) -> &mut Self {
        self.domain = domain.filter(|d| !d.is_empty());
        let path = self.path.take();
        self.set_raw_path(path)
    }

    pub fn has_domain(&self) -> bool {
        self.domain.is_some()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn set_port(&mut self, port: Option<u32>) -> Result<&mut Self, UriError> {
        self.port = port.map(checked_port).transpose()?;
        Ok(self)
    }

    pub fn has_port(&self) -> bool {
        self.port.is_some()
    }

    pub fn path(&self) -> Option<String> {
        self.path.as_deref().map(decode)
    }

    pub fn raw_path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: Option<&str>) -> &mut Self {
        self.set_raw_path(path.map(|p| encode_uri(p, DISALLOWED_IN_PATH)))
    }

    /// Paths must start with `/` once a domain is present.
    pub fn set_raw_path(&mut self, path: Option<String>) -> &mut Self {
        self.path = match path.filter(|p| !p.is_empty()) {
            Some(p) if self.domain.is_some() && !p.starts_with('/') => Some(format!("/{p}")),
            other => other,
        };
        self
    }

    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }

    /// Decoded query; `+` reads as a space.
    pub fn query(&self) -> Option<String> {
        self.query.as_deref().map(|q| decode(q).replace('+', " "))
    }

    pub fn raw_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn set_query(&mut self, query: Option<&str>) -> &mut Self {
        self.query = query.filter(|q| !q.is_empty()).map(encode_component);
        self
    }

    pub fn set_raw_query(&mut self, query: Option<String>) -> &mut Self {
        self.query = query.filter(|q| !q.is_empty());
        self
    }

    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    pub fn fragment(&self) -> Option<String> {
        self.fragment.as_deref().map(decode)
    }

    pub fn raw_fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn set_fragment(&mut self, fragment: Option<&str>) -> &mut Self {
        self.fragment = fragment.filter(|f| !f.is_empty()).map(encode_component);
        self
    }

    pub fn set_raw_fragment(&mut self, fragment: Option<String>) -> &mut Self {
        self.fragment = fragment.filter(|f| !f.is_empty());
        self
    }

    pub fn has_fragment(&self) -> bool {
        self.fragment.is_some()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(domain) = &self.domain {
            f.write_str("//")?;
            if let Some(credentials) = &self.credentials {
                write!(f, "{credentials}@")?;
            }
            f.write_str(domain)?;
            if let Some(port) = self.port {
                write!(f, ":{port}")?;
            }
        }
        if let Some(path) = &self.path {
            f.write_str(path)?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

/// Parses both strings and resolves `relative` against `base`.
pub fn resolve(base: &str, relative: &str) -> Option<String> {
    let base = Uri::parse(base)?;
    let relative = Uri::parse(relative)?;
    Some(base.resolve(&relative).to_string())
}
