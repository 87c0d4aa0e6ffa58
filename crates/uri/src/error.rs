use std::fmt;

/// Contract violations when building a [`crate::Uri`] from parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UriError {
    /// Port outside `1..=65535`.
    BadPort(u32),
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UriError::BadPort(port) => write!(f, "bad port number {port}"),
        }
    }
}

impl std::error::Error for UriError {}
