use std::fmt;

use crate::import::ImportId;

/// Misuse of an [`crate::ImportSession`] by its driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportError {
    /// No import with this id was ever requested.
    UnknownImport(ImportId),
    /// The import was already filled.
    AlreadyResolved(ImportId),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnknownImport(id) => write!(f, "{id} was never requested"),
            ImportError::AlreadyResolved(id) => write!(f, "{id} is already resolved"),
        }
    }
}

impl std::error::Error for ImportError {}
