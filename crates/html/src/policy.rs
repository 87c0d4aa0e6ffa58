use crate::sax::Attributes;

/// Outcome of asking a [`TagPolicy`] about one start tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagDecision {
    /// Drop the element. Unless it is a void element its content is dropped
    /// up to the next end tag.
    Reject,
    /// Keep the element with `attribs`, optionally renamed to `tag_name`.
    Accept {
        attribs: Attributes,
        tag_name: Option<String>,
    },
}

impl TagDecision {
    pub fn keep(attribs: Attributes) -> Self {
        Self::Accept {
            attribs,
            tag_name: None,
        }
    }

    pub fn rename(tag_name: impl Into<String>, attribs: Attributes) -> Self {
        Self::Accept {
            attribs,
            tag_name: Some(tag_name.into()),
        }
    }
}

/// Decides, per start tag, whether it survives and with which attributes.
///
/// Only called for elements known to the schema and not foldable.
pub trait TagPolicy {
    fn decide(&self, tag_name: &str, attribs: Attributes) -> TagDecision;
}

impl<F> TagPolicy for F
where
    F: Fn(&str, Attributes) -> TagDecision,
{
    fn decide(&self, tag_name: &str, attribs: Attributes) -> TagDecision {
        self(tag_name, attribs)
    }
}
