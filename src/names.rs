use html::AttributeType;

/// Rewrites or rejects name-token attribute values: ids, id references,
/// names and class lists.
///
/// `kind` is the attribute's schema type. Fragment references (`href="#x"`)
/// arrive without their `#` as [`AttributeType::UriFragment`].
pub trait NameTokenPolicy {
    fn apply(&self, value: &str, kind: AttributeType) -> Option<String>;
}

impl<F> NameTokenPolicy for F
where
    F: Fn(&str, AttributeType) -> Option<String>,
{
    fn apply(&self, value: &str, kind: AttributeType) -> Option<String> {
        self(value, kind)
    }
}

/// Scopes names to one document by appending `suffix`, so that stylesheet
/// selectors sanitized with the same suffix keep matching.
///
/// Names ending in `__` are reserved and dropped. Class names are
/// validated but left unsuffixed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopedNames {
    pub suffix: String,
}

impl ScopedNames {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    fn scope(&self, name: &str) -> Option<String> {
        let valid = !name.is_empty()
            && !name.ends_with("__")
            && !name.contains(|c: char| c.is_ascii_whitespace());
        valid.then(|| format!("{name}{}", self.suffix))
    }
}

fn is_class_name(class: &str) -> bool {
    !class.starts_with('_')
        && !class.ends_with("__")
        && class
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b':' | b'_' | b'-'))
}

fn join_tokens(tokens: impl Iterator<Item = String>) -> Option<String> {
    let joined = tokens.collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}

impl NameTokenPolicy for ScopedNames {
    fn apply(&self, value: &str, kind: AttributeType) -> Option<String> {
        match kind {
            AttributeType::Classes => join_tokens(
                value
                    .split_ascii_whitespace()
                    .filter(|class| is_class_name(class))
                    .map(str::to_string),
            ),
            AttributeType::IdRefs => join_tokens(
                value
                    .split_ascii_whitespace()
                    .filter_map(|name| self.scope(name)),
            ),
            _ => self.scope(value.trim_matches(|c: char| c.is_ascii_whitespace())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_and_references_are_suffixed() {
        let names = ScopedNames::new("-v1");
        assert_eq!(names.apply("x", AttributeType::Id), Some("x-v1".to_string()));
        assert_eq!(names.apply(" x ", AttributeType::IdRef), Some("x-v1".to_string()));
        assert_eq!(
            names.apply("a  b", AttributeType::IdRefs),
            Some("a-v1 b-v1".to_string())
        );
        assert_eq!(names.apply("top", AttributeType::UriFragment), Some("top-v1".to_string()));
    }

    #[test]
    fn reserved_and_empty_names_are_dropped() {
        let names = ScopedNames::new("-v1");
        assert_eq!(names.apply("frame__", AttributeType::GlobalName), None);
        assert_eq!(names.apply("", AttributeType::Id), None);
        assert_eq!(names.apply("a b", AttributeType::Id), None);
        assert_eq!(names.apply("ok__ x__", AttributeType::IdRefs), None);
    }

    #[test]
    fn classes_are_filtered_not_suffixed() {
        let names = ScopedNames::new("-v1");
        assert_eq!(
            names.apply("note _private big__ ok:hover", AttributeType::Classes),
            Some("note ok:hover".to_string())
        );
        assert_eq!(names.apply("a<b", AttributeType::Classes), None);
    }
}
