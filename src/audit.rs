use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Removed,
    Changed,
    Added,
}

impl ChangeKind {
    /// How a value went from `old` to `new`; `None` when it is unchanged.
    pub fn classify(old: Option<&str>, new: Option<&str>) -> Option<ChangeKind> {
        match (old, new) {
            (Some(old), Some(new)) if old == new => None,
            (None, None) => None,
            (_, None) => Some(ChangeKind::Removed),
            (None, Some(_)) => Some(ChangeKind::Added),
            (Some(_), Some(_)) => Some(ChangeKind::Changed),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Removed => "removed",
            ChangeKind::Changed => "changed",
            ChangeKind::Added => "added",
        }
    }
}

/// One edit the policy made to a start tag. A rejected tag is reported as
/// [`ChangeKind::Removed`] without an attribute name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeChange<'a> {
    pub tag_name: &'a str,
    pub attrib_name: Option<&'a str>,
    pub old_value: Option<&'a str>,
    pub new_value: Option<&'a str>,
    pub kind: ChangeKind,
}

impl fmt::Display for AttributeChange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attrib_name {
            Some(attrib) => write!(f, "{}.{attrib} {}", self.tag_name, self.kind.as_str()),
            None => write!(f, "{} {}", self.tag_name, self.kind.as_str()),
        }
    }
}

/// Receives every change the HTML policy makes.
pub trait AuditLog {
    fn record(&self, change: &AttributeChange<'_>);
}

impl<F> AuditLog for F
where
    F: Fn(&AttributeChange<'_>),
{
    fn record(&self, change: &AttributeChange<'_>) {
        self(change)
    }
}

/// Forwards changes to the `sanitizer.audit` log target.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAudit;

impl AuditLog for LogAudit {
    fn record(&self, change: &AttributeChange<'_>) {
        log::debug!(
            target: "sanitizer.audit",
            "{change}: {:?} -> {:?}",
            change.old_value,
            change.new_value
        );
    }
}
