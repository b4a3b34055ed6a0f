use std::collections::BTreeSet;

/// Placeholder written in place of every masked value.
pub const SENTINEL: &str = "**********";

/// Names of the parameters whose values must never reach the log.
///
/// Lookups are exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskSet {
    names: BTreeSet<String>,
}

impl MaskSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MaskSet {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for MaskSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        MaskSet::new(iter)
    }
}
