//! Tag filter engine
//!
//! Two independent gates decide whether an entry reaches the transports:
//! the `ignored` set is checked first and always wins, then the `allowed`
//! set acts as a whitelist when it is non-empty.

use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    allowed: HashSet<String>,
    ignored: HashSet<String>,
}

impl TagFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `tags` into the whitelist
    pub fn restrict_to<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed.extend(tags.into_iter().map(Into::into));
    }

    /// Union `tags` into the ignore list
    pub fn suppress<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(tags.into_iter().map(Into::into));
    }

    pub fn allowed(&self) -> &HashSet<String> {
        &self.allowed
    }

    pub fn ignored(&self) -> &HashSet<String> {
        &self.ignored
    }

    /// Decide whether an entry carrying `tags` may be delivered
    pub fn permits<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        if !self.ignored.is_empty() && tags.iter().any(|t| self.ignored.contains(t.as_ref())) {
            return false;
        }

        if !self.allowed.is_empty() && !tags.iter().any(|t| self.allowed.contains(t.as_ref())) {
            return false;
        }

        true
    }
}
