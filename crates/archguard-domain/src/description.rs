//! Human-readable labels threaded through transformers, conditions, and rules.

use crate::error::Error;
use std::fmt;
use std::sync::Arc;

/// Immutable, never-empty label. Equality is by string value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Description(Arc<str>);

impl Description {
    /// Build a description from user text. Blank text is rejected.
    pub fn new(text: impl AsRef<str>) -> Result<Self, Error> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyDescription);
        }
        Ok(Self(Arc::from(trimmed)))
    }

    /// Internal constructor for text that is non-empty by construction.
    pub(crate) fn fixed(text: impl AsRef<str>) -> Self {
        debug_assert!(!text.as_ref().trim().is_empty());
        Self(Arc::from(text.as_ref().trim()))
    }

    /// `"{base} {operator} {detail}"`.
    pub fn compose(base: &Description, operator: &str, detail: &Description) -> Description {
        Self::fixed(format!("{base} {operator} {detail}"))
    }

    /// `"{word} {self}"`, e.g. `"no classes"`.
    pub fn prefixed(&self, word: &str) -> Description {
        Self::fixed(format!("{word} {self}"))
    }

    pub fn joined(&self, operator: &str, other: &Description) -> Description {
        Self::compose(self, operator, other)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Description({:?})", self.as_str())
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Description {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Description {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
