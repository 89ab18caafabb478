//! Described predicates: the `that(...)` half of a rule.
//!
//! A predicate narrows the elements a transformer selects; conditions built from
//! predicates live in [`crate::conditions`].

use crate::description::Description;
use crate::error::Error;
use std::fmt;
use std::sync::Arc;

mod class;
mod utils;

pub use class::{fully_qualified_name, reside_in_a_package, reside_in_any_package, simple_name};
pub(crate) use utils::NameMatcher;

type TestFn<T> = dyn Fn(&T) -> bool + Send + Sync;

pub struct DescribedPredicate<T> {
    description: Description,
    test: Arc<TestFn<T>>,
}

impl<T> Clone for DescribedPredicate<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            test: Arc::clone(&self.test),
        }
    }
}

impl<T> fmt::Debug for DescribedPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescribedPredicate")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> DescribedPredicate<T> {
    pub fn new<F>(description: Description, test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            description,
            test: Arc::new(test),
        }
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn test(&self, item: &T) -> bool {
        (self.test)(item)
    }

    pub fn described_as(&self, text: impl AsRef<str>) -> Result<Self, Error> {
        Ok(Self {
            description: Description::new(text)?,
            test: Arc::clone(&self.test),
        })
    }

    pub fn and(&self, other: &DescribedPredicate<T>) -> Self {
        let (a, b) = (Arc::clone(&self.test), Arc::clone(&other.test));
        Self::new(self.description.joined("and", &other.description), move |t| {
            a(t) && b(t)
        })
    }

    pub fn or(&self, other: &DescribedPredicate<T>) -> Self {
        let (a, b) = (Arc::clone(&self.test), Arc::clone(&other.test));
        Self::new(self.description.joined("or", &other.description), move |t| {
            a(t) || b(t)
        })
    }
}

/// Logical complement, described as `"not {predicate}"`.
pub fn not<T: 'static>(predicate: DescribedPredicate<T>) -> DescribedPredicate<T> {
    let inner = Arc::clone(&predicate.test);
    DescribedPredicate::new(predicate.description.prefixed("not"), move |t| !inner(t))
}
