//! Conditions: the `should(...)` half of a rule, plus the combinators over them.
//!
//! A condition checks one element and reports zero or more [`Violation`]s. An empty
//! result means the element satisfies the condition. Conditions must not panic for
//! well-formed input and must not mutate anything; they are shared across threads.

use crate::description::Description;
use crate::error::Error;
use crate::graph::Element;
use archguard_types::Location;
use std::sync::Arc;

mod class;
mod combinators;

pub use class::{
    be, depend_on_classes_that, have, reside_in_a_package, DependOnClassesThat, PredicateCondition,
    ResideInAPackage,
};
pub use combinators::{never, And, Described, Never, Or};

/// One reported failure of a condition for a specific element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Violation {
    message: String,
    subject: String,
    location: Option<Location>,
}

impl Violation {
    pub fn of<E: Element + ?Sized>(element: &E, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            subject: element.identity(),
            location: element.location().cloned(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Identity of the offending element.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

pub trait ArchCondition<T: Element>: Send + Sync {
    fn description(&self) -> &Description;

    fn check(&self, item: &T) -> Vec<Violation>;

    /// Message used when a negation of this condition finds it holding for `item`.
    fn describe_satisfied(&self, item: &T) -> String {
        satisfied_message(item, self.description())
    }
}

pub type ConditionRef<T> = Arc<dyn ArchCondition<T>>;

pub(crate) fn satisfied_message<T: Element + ?Sized>(
    item: &T,
    description: &Description,
) -> String {
    format!("<{}> does {}", item.identity(), description)
}

impl<T: Element + 'static> ArchCondition<T> for Arc<dyn ArchCondition<T>> {
    fn description(&self) -> &Description {
        (**self).description()
    }

    fn check(&self, item: &T) -> Vec<Violation> {
        (**self).check(item)
    }

    fn describe_satisfied(&self, item: &T) -> String {
        (**self).describe_satisfied(item)
    }
}

/// Fluent combinators available on every sized condition.
pub trait ConditionExt<T: Element + 'static>: ArchCondition<T> + Sized + 'static {
    fn and<C: ArchCondition<T> + 'static>(self, other: C) -> And<T> {
        And::new(self.into_ref(), other.into_ref())
    }

    fn or<C: ArchCondition<T> + 'static>(self, other: C) -> Or<T> {
        Or::new(self.into_ref(), other.into_ref())
    }

    fn described_as(self, text: impl AsRef<str>) -> Result<Described<T>, Error> {
        Ok(Described::new(self.into_ref(), Description::new(text)?))
    }

    fn into_ref(self) -> ConditionRef<T> {
        Arc::new(self)
    }
}

impl<T: Element + 'static, C: ArchCondition<T> + 'static> ConditionExt<T> for C {}
