//! Fluent entry points for building rules.
//!
//! ```text
//! classes().that(p).should(c)        -> every selected class must satisfy c
//! no_classes().that(p).should(c)     -> no selected class may satisfy c
//! priority(High).the_class(k).should(c)
//! ```
//!
//! The `no*` forms rename the selection to `"no ..."` and wrap the eventual
//! condition in [`never`], restoring the caller's condition description so the
//! rule still reads `"no classes should depend on ..."`.

use crate::conditions::{never, ArchCondition, ConditionExt, ConditionRef, Described};
use crate::description::Description;
use crate::graph::{Class, ClassKey, Element};
use crate::predicates::DescribedPredicate;
use crate::rule::ArchRule;
use crate::transformer::{self, Transformer};
use archguard_types::Priority;

pub fn all<T: Element + 'static>(transformer: Transformer<T>) -> GivenObjects<T> {
    priority(Priority::Medium).all(transformer)
}

pub fn no<T: Element + 'static>(transformer: Transformer<T>) -> GivenObjects<T> {
    priority(Priority::Medium).no(transformer)
}

pub fn priority(priority: Priority) -> Creator {
    Creator { priority }
}

pub fn classes() -> GivenObjects<Class> {
    priority(Priority::Medium).classes()
}

pub fn no_classes() -> GivenObjects<Class> {
    priority(Priority::Medium).no_classes()
}

pub fn the_class(key: impl Into<ClassKey>) -> GivenObjects<Class> {
    priority(Priority::Medium).the_class(key)
}

pub fn no_class(key: impl Into<ClassKey>) -> GivenObjects<Class> {
    priority(Priority::Medium).no_class(key)
}

/// Holds the priority for the rule about to be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Creator {
    priority: Priority,
}

impl Creator {
    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn classes(self) -> GivenObjects<Class> {
        self.all(transformer::classes())
    }

    pub fn no_classes(self) -> GivenObjects<Class> {
        self.no(transformer::classes())
    }

    /// Every element `transformer` selects must satisfy the condition.
    pub fn all<T: Element + 'static>(self, transformer: Transformer<T>) -> GivenObjects<T> {
        GivenObjects {
            priority: self.priority,
            transformer,
            preparation: Preparation::AsGiven,
        }
    }

    /// No element `transformer` selects may satisfy the condition.
    pub fn no<T: Element + 'static>(self, transformer: Transformer<T>) -> GivenObjects<T> {
        let renamed = transformer.with_description(transformer.description().prefixed("no"));
        GivenObjects {
            priority: self.priority,
            transformer: renamed,
            preparation: Preparation::Negated,
        }
    }

    /// The single class `key` resolves to in the evaluated graph.
    pub fn the_class(self, key: impl Into<ClassKey>) -> GivenObjects<Class> {
        self.all(transformer::single_element(key.into()))
    }

    pub fn no_class(self, key: impl Into<ClassKey>) -> GivenObjects<Class> {
        let key = key.into();
        let single = transformer::single_element(key.clone());
        let described = single.with_description(Description::fixed(format!("no class {key}")));
        GivenObjects {
            priority: self.priority,
            transformer: described,
            preparation: Preparation::Negated,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Preparation {
    AsGiven,
    Negated,
}

impl Preparation {
    fn prepare<T: Element + 'static>(self, condition: ConditionRef<T>) -> ConditionRef<T> {
        match self {
            Preparation::AsGiven => condition,
            Preparation::Negated => negate(condition),
        }
    }
}

/// `never(condition)`, still described as the caller's condition.
pub fn negate<T: Element + 'static>(condition: ConditionRef<T>) -> ConditionRef<T> {
    let description = condition.description().clone();
    Described::new(never(condition).into_ref(), description).into_ref()
}

/// Selection plus priority, waiting for a condition.
pub struct GivenObjects<T> {
    priority: Priority,
    transformer: Transformer<T>,
    preparation: Preparation,
}

impl<T: Element + 'static> GivenObjects<T> {
    pub fn transformer(&self) -> &Transformer<T> {
        &self.transformer
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn that(self, predicate: DescribedPredicate<T>) -> Self {
        Self {
            transformer: self.transformer.that(predicate),
            ..self
        }
    }

    pub fn should<C: ArchCondition<T> + 'static>(self, condition: C) -> ArchRule<T> {
        let condition = self.preparation.prepare(condition.into_ref());
        ArchRule::new(self.priority, self.transformer, condition)
    }
}
