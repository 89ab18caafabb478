use super::{ArchCondition, Violation};
use crate::description::Description;
use crate::error::Error;
use crate::graph::{Class, Dependency, Element};
use crate::predicates::{DescribedPredicate, NameMatcher};

/// Condition backed by a predicate, phrased with a verb (`have`, `be`).
///
/// Library predicates already read as verb phrases (`"have simple name 'Foo'"`);
/// a predicate starting with the condition's own verb is not prefixed twice.
pub struct PredicateCondition<T> {
    predicate: DescribedPredicate<T>,
    phrase: String,
    description: Description,
    positive: &'static str,
    negative: &'static str,
}

impl<T: 'static> PredicateCondition<T> {
    fn phrased(
        predicate: DescribedPredicate<T>,
        verb: &str,
        positive: &'static str,
        negative: &'static str,
    ) -> Self {
        let text = predicate.description().as_str();
        let phrase = text
            .strip_prefix(verb)
            .and_then(|rest| rest.strip_prefix(' '))
            .unwrap_or(text)
            .to_string();
        Self {
            description: Description::fixed(format!("{verb} {phrase}")),
            phrase,
            predicate,
            positive,
            negative,
        }
    }
}

/// `"have {predicate}"`.
pub fn have<T: Element + 'static>(predicate: DescribedPredicate<T>) -> PredicateCondition<T> {
    PredicateCondition::phrased(predicate, "have", "has", "does not have")
}

/// `"be {predicate}"`.
pub fn be<T: Element + 'static>(predicate: DescribedPredicate<T>) -> PredicateCondition<T> {
    PredicateCondition::phrased(predicate, "be", "is", "is not")
}

impl<T: Element + 'static> ArchCondition<T> for PredicateCondition<T> {
    fn description(&self) -> &Description {
        &self.description
    }

    fn check(&self, item: &T) -> Vec<Violation> {
        if self.predicate.test(item) {
            return Vec::new();
        }
        let message = format!("<{}> {} {}", item.identity(), self.negative, self.phrase);
        vec![Violation::of(item, message)]
    }

    fn describe_satisfied(&self, item: &T) -> String {
        format!("<{}> {} {}", item.identity(), self.positive, self.phrase)
    }
}

/// Holds when at least one dependency target matches `predicate`.
pub struct DependOnClassesThat {
    predicate: DescribedPredicate<Class>,
    description: Description,
}

pub fn depend_on_classes_that(predicate: DescribedPredicate<Class>) -> DependOnClassesThat {
    DependOnClassesThat {
        description: predicate.description().prefixed("depend on classes that"),
        predicate,
    }
}

impl DependOnClassesThat {
    fn matching(&self, class: &Class) -> Vec<Class> {
        class
            .dependencies()
            .map(Dependency::into_target)
            .filter(|target| self.predicate.test(target))
            .collect()
    }
}

impl ArchCondition<Class> for DependOnClassesThat {
    fn description(&self) -> &Description {
        &self.description
    }

    fn check(&self, class: &Class) -> Vec<Violation> {
        if !self.matching(class).is_empty() {
            return Vec::new();
        }
        let message = format!(
            "Class <{}> does not depend on classes that {}",
            class.name(),
            self.predicate.description()
        );
        vec![Violation::of(class, message)]
    }

    fn describe_satisfied(&self, class: &Class) -> String {
        let targets = self
            .matching(class)
            .iter()
            .map(|target| format!("<{}>", target.name()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Class <{}> depends on {}", class.name(), targets)
    }
}

pub struct ResideInAPackage {
    pattern: String,
    matcher: NameMatcher,
    description: Description,
}

pub fn reside_in_a_package(pattern: &str) -> Result<ResideInAPackage, Error> {
    Ok(ResideInAPackage {
        pattern: pattern.to_string(),
        matcher: NameMatcher::new(&[pattern.to_string()])?,
        description: Description::fixed(format!("reside in a package '{pattern}'")),
    })
}

impl ArchCondition<Class> for ResideInAPackage {
    fn description(&self) -> &Description {
        &self.description
    }

    fn check(&self, class: &Class) -> Vec<Violation> {
        if self.matcher.is_match(class.package_name()) {
            return Vec::new();
        }
        let message = format!(
            "Class <{}> does not reside in a package '{}'",
            class.name(),
            self.pattern
        );
        vec![Violation::of(class, message)]
    }

    fn describe_satisfied(&self, class: &Class) -> String {
        format!(
            "Class <{}> resides in a package '{}'",
            class.name(),
            self.pattern
        )
    }
}
