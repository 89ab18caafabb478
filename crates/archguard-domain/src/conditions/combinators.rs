use super::{satisfied_message, ArchCondition, ConditionExt, ConditionRef, Violation};
use crate::description::Description;
use crate::graph::Element;

/// Per-element negation: `x` violates `never(c)` exactly when `x` satisfies `c`.
///
/// This is "no element satisfies c", not "not every element satisfies c".
pub fn never<T, C>(condition: C) -> Never<T>
where
    T: Element + 'static,
    C: ArchCondition<T> + 'static,
{
    Never::new(condition.into_ref())
}

pub struct Never<T> {
    inner: ConditionRef<T>,
    description: Description,
}

impl<T: Element + 'static> Never<T> {
    pub fn new(inner: ConditionRef<T>) -> Self {
        let description = inner.description().prefixed("never");
        Self { inner, description }
    }

    pub fn negated(&self) -> &ConditionRef<T> {
        &self.inner
    }
}

impl<T: Element + 'static> ArchCondition<T> for Never<T> {
    fn description(&self) -> &Description {
        &self.description
    }

    fn check(&self, item: &T) -> Vec<Violation> {
        if self.inner.check(item).is_empty() {
            vec![Violation::of(item, self.inner.describe_satisfied(item))]
        } else {
            Vec::new()
        }
    }

    // Negating a negation reports what the original condition reported.
    fn describe_satisfied(&self, item: &T) -> String {
        let violations = self.inner.check(item);
        if violations.is_empty() {
            return satisfied_message(item, &self.description);
        }
        violations
            .iter()
            .map(Violation::message)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Both conditions must hold; violations are the union of both sides.
pub struct And<T> {
    left: ConditionRef<T>,
    right: ConditionRef<T>,
    description: Description,
}

impl<T: Element + 'static> And<T> {
    pub fn new(left: ConditionRef<T>, right: ConditionRef<T>) -> Self {
        let description = left.description().joined("and", right.description());
        Self {
            left,
            right,
            description,
        }
    }
}

impl<T: Element + 'static> ArchCondition<T> for And<T> {
    fn description(&self) -> &Description {
        &self.description
    }

    fn check(&self, item: &T) -> Vec<Violation> {
        let mut violations = self.left.check(item);
        violations.extend(self.right.check(item));
        violations
    }

    fn describe_satisfied(&self, item: &T) -> String {
        format!(
            "{} and {}",
            self.left.describe_satisfied(item),
            self.right.describe_satisfied(item)
        )
    }
}

/// Either condition may hold. An element violates only when neither alternative is
/// satisfied, and then both sides' violations are reported.
pub struct Or<T> {
    left: ConditionRef<T>,
    right: ConditionRef<T>,
    description: Description,
}

impl<T: Element + 'static> Or<T> {
    pub fn new(left: ConditionRef<T>, right: ConditionRef<T>) -> Self {
        let description = left.description().joined("or", right.description());
        Self {
            left,
            right,
            description,
        }
    }
}

impl<T: Element + 'static> ArchCondition<T> for Or<T> {
    fn description(&self) -> &Description {
        &self.description
    }

    fn check(&self, item: &T) -> Vec<Violation> {
        let left = self.left.check(item);
        if left.is_empty() {
            return left;
        }
        let right = self.right.check(item);
        if right.is_empty() {
            return right;
        }
        let mut violations = left;
        violations.extend(right);
        violations
    }

    fn describe_satisfied(&self, item: &T) -> String {
        if self.left.check(item).is_empty() {
            self.left.describe_satisfied(item)
        } else {
            self.right.describe_satisfied(item)
        }
    }
}

/// Same behaviour as the wrapped condition under a different description.
pub struct Described<T> {
    inner: ConditionRef<T>,
    description: Description,
}

impl<T: Element + 'static> Described<T> {
    pub fn new(inner: ConditionRef<T>, description: Description) -> Self {
        Self { inner, description }
    }
}

impl<T: Element + 'static> ArchCondition<T> for Described<T> {
    fn description(&self) -> &Description {
        &self.description
    }

    fn check(&self, item: &T) -> Vec<Violation> {
        self.inner.check(item)
    }

    fn describe_satisfied(&self, item: &T) -> String {
        self.inner.describe_satisfied(item)
    }
}
