//! A rule binds a priority, a transformer and a condition into one evaluable unit.

use crate::conditions::{ArchCondition, ConditionRef, Violation};
use crate::description::Description;
use crate::error::Error;
use crate::graph::{ArtifactGraph, Element};
use crate::transformer::Transformer;
use archguard_types::Priority;
use std::fmt;
use tracing::debug;

pub struct ArchRule<T> {
    priority: Priority,
    transformer: Transformer<T>,
    condition: ConditionRef<T>,
    description: Description,
}

impl<T> Clone for ArchRule<T> {
    fn clone(&self) -> Self {
        Self {
            priority: self.priority,
            transformer: self.transformer.clone(),
            condition: self.condition.clone(),
            description: self.description.clone(),
        }
    }
}

impl<T> fmt::Debug for ArchRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchRule")
            .field("priority", &self.priority)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<T: Element + 'static> ArchRule<T> {
    /// Description defaults to `"{transformer} should {condition}"`.
    pub fn new(
        priority: Priority,
        transformer: Transformer<T>,
        condition: ConditionRef<T>,
    ) -> Self {
        let description =
            Description::compose(transformer.description(), "should", condition.description());
        Self {
            priority,
            transformer,
            condition,
            description,
        }
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn transformer(&self) -> &Transformer<T> {
        &self.transformer
    }

    pub fn condition(&self) -> &ConditionRef<T> {
        &self.condition
    }

    /// Override the reported description; evaluation is unchanged.
    pub fn described_as(mut self, text: impl AsRef<str>) -> Result<Self, Error> {
        self.description = Description::new(text)?;
        Ok(self)
    }

    /// Append a rationale: `"{description}, because {reason}"`.
    pub fn because(mut self, reason: impl AsRef<str>) -> Result<Self, Error> {
        let reason = Description::new(reason)?;
        self.description =
            Description::fixed(format!("{}, because {}", self.description, reason));
        Ok(self)
    }

    /// Select elements, check each, collect violations in element order.
    ///
    /// A selection that fails to resolve is returned as an error, never as a pass.
    pub fn evaluate(&self, graph: &ArtifactGraph) -> Result<EvaluationResult, Error> {
        let elements = self.transformer.apply(graph)?;
        let violations: Vec<Violation> = elements
            .iter()
            .flat_map(|element| self.condition.check(element))
            .collect();

        debug!(
            rule = %self.description,
            elements = elements.len(),
            violations = violations.len(),
            "evaluated rule"
        );

        Ok(EvaluationResult {
            description: self.description.clone(),
            priority: self.priority,
            violations,
        })
    }
}

/// Outcome of one rule against one graph.
///
/// `==` compares the description too; use [`EvaluationResult::same_outcome`] to
/// compare two differently worded rules by what they found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationResult {
    description: Description,
    priority: Priority,
    violations: Vec<Violation>,
}

impl EvaluationResult {
    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Same priority and same violations in the same order, whatever the wording.
    pub fn same_outcome(&self, other: &EvaluationResult) -> bool {
        self.priority == other.priority && self.violations == other.violations
    }

    pub(crate) fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub(crate) fn retain_violations(mut self, keep: impl FnMut(&Violation) -> bool) -> Self {
        self.violations.retain(keep);
        self
    }

    /// Human-readable summary; empty when the rule passed.
    pub fn failure_report(&self) -> String {
        if self.passed() {
            return String::new();
        }
        let mut out = format!(
            "Architecture Violation [Priority: {}] - Rule '{}' was violated ({} times):",
            self.priority,
            self.description,
            self.violations.len()
        );
        for v in &self.violations {
            out.push('\n');
            out.push_str(v.message());
        }
        out
    }
}

/// Object-safe view of a rule, so rules over different element types can be
/// checked together.
pub trait EvaluableRule: Send + Sync {
    fn description(&self) -> &Description;
    fn priority(&self) -> Priority;
    fn evaluate(&self, graph: &ArtifactGraph) -> Result<EvaluationResult, Error>;
}

pub type RuleBox = Box<dyn EvaluableRule>;

impl<T: Element + 'static> EvaluableRule for ArchRule<T> {
    fn description(&self) -> &Description {
        ArchRule::description(self)
    }

    fn priority(&self) -> Priority {
        ArchRule::priority(self)
    }

    fn evaluate(&self, graph: &ArtifactGraph) -> Result<EvaluationResult, Error> {
        ArchRule::evaluate(self, graph)
    }
}
