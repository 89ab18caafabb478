//! Pure architecture rule composition and evaluation (no IO).
//!
//! Input: an artifact graph built elsewhere (see [`import::Importer`]) and a set of
//! rules assembled with the fluent builder in [`definition`].
//! Output: per-rule evaluation results, or a whole report + verdict via [`check_all`].

#![forbid(unsafe_code)]

pub mod conditions;
pub mod definition;
pub mod description;
pub mod error;
pub mod graph;
pub mod import;
pub mod policy;
pub mod predicates;
pub mod rule;
pub mod transformer;

mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use conditions::{ArchCondition, ConditionExt, ConditionRef, Violation};
pub use description::Description;
pub use engine::check_all;
pub use error::{Error, ResolutionError};
pub use fingerprint::fingerprint_for_violation;
pub use graph::{
    ArtifactGraph, ArtifactGraphBuilder, Class, ClassId, ClassKey, Dependency, Element,
};
pub use import::{ImportError, Importer};
pub use policy::{EffectiveConfig, RulePolicy};
pub use predicates::DescribedPredicate;
pub use rule::{ArchRule, EvaluableRule, EvaluationResult, RuleBox};
pub use transformer::Transformer;
