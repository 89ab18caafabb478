//! Public facade over archguard.
//!
//! Rules are declared with the fluent builder re-exported in [`prelude`], evaluated
//! one at a time with [`ArchRule::evaluate`], or checked together with [`check_all`]
//! / [`check_with_config`].

#![forbid(unsafe_code)]

use anyhow::Context;

pub use archguard_domain::{
    ArchCondition, ArchRule, ArtifactGraph, ArtifactGraphBuilder, Class, ClassId, ClassKey,
    ConditionExt, ConditionRef, DescribedPredicate, Description, EffectiveConfig, Element,
    Error, EvaluableRule, EvaluationResult, ImportError, Importer, ResolutionError, RuleBox,
    RulePolicy, Transformer, Violation, check_all, conditions, definition, predicates, transformer,
};
pub use archguard_settings::{ArchguardConfigV1, Overrides, parse_config_toml, resolve_config};
pub use archguard_types::{ArchReport, Priority, RuleOutcome, Verdict, ViolationRecord};

/// Everything needed to write and check rules.
pub mod prelude {
    pub use archguard_domain::conditions::{
        be, depend_on_classes_that, have, never, reside_in_a_package,
    };
    pub use archguard_domain::definition::{
        all, classes, no, no_class, no_classes, priority, the_class,
    };
    pub use archguard_domain::predicates::{
        fully_qualified_name, not, reside_in_any_package, simple_name,
    };
    pub use archguard_domain::{ArchCondition, ConditionExt, EvaluableRule, RuleBox};
    pub use archguard_types::{Priority, Verdict};
}

/// Resolve `archguard.toml` text plus overrides, then check `rules` against `graph`.
pub fn check_with_config(
    rules: &[RuleBox],
    graph: &ArtifactGraph,
    config_toml: &str,
    overrides: Overrides,
) -> anyhow::Result<ArchReport> {
    let cfg = parse_config_toml(config_toml)?;
    let resolved = resolve_config(cfg, overrides)?;
    tracing::debug!(profile = %resolved.effective.profile, "resolved archguard config");
    check_all(rules, graph, &resolved.effective).context("evaluate architecture rules")
}
