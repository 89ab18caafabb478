//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - per-element negation and double negation
//! - equivalence of `no(t)` with `all(t)` over a negated condition
//! - idempotent, order-independent evaluation
//! - vacuous truth over empty selections

use crate::conditions::{
    depend_on_classes_that, have, never, reside_in_a_package, ArchCondition, ConditionExt,
    ConditionRef, Violation,
};
use crate::definition::{all, no, priority};
use crate::engine::check_all;
use crate::graph::{ArtifactGraph, Class};
use crate::predicates::{self, simple_name};
use crate::rule::RuleBox;
use crate::test_support::config;
use crate::transformer::classes;
use archguard_types::Priority;
use proptest::prelude::*;

const PACKAGES: &[&str] = &["app.web", "app.service", "app.db", "lib.util"];
const SIMPLE_NAMES: &[&str] = &["Alpha", "Beta", "Gamma", "Delta", "Epsilon"];

// ============================================================================
// Strategies
// ============================================================================

/// A class is `(package index, simple name index, dependency indices)`.
/// Dependency indices refer to other generated classes.
type ClassSpec = (usize, usize, Vec<usize>);

fn arb_class_spec() -> impl Strategy<Value = ClassSpec> {
    (
        0..PACKAGES.len(),
        0..SIMPLE_NAMES.len(),
        prop::collection::vec(0usize..12, 0..4),
    )
}

fn arb_graph_spec() -> impl Strategy<Value = Vec<ClassSpec>> {
    prop::collection::vec(arb_class_spec(), 0..12)
}

/// `(condition kind, argument index)`; built into a condition by [`condition`].
fn arb_condition_spec() -> impl Strategy<Value = (u8, usize)> {
    (0u8..4, 0usize..PACKAGES.len())
}

fn class_name(spec: &ClassSpec) -> String {
    format!("{}.{}", PACKAGES[spec.0], SIMPLE_NAMES[spec.1])
}

fn build_graph(specs: &[ClassSpec]) -> ArtifactGraph {
    let mut builder = ArtifactGraph::builder();
    let names: Vec<String> = specs.iter().map(class_name).collect();
    for (spec, name) in specs.iter().zip(&names) {
        let origin = builder.add_class(name);
        for target in spec.2.iter().filter_map(|&dep| names.get(dep)) {
            builder
                .add_dependency(origin, target)
                .expect("origin comes from this builder");
        }
    }
    builder.build()
}

fn condition(kind: u8, arg: usize) -> ConditionRef<Class> {
    let package = PACKAGES[arg % PACKAGES.len()];
    let simple = SIMPLE_NAMES[arg % SIMPLE_NAMES.len()];
    match kind {
        0 => {
            let target = predicates::reside_in_a_package(package).unwrap();
            depend_on_classes_that(target).into_ref()
        }
        1 => have(simple_name(simple)).into_ref(),
        2 => reside_in_a_package(package).unwrap().into_ref(),
        _ => have(simple_name(simple))
            .or(depend_on_classes_that(simple_name(simple)))
            .into_ref(),
    }
}

fn messages(violations: &[Violation]) -> Vec<String> {
    violations.iter().map(|v| v.message().to_string()).collect()
}

// ============================================================================
// Negation
// ============================================================================

proptest! {
    /// Every element violates exactly one of `c` and `never(c)`.
    #[test]
    fn negation_is_mutually_exclusive(
        specs in arb_graph_spec(),
        (kind, arg) in arb_condition_spec(),
    ) {
        let graph = build_graph(&specs);
        let positive = condition(kind, arg);
        let negated = never(positive.clone());

        for class in graph.classes() {
            let holds = positive.check(class).is_empty();
            let negated_holds = negated.check(class).is_empty();
            prop_assert_ne!(holds, negated_holds, "class {}", class.name());
            if holds {
                prop_assert_eq!(negated.check(class).len(), 1);
            }
        }
    }

    /// `never(never(c))` fails exactly where `c` fails, reporting what `c` reported.
    #[test]
    fn double_negation_restores_the_original(
        specs in arb_graph_spec(),
        (kind, arg) in arb_condition_spec(),
    ) {
        let graph = build_graph(&specs);
        let original = condition(kind, arg);
        let twice = never(never(original.clone()));

        for class in graph.classes() {
            let expected = messages(&original.check(class));
            let actual = messages(&twice.check(class));
            prop_assert_eq!(expected.is_empty(), actual.is_empty());
            if !expected.is_empty() {
                prop_assert_eq!(actual, vec![expected.join("; ")]);
            }
        }
    }

    /// `no(t).should(c)` reports what `all(t).should(never(c))` reports.
    #[test]
    fn no_is_all_with_a_negated_condition(
        specs in arb_graph_spec(),
        (kind, arg) in arb_condition_spec(),
    ) {
        let graph = build_graph(&specs);
        let via_no = no(classes()).should(condition(kind, arg));
        let via_never = all(classes()).should(never(condition(kind, arg)));

        let left = via_no.evaluate(&graph).unwrap();
        let right = via_never.evaluate(&graph).unwrap();
        prop_assert_eq!(left.violations(), right.violations());
        prop_assert_eq!(
            via_no.description().to_string(),
            format!("no classes should {}", condition(kind, arg).description())
        );
    }
}

// ============================================================================
// Evaluation
// ============================================================================

proptest! {
    /// Evaluating the same rule twice yields the same result.
    #[test]
    fn evaluation_is_idempotent(
        specs in arb_graph_spec(),
        (kind, arg) in arb_condition_spec(),
    ) {
        let graph = build_graph(&specs);
        let rule = all(classes()).should(condition(kind, arg));
        prop_assert_eq!(rule.evaluate(&graph).unwrap(), rule.evaluate(&graph).unwrap());
    }

    /// An empty selection passes, with or without negation.
    #[test]
    fn empty_selection_is_vacuously_true((kind, arg) in arb_condition_spec()) {
        let graph = ArtifactGraph::default();
        let every = all(classes()).should(condition(kind, arg));
        let none = no(classes()).should(condition(kind, arg));
        prop_assert!(every.evaluate(&graph).unwrap().passed());
        prop_assert!(none.evaluate(&graph).unwrap().passed());
    }

    /// The report does not depend on the order rules are supplied in.
    #[test]
    fn report_is_independent_of_rule_order(
        specs in arb_graph_spec(),
        conditions in prop::collection::vec(arb_condition_spec(), 1..5),
        max_violations in 0usize..20,
    ) {
        let graph = build_graph(&specs);
        let priorities = [Priority::Low, Priority::Medium, Priority::High];
        let rules = |reverse: bool| -> Vec<RuleBox> {
            let mut rules: Vec<RuleBox> = conditions
                .iter()
                .enumerate()
                .map(|(i, &(kind, arg))| -> RuleBox {
                    Box::new(
                        priority(priorities[i % priorities.len()])
                            .classes()
                            .should(condition(kind, arg))
                            .described_as(format!("rule {i}"))
                            .unwrap(),
                    )
                })
                .collect();
            if reverse {
                rules.reverse();
            }
            rules
        };

        let cfg = config(Priority::Medium, max_violations);
        let forward = check_all(&rules(false), &graph, &cfg).unwrap();
        let backward = check_all(&rules(true), &graph, &cfg).unwrap();
        prop_assert_eq!(forward, backward);
    }
}
