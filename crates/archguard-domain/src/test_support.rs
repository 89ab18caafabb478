use crate::graph::{ArtifactGraph, Class};
use crate::policy::{EffectiveConfig, RulePolicy};
use archguard_types::Priority;
use std::collections::BTreeMap;

/// `app.Foo -> app.Bar`, with `app.Bar` depending on nothing.
pub fn foo_bar_graph() -> ArtifactGraph {
    ArtifactGraph::builder()
        .class("app.Foo", &["app.Bar"])
        .class("app.Bar", &[])
        .build()
}

pub fn named<'a>(graph: &'a ArtifactGraph, name: &str) -> &'a Class {
    graph
        .lookup(&name.into())
        .unwrap_or_else(|| panic!("test graph has no class {name}"))
}

pub fn config(fail_on: Priority, max_violations: usize) -> EffectiveConfig {
    EffectiveConfig {
        profile: "test".to_string(),
        fail_on,
        max_violations,
        rules: BTreeMap::new(),
    }
}

pub fn config_with_rule(rule: &str, policy: RulePolicy) -> EffectiveConfig {
    let mut cfg = config(Priority::Low, 200);
    cfg.rules.insert(rule.to_string(), policy);
    cfg
}
