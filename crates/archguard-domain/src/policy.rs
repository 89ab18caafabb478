use archguard_types::ids::{DEFAULT_MAX_VIOLATIONS, PROFILE_STRICT};
use archguard_types::Priority;
use std::collections::BTreeMap;

/// Per-rule override, keyed by rule description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulePolicy {
    pub enabled: bool,
    /// Replaces the priority the rule was declared with.
    pub priority: Option<Priority>,
    /// Subject globs (dotted names) whose violations are dropped, e.g. `app.legacy.*`.
    pub ignore: Vec<String>,
}

impl RulePolicy {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            priority: None,
            ignore: Vec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            priority: None,
            ignore: Vec::new(),
        }
    }

    pub fn with_priority(priority: Priority) -> Self {
        Self {
            enabled: true,
            priority: Some(priority),
            ignore: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    /// Failed rules at or above this priority fail the run.
    pub fail_on: Priority,
    pub max_violations: usize,
    pub rules: BTreeMap<String, RulePolicy>,
}

impl EffectiveConfig {
    /// Rules without an entry are enabled and keep their declared priority.
    pub fn rule_policy(&self, rule: &str) -> Option<&RulePolicy> {
        self.rules.get(rule)
    }

    pub fn is_enabled(&self, rule: &str) -> bool {
        self.rule_policy(rule).is_none_or(|p| p.enabled)
    }
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: PROFILE_STRICT.to_string(),
            fail_on: Priority::Low,
            max_violations: DEFAULT_MAX_VIOLATIONS,
            rules: BTreeMap::new(),
        }
    }
}
