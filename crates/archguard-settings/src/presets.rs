use archguard_domain::policy::EffectiveConfig;
use archguard_types::Priority;
use archguard_types::ids::{
    DEFAULT_MAX_VIOLATIONS, PROFILE_LENIENT, PROFILE_STANDARD, PROFILE_STRICT,
};
use std::collections::BTreeMap;

/// Preset profiles only decide which priorities fail a run.
///
/// Rules themselves come from code, so presets carry no per-rule entries.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        PROFILE_STANDARD => profile_failing_on(PROFILE_STANDARD, Priority::Medium),
        PROFILE_LENIENT => profile_failing_on(PROFILE_LENIENT, Priority::High),
        // default
        _ => profile_failing_on(PROFILE_STRICT, Priority::Low),
    }
}

fn profile_failing_on(name: &str, fail_on: Priority) -> EffectiveConfig {
    EffectiveConfig {
        profile: name.to_string(),
        fail_on,
        max_violations: DEFAULT_MAX_VIOLATIONS,
        rules: BTreeMap::new(),
    }
}
