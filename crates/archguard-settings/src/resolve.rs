use crate::{model::ArchguardConfigV1, presets};
use anyhow::Context;
use archguard_domain::policy::{EffectiveConfig, RulePolicy};
use archguard_types::Priority;
use archguard_types::ids::PROFILE_STRICT;
use globset::Glob;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub fail_on: Option<String>,
    pub max_violations: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: ArchguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| PROFILE_STRICT.to_string());

    let mut effective = presets::preset(&profile);

    // max violations
    if let Some(mv) = overrides.max_violations.or(cfg.max_violations) {
        effective.max_violations = mv as usize;
    }

    // per-rule overrides
    for (rule, rc) in cfg.rules.iter() {
        let entry = effective
            .rules
            .entry(rule.clone())
            .or_insert_with(RulePolicy::enabled);

        if let Some(enabled) = rc.enabled {
            entry.enabled = enabled;
        }
        if let Some(priority) = rc.priority.as_deref() {
            entry.priority = Some(
                parse_priority(priority)
                    .with_context(|| format!("invalid priority for rule '{rule}'"))?,
            );
        }
        if !rc.ignore.is_empty() {
            validate_ignore(rule, &rc.ignore)?;
            entry.ignore = rc.ignore.clone();
        }
    }

    // fail_on: command-line override wins over config, which wins over the preset
    if let Some(fail_on) = overrides.fail_on.as_deref().or(cfg.fail_on.as_deref()) {
        effective.fail_on = parse_priority(fail_on).context("invalid fail_on")?;
    }

    Ok(ResolvedConfig { effective })
}

fn validate_ignore(rule: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern)
            .with_context(|| format!("invalid ignore glob for rule '{rule}': {pattern}"))?;
    }
    Ok(())
}

fn parse_priority(v: &str) -> anyhow::Result<Priority> {
    match v.to_ascii_lowercase().as_str() {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        _ => anyhow::bail!("unknown priority: {v} (expected low|medium|high)"),
    }
}
