//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{ArchguardConfigV1, RuleConfig};
pub use resolve::{Overrides, ResolvedConfig};

use anyhow::Context;

/// Parse `archguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<ArchguardConfigV1> {
    let cfg: ArchguardConfigV1 =
        toml::from_str(input).context("parse archguard config")?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profile + overrides + per-rule config).
pub fn resolve_config(
    cfg: ArchguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// JSON schema for `archguard.toml`, for editor tooling.
pub fn config_schema() -> schemars::Schema {
    schemars::schema_for!(ArchguardConfigV1)
}
