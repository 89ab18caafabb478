//! Stable identifiers for profiles and report fields.
//!
//! Profile names are matched verbatim by `archguard-settings`.

// Profiles
pub const PROFILE_STRICT: &str = "strict";
pub const PROFILE_STANDARD: &str = "standard";
pub const PROFILE_LENIENT: &str = "lenient";

// Default cap on violations emitted per report.
pub const DEFAULT_MAX_VIOLATIONS: usize = 500;

// Tool metadata
pub const TOOL_NAME: &str = "archguard";
