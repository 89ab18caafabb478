//! Stable DTOs and IDs used across the archguard workspace.
//!
//! This crate is intentionally boring:
//! - rule priority and report verdict
//! - data types for the emitted report
//! - canonical repo-relative path handling for artifact locations
//! - stable schema identifiers

#![forbid(unsafe_code)]

pub mod ids;
pub mod path;
pub mod report;

pub use path::RepoPath;
pub use report::{
    report_schema, ArchReport, ArchReportData, Location, Priority, RuleOutcome, ToolMeta,
    Verdict, ViolationRecord, SCHEMA_REPORT_V1,
};
