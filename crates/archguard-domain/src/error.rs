use crate::import::ImportError;
use thiserror::Error;

/// A single element was requested by key but the imported graph has no such element.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("'{key}' does not resolve to a class in the imported artifact graph")]
pub struct ResolutionError {
    pub key: String,
}

impl ResolutionError {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Errors surfaced while defining or evaluating rules.
///
/// Rule violations are never errors; they are returned as data in
/// [`crate::rule::EvaluationResult`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("description must not be empty")]
    EmptyDescription,

    #[error("invalid package pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("artifact import failed")]
    Import(#[from] ImportError),
}
