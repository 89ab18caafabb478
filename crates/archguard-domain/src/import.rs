//! Boundary to the importer that turns compiled artifacts into an [`ArtifactGraph`].
//!
//! Importing is I/O and lives outside this crate; the engine only ever sees the
//! finished graph.

use crate::graph::ArtifactGraph;
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("cannot read {path}: {message}")]
    Source { path: Utf8PathBuf, message: String },

    #[error("malformed artifact {path}: {message}")]
    Malformed { path: Utf8PathBuf, message: String },
}

impl ImportError {
    pub fn source_error(path: &Utf8Path, message: impl Into<String>) -> Self {
        ImportError::Source {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn malformed(path: &Utf8Path, message: impl Into<String>) -> Self {
        ImportError::Malformed {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

pub trait Importer {
    /// Import every artifact found at `sources` into one graph.
    fn import_from(&self, sources: &[Utf8PathBuf]) -> Result<ArtifactGraph, ImportError>;
}
