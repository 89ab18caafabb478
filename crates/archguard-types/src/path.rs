use camino::Utf8Path;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Repo-relative path of the source an artifact was imported from.
///
/// Stored with forward slashes, without `.` segments or doubled separators.
/// The repository root itself is `.`.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct RepoPath(String);

impl Default for RepoPath {
    fn default() -> Self {
        RepoPath(".".to_string())
    }
}

impl RepoPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let joined = s
            .as_ref()
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        if joined.is_empty() {
            Self::default()
        } else {
            Self(joined)
        }
    }

    /// Conventional source file of a fully qualified class under `root`:
    /// `("src/main/java", "com.acme.Outer$Inner", "java")` gives
    /// `src/main/java/com/acme/Outer.java`.
    pub fn source_of(root: &str, class_name: &str, extension: &str) -> Self {
        let top_level = class_name.split('$').next().unwrap_or(class_name);
        let relative = top_level.replace('.', "/");
        RepoPath::new(format!("{root}/{relative}.{extension}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Utf8Path> for RepoPath {
    fn from(value: &Utf8Path) -> Self {
        RepoPath::new(value.as_str())
    }
}
