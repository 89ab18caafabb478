use crate::error::Error;
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Glob matcher over dotted names: packages, or fully qualified class names.
///
/// `*` crosses dots, so `com.example.*` matches every sub-package of `com.example`
/// but not `com.example` itself.
#[derive(Clone, Debug)]
pub(crate) struct NameMatcher {
    set: GlobSet,
}

impl NameMatcher {
    pub(crate) fn new(patterns: &[String]) -> Result<Self, Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|err| Error::InvalidPattern {
                pattern: pattern.clone(),
                message: err.kind().to_string(),
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|err| Error::InvalidPattern {
            pattern: patterns.join(", "),
            message: err.to_string(),
        })?;
        Ok(Self { set })
    }

    pub(crate) fn is_match(&self, name: &str) -> bool {
        self.set.is_match(name)
    }
}
