//! Selectors: turn the whole artifact graph into the elements a rule talks about.

use crate::description::Description;
use crate::error::{Error, ResolutionError};
use crate::graph::{ArtifactGraph, Class, ClassKey};
use crate::predicates::DescribedPredicate;
use std::fmt;
use std::sync::Arc;

type ApplyFn<T> = dyn Fn(&ArtifactGraph) -> Result<Vec<T>, ResolutionError> + Send + Sync;

/// Described, pure function from the graph to an ordered sequence of elements.
///
/// `apply` never mutates the graph and returns the same sequence for the same graph.
pub struct Transformer<T> {
    description: Description,
    apply: Arc<ApplyFn<T>>,
}

impl<T> Clone for Transformer<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<T> fmt::Debug for Transformer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Transformer<T> {
    pub fn new<F>(description: Description, select: F) -> Self
    where
        F: Fn(&ArtifactGraph) -> Vec<T> + Send + Sync + 'static,
    {
        Self::fallible(description, move |graph| Ok(select(graph)))
    }

    /// Like [`Transformer::new`] for selections that can fail to resolve.
    pub fn fallible<F>(description: Description, select: F) -> Self
    where
        F: Fn(&ArtifactGraph) -> Result<Vec<T>, ResolutionError> + Send + Sync + 'static,
    {
        Self {
            description,
            apply: Arc::new(select),
        }
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn apply(&self, graph: &ArtifactGraph) -> Result<Vec<T>, ResolutionError> {
        (self.apply)(graph)
    }

    /// Same selection, new description.
    pub fn described_as(&self, text: impl AsRef<str>) -> Result<Self, Error> {
        Ok(self.with_description(Description::new(text)?))
    }

    pub(crate) fn with_description(&self, description: Description) -> Self {
        Self {
            description,
            apply: Arc::clone(&self.apply),
        }
    }

    /// Keep only elements matching `predicate`; described `"{self} that {predicate}"`.
    pub fn that(&self, predicate: DescribedPredicate<T>) -> Self {
        let inner = Arc::clone(&self.apply);
        let description = self.description.joined("that", predicate.description());
        Self::fallible(description, move |graph| {
            let mut selected = inner(graph)?;
            selected.retain(|item| predicate.test(item));
            Ok(selected)
        })
    }
}

/// Every class in the graph, in import order.
pub fn classes() -> Transformer<Class> {
    Transformer::new(Description::fixed("classes"), |graph: &ArtifactGraph| {
        graph.classes().to_vec()
    })
}

/// Exactly the class `key` resolves to. An unresolved key is a [`ResolutionError`]
/// from `apply`, never an empty selection.
pub fn single_element(key: ClassKey) -> Transformer<Class> {
    let description = Description::fixed(format!("the class {key}"));
    Transformer::fallible(description, move |graph: &ArtifactGraph| {
        graph
            .lookup(&key)
            .map(|class| vec![class.clone()])
            .ok_or_else(|| ResolutionError::new(key.to_string()))
    })
}
