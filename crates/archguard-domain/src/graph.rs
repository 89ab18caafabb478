//! The imported universe of classes and their dependencies.
//!
//! The graph is built once (by an importer, or by tests) and is read-only afterwards.
//! Nothing in the evaluation path mutates it, so it can be shared across threads.

use crate::error::ResolutionError;
use archguard_types::Location;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH: AtomicU64 = AtomicU64::new(1);

fn next_graph_token() -> u64 {
    NEXT_GRAPH.fetch_add(1, Ordering::Relaxed)
}

/// Handle of a class inside the graph that issued it.
///
/// Handles are stamped with their graph, so one graph never resolves another's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId {
    graph: u64,
    index: usize,
}

impl ClassId {
    pub fn index(self) -> usize {
        self.index
    }
}

/// How a single class is looked up: by fully qualified name or by handle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClassKey {
    Name(String),
    Id(ClassId),
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassKey::Name(name) => f.write_str(name),
            ClassKey::Id(id) => write!(f, "#{}", id.index),
        }
    }
}

impl From<&str> for ClassKey {
    fn from(value: &str) -> Self {
        ClassKey::Name(value.to_string())
    }
}

impl From<String> for ClassKey {
    fn from(value: String) -> Self {
        ClassKey::Name(value)
    }
}

impl From<ClassId> for ClassKey {
    fn from(value: ClassId) -> Self {
        ClassKey::Id(value)
    }
}

impl From<&Class> for ClassKey {
    fn from(value: &Class) -> Self {
        ClassKey::Name(value.name().to_string())
    }
}

/// Anything a condition can be checked against.
///
/// `identity` names the element in violation messages and reports.
pub trait Element {
    fn identity(&self) -> String;

    fn location(&self) -> Option<&Location> {
        None
    }
}

impl Element for String {
    fn identity(&self) -> String {
        self.clone()
    }
}

#[derive(Debug)]
struct Node {
    name: String,
    package: String,
    simple_name: String,
    dependencies: Vec<usize>,
    location: Option<Location>,
    imported: bool,
}

impl Node {
    fn named(name: &str, imported: bool) -> Self {
        let (package, simple) = match name.rfind('.') {
            Some(idx) => (&name[..idx], &name[idx + 1..]),
            None => ("", name),
        };
        // Nested classes: `Outer$Inner` has simple name `Inner`.
        let simple = simple.rsplit('$').next().unwrap_or(simple);
        Self {
            name: name.to_string(),
            package: package.to_string(),
            simple_name: simple.to_string(),
            dependencies: Vec::new(),
            location: None,
            imported,
        }
    }
}

/// Every node of one graph: imported classes first, then the referenced-only
/// classes that dependencies point at.
#[derive(Debug)]
struct Nodes {
    token: u64,
    nodes: Vec<Node>,
}

/// One class of an [`ArtifactGraph`]. Cheap to clone; dependencies resolve to
/// the graph's own classes.
#[derive(Clone)]
pub struct Class {
    graph: Arc<Nodes>,
    index: usize,
}

impl Class {
    fn node(&self) -> &Node {
        &self.graph.nodes[self.index]
    }

    /// Fully qualified name.
    pub fn name(&self) -> &str {
        &self.node().name
    }

    pub fn package_name(&self) -> &str {
        &self.node().package
    }

    pub fn simple_name(&self) -> &str {
        &self.node().simple_name
    }

    /// `false` for classes only known as a dependency target; those carry a name
    /// and nothing else.
    pub fn is_imported(&self) -> bool {
        self.node().imported
    }

    /// Outgoing dependencies, in the order they were recorded.
    pub fn dependencies(&self) -> impl Iterator<Item = Dependency> + '_ {
        self.node().dependencies.iter().map(|&index| Dependency {
            target: Class {
                graph: Arc::clone(&self.graph),
                index,
            },
        })
    }

    pub fn depends_on(&self, name: &str) -> bool {
        self.node()
            .dependencies
            .iter()
            .any(|&index| self.graph.nodes[index].name == name)
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.graph.token == other.graph.token && self.index == other.index
    }
}

impl Eq for Class {}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name())
            .field("imported", &self.is_imported())
            .finish_non_exhaustive()
    }
}

impl Element for Class {
    fn identity(&self) -> String {
        self.name().to_string()
    }

    fn location(&self) -> Option<&Location> {
        self.node().location.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dependency {
    target: Class,
}

impl Dependency {
    /// The class depended upon: the graph's own class when it was imported,
    /// otherwise a name-only class.
    pub fn target(&self) -> &Class {
        &self.target
    }

    pub fn into_target(self) -> Class {
        self.target
    }
}

#[derive(Clone, Debug)]
pub struct ArtifactGraph {
    token: u64,
    classes: Vec<Class>,
    by_name: BTreeMap<String, ClassId>,
}

impl Default for ArtifactGraph {
    fn default() -> Self {
        ArtifactGraphBuilder::default().build()
    }
}

impl ArtifactGraph {
    pub fn builder() -> ArtifactGraphBuilder {
        ArtifactGraphBuilder::default()
    }

    /// All imported classes, in import order.
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn id_of(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    /// Resolve a key against this graph only. Handles issued by another graph,
    /// and classes that are merely referenced, resolve to nothing.
    pub fn lookup(&self, key: &ClassKey) -> Option<&Class> {
        match key {
            ClassKey::Name(name) => self.by_name.get(name).map(|id| &self.classes[id.index]),
            ClassKey::Id(id) if id.graph == self.token => self.classes.get(id.index),
            ClassKey::Id(_) => None,
        }
    }
}

#[derive(Debug)]
struct PendingClass {
    name: String,
    dependencies: Vec<String>,
    location: Option<Location>,
}

#[derive(Debug)]
pub struct ArtifactGraphBuilder {
    token: u64,
    classes: Vec<PendingClass>,
    by_name: BTreeMap<String, ClassId>,
}

impl Default for ArtifactGraphBuilder {
    fn default() -> Self {
        Self {
            token: next_graph_token(),
            classes: Vec::new(),
            by_name: BTreeMap::new(),
        }
    }
}

impl ArtifactGraphBuilder {
    /// Register a class; registering the same name twice returns the existing handle.
    pub fn add_class(&mut self, name: impl AsRef<str>) -> ClassId {
        let name = name.as_ref();
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = ClassId {
            graph: self.token,
            index: self.classes.len(),
        };
        self.classes.push(PendingClass {
            name: name.to_string(),
            dependencies: Vec::new(),
            location: None,
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Record `origin -> target`. The target does not need to be imported.
    pub fn add_dependency(
        &mut self,
        origin: ClassId,
        target: impl AsRef<str>,
    ) -> Result<&mut Self, ResolutionError> {
        self.pending_mut(origin)?.depend_on(target.as_ref());
        Ok(self)
    }

    pub fn set_location(
        &mut self,
        id: ClassId,
        location: Location,
    ) -> Result<&mut Self, ResolutionError> {
        self.pending_mut(id)?.location = Some(location);
        Ok(self)
    }

    /// Chaining form of `add_class` + `add_dependency`.
    pub fn class(mut self, name: &str, dependencies: &[&str]) -> Self {
        let id = self.add_class(name);
        let class = &mut self.classes[id.index];
        for target in dependencies {
            class.depend_on(target);
        }
        self
    }

    /// Link every dependency to the class it names. Targets that were never
    /// imported become name-only classes, shared by everything referencing them.
    pub fn build(self) -> ArtifactGraph {
        let Self {
            token,
            classes: pending,
            by_name,
        } = self;

        let mut index: BTreeMap<String, usize> = by_name
            .iter()
            .map(|(name, id)| (name.clone(), id.index))
            .collect();
        let mut nodes: Vec<Node> = pending
            .iter()
            .map(|p| {
                let mut node = Node::named(&p.name, true);
                node.location = p.location.clone();
                node
            })
            .collect();

        for (origin, class) in pending.iter().enumerate() {
            for target in &class.dependencies {
                let target = match index.get(target) {
                    Some(&existing) => existing,
                    None => {
                        let referenced = nodes.len();
                        nodes.push(Node::named(target, false));
                        index.insert(target.clone(), referenced);
                        referenced
                    }
                };
                nodes[origin].dependencies.push(target);
            }
        }

        let graph = Arc::new(Nodes { token, nodes });
        let classes = (0..pending.len())
            .map(|index| Class {
                graph: Arc::clone(&graph),
                index,
            })
            .collect();
        ArtifactGraph {
            token,
            classes,
            by_name,
        }
    }

    fn pending_mut(&mut self, id: ClassId) -> Result<&mut PendingClass, ResolutionError> {
        let foreign = || ResolutionError::new(ClassKey::Id(id).to_string());
        if id.graph != self.token {
            return Err(foreign());
        }
        self.classes.get_mut(id.index).ok_or_else(foreign)
    }
}

impl PendingClass {
    fn depend_on(&mut self, target: &str) {
        if !self.dependencies.iter().any(|d| d == target) {
            self.dependencies.push(target.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archguard_types::RepoPath;

    #[test]
    fn splits_package_and_simple_name() {
        let graph = ArtifactGraph::builder()
            .class("com.example.service.OrderService", &[])
            .class("com.example.Outer$Inner", &[])
            .class("Standalone", &[])
            .build();

        let order = graph.lookup(&"com.example.service.OrderService".into()).unwrap();
        assert_eq!(order.package_name(), "com.example.service");
        assert_eq!(order.simple_name(), "OrderService");

        let inner = graph.lookup(&"com.example.Outer$Inner".into()).unwrap();
        assert_eq!(inner.simple_name(), "Inner");

        let standalone = graph.lookup(&"Standalone".into()).unwrap();
        assert_eq!(standalone.package_name(), "");
    }

    #[test]
    fn lookup_by_name_and_handle() {
        let mut builder = ArtifactGraph::builder();
        let foo = builder.add_class("a.Foo");
        builder.add_dependency(foo, "a.Bar").unwrap();
        let graph = builder.build();

        let by_id = graph.lookup(&ClassKey::Id(foo)).unwrap();
        assert_eq!(by_id.name(), "a.Foo");
        assert!(by_id.depends_on("a.Bar"));
        assert_eq!(graph.id_of("a.Foo"), Some(foo));
        assert!(graph.lookup(&"a.Missing".into()).is_none());
        // Referenced but never imported.
        assert!(graph.lookup(&"a.Bar".into()).is_none());
    }

    #[test]
    fn handles_from_another_graph_do_not_resolve() {
        let mut other = ArtifactGraph::builder();
        other.add_class("x.One");
        let foreign = other.add_class("x.Absent");

        let graph = ArtifactGraph::builder()
            .class("app.Foo", &["app.Bar"])
            .class("app.Bar", &[])
            .build();
        assert_eq!(foreign.index(), 1);
        assert!(graph.lookup(&ClassKey::Id(foreign)).is_none());
    }

    #[test]
    fn duplicate_classes_and_dependencies_collapse() {
        let mut builder = ArtifactGraph::builder();
        let first = builder.add_class("a.Foo");
        let second = builder.add_class("a.Foo");
        assert_eq!(first, second);
        builder.add_dependency(first, "a.Bar").unwrap();
        builder.add_dependency(first, "a.Bar").unwrap();
        let graph = builder.build();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.classes()[0].dependencies().count(), 1);
    }

    #[test]
    fn dependency_targets_are_the_graphs_own_classes() {
        let graph = ArtifactGraph::builder()
            .class("app.Foo", &["app.Bar", "lib.External"])
            .class("app.Bar", &["app.Baz", "app.Foo"])
            .class("app.Baz", &[])
            .build();
        let foo = graph.lookup(&"app.Foo".into()).unwrap();
        let targets: Vec<Class> = foo.dependencies().map(Dependency::into_target).collect();

        let bar = &targets[0];
        assert_eq!(bar, graph.lookup(&"app.Bar".into()).unwrap());
        assert!(bar.is_imported());
        assert!(bar.depends_on("app.Baz"));
        // Cycles resolve back to the same class.
        let back: Vec<Class> = bar.dependencies().map(Dependency::into_target).collect();
        assert_eq!(&back[1], foo);

        let external = &targets[1];
        assert_eq!(external.name(), "lib.External");
        assert_eq!(external.simple_name(), "External");
        assert!(!external.is_imported());
        assert_eq!(external.dependencies().count(), 0);
    }

    #[test]
    fn foreign_handle_is_rejected_by_builder() {
        let mut other = ArtifactGraph::builder();
        other.add_class("x.One");
        let foreign = other.add_class("x.Two");

        let mut builder = ArtifactGraph::builder();
        builder.add_class("a.One");
        builder.add_class("a.Two");
        let err = builder.add_dependency(foreign, "a.Bar").unwrap_err();
        assert_eq!(err.key, "#1");
    }

    #[test]
    fn location_is_exposed_through_element() {
        let mut builder = ArtifactGraph::builder();
        let foo = builder.add_class("a.Foo");
        builder
            .set_location(
                foo,
                Location {
                    path: RepoPath::source_of("src", "a.Foo", "java"),
                    line: Some(3),
                },
            )
            .unwrap();
        let graph = builder.build();
        let class = &graph.classes()[0];
        assert_eq!(class.location().unwrap().path.as_str(), "src/a/Foo.java");
        assert_eq!(class.identity(), "a.Foo");
    }
}
