//! Factories: the only way to create nodes and edges.
//!
//! A factory owns the arena every element lives in, the identity scope, one
//! class registry for nodes and one for edges, and weak references to the
//! containers listening for new nodes. Cloning a factory yields another
//! handle to the same arena.

pub mod class;

use std::{
    cell::{Ref, RefCell},
    collections::HashMap,
    fmt::{Debug, Formatter},
    rc::{Rc, Weak},
};

use derivative::Derivative;
use tracing::debug;

use crate::{
    container::NodeIndex,
    direction::Direction,
    edge::EdgeRef,
    element::{ElementCore, GraphElement},
    error::{FactoryError, IdentityError},
    factory_id::FactoryId,
    identity::{Identity, IdentityScope, LocalScope},
    node::NodeRef,
    property::Properties,
    record::{
        EdgeRecord, GraphNodeRecord, HasAdjacency, NodeRecord, TreeGraphNodeRecord,
        TreeNodeRecord,
    },
};

pub use class::{ClassRegistry, ElementClass};

pub type GraphFactory = Factory<GraphNodeRecord>;
pub type TreeFactory = Factory<TreeNodeRecord>;
pub type TreeGraphFactory = Factory<TreeGraphNodeRecord>;

const DEFAULT_NODE_ID: &str = "node0";
const DEFAULT_EDGE_ID: &str = "edge0";

pub(crate) struct FactoryState<R> {
    pub(crate) id: FactoryId,
    scope: Box<dyn IdentityScope>,
    pub(crate) node_classes: ClassRegistry,
    pub(crate) edge_classes: ClassRegistry,
    pub(crate) nodes: Vec<R>,
    pub(crate) edges: Vec<EdgeRecord>,
    node_ids: HashMap<String, usize>,
    edge_ids: HashMap<String, usize>,
    listeners: Vec<Weak<RefCell<NodeIndex>>>,
    generation: u64,
}

impl<R: NodeRecord> FactoryState<R> {
    pub(crate) fn node(&self, index: usize) -> &R {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut R {
        &mut self.nodes[index]
    }

    pub(crate) fn edge(&self, index: usize) -> &EdgeRecord {
        &self.edges[index]
    }

    pub(crate) fn edge_mut(&mut self, index: usize) -> &mut EdgeRecord {
        &mut self.edges[index]
    }

    /// Record that some parent link changed, invalidating cached roots.
    pub(crate) fn parent_changed(&mut self) {
        self.generation += 1;
        self.listeners.retain(|listener| match listener.upgrade() {
            Some(index) => {
                index.borrow_mut().invalidate_root();
                true
            }
            None => false,
        });
    }
}

/// Which class to construct an element with.
enum ClassChoice<'a> {
    Explicit(&'a ElementClass),
    Label(&'a str),
    Default,
}

#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub struct Factory<R: NodeRecord> {
    pub(crate) state: Rc<RefCell<FactoryState<R>>>,
}

impl<R: NodeRecord> Factory<R> {
    /// A factory issuing ids from a fresh [`LocalScope`] named `scope_name`.
    pub fn new(scope_name: impl Into<String>) -> Self {
        Self::with_scope(LocalScope::new(scope_name))
    }

    pub fn with_scope(scope: impl IdentityScope + 'static) -> Self {
        Self {
            state: Rc::new(RefCell::new(FactoryState {
                id: FactoryId::new(),
                scope: Box::new(scope),
                node_classes: ClassRegistry::for_nodes(),
                edge_classes: ClassRegistry::for_edges(),
                nodes: Vec::new(),
                edges: Vec::new(),
                node_ids: HashMap::new(),
                edge_ids: HashMap::new(),
                listeners: Vec::new(),
                generation: 0,
            })),
        }
    }

    pub fn id(&self) -> FactoryId {
        self.state.borrow().id
    }

    pub fn scope_name(&self) -> String {
        self.state.borrow().scope.name().to_string()
    }

    pub(crate) fn borrow(&self) -> Ref<'_, FactoryState<R>> {
        self.state.borrow()
    }

    pub(crate) fn with_state_mut<T>(&self, f: impl FnOnce(&mut FactoryState<R>) -> T) -> T {
        f(&mut self.state.borrow_mut())
    }

    pub(crate) fn same_as(&self, other: &Factory<R>) -> bool {
        self.id().owns(other.id())
    }

    pub fn register_node_class(&self, label: impl Into<String>, class: ElementClass) {
        self.state.borrow_mut().node_classes.register(label, class);
    }

    pub fn register_edge_class(&self, label: impl Into<String>, class: ElementClass) {
        self.state.borrow_mut().edge_classes.register(label, class);
    }

    pub fn node_classes(&self) -> Ref<'_, ClassRegistry> {
        Ref::map(self.state.borrow(), |s| &s.node_classes)
    }

    pub fn edge_classes(&self) -> Ref<'_, ClassRegistry> {
        Ref::map(self.state.borrow(), |s| &s.edge_classes)
    }

    pub fn node_count(&self) -> usize {
        self.state.borrow().nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.state.borrow().edges.len()
    }

    /// Create a node of the built-in class matching `props`.
    pub fn make_node(
        &self,
        proposed_id: Option<&str>,
        props: Option<Properties>,
    ) -> Result<NodeRef<R>, FactoryError> {
        self.create_node(ClassChoice::Default, None, proposed_id, props)
    }

    /// Create a node of the class registered for `label`, falling back to
    /// the built-in class if the label is unregistered.
    pub fn make_labelled_node(
        &self,
        label: &str,
        proposed_id: Option<&str>,
        props: Option<Properties>,
    ) -> Result<NodeRef<R>, FactoryError> {
        self.create_node(ClassChoice::Label(label), Some(label), proposed_id, props)
    }

    /// Create a node of an explicit class. Without a label, the class's
    /// registered label (or the default label) is used.
    pub fn make_node_of_class(
        &self,
        class: &ElementClass,
        label: Option<&str>,
        proposed_id: Option<&str>,
        props: Option<Properties>,
    ) -> Result<NodeRef<R>, FactoryError> {
        self.create_node(ClassChoice::Explicit(class), label, proposed_id, props)
    }

    fn create_node(
        &self,
        choice: ClassChoice<'_>,
        label: Option<&str>,
        proposed_id: Option<&str>,
        props: Option<Properties>,
    ) -> Result<NodeRef<R>, FactoryError> {
        let mut state = self.state.borrow_mut();
        let (class, label) = resolve_class(&state.node_classes, choice, label, props.as_ref())?;
        let identity = new_identity(&mut *state.scope, proposed_id, DEFAULT_NODE_ID);
        let body = class.instantiate(&identity, props)?;
        let index = state.nodes.len();
        state.node_ids.insert(identity.id().to_string(), index);
        state
            .nodes
            .push(R::from_core(ElementCore::new(identity, label, class.name().to_string(), body)));
        state.listeners.retain(|listener| match listener.upgrade() {
            Some(container) => {
                container.borrow_mut().insert(index);
                true
            }
            None => false,
        });
        Ok(NodeRef::new(self.clone(), index))
    }

    /// Look up a node by id, whether or not any container holds it.
    pub fn find_node(&self, id: &str) -> Option<NodeRef<R>> {
        let index = *self.state.borrow().node_ids.get(id)?;
        Some(NodeRef::new(self.clone(), index))
    }

    /// Every node this factory has created, in creation order.
    pub fn nodes(&self) -> Vec<NodeRef<R>> {
        (0..self.node_count())
            .map(|index| NodeRef::new(self.clone(), index))
            .collect()
    }

    /// Register a container index to receive every node created from now on.
    pub(crate) fn manage(&self, index: &Rc<RefCell<NodeIndex>>) {
        self.state.borrow_mut().listeners.push(Rc::downgrade(index));
    }

    /// Number of containers currently listening.
    pub fn listener_count(&self) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.strong_count() > 0)
            .count()
    }

    /// Notify listening containers that a parent link changed.
    pub fn on_parent_changed(&self) {
        self.state.borrow_mut().parent_changed();
    }

    pub(crate) fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    pub(crate) fn rename_node(&self, index: usize, new_id: &str) -> Result<(), IdentityError> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let identity = &mut state.nodes[index].core_mut().identity;
        let old = identity.id().to_string();
        state.scope.rename(identity, new_id)?;
        state.node_ids.remove(&old);
        state.node_ids.insert(new_id.to_string(), index);
        Ok(())
    }

    pub(crate) fn rename_edge(&self, index: usize, new_id: &str) -> Result<(), IdentityError> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let identity = &mut state.edges[index].core.identity;
        let old = identity.id().to_string();
        state.scope.rename(identity, new_id)?;
        state.edge_ids.remove(&old);
        state.edge_ids.insert(new_id.to_string(), index);
        Ok(())
    }
}

impl<R: HasAdjacency> Factory<R> {
    /// Create an edge of the built-in class matching `props` from `start`
    /// to `end`, registering it in both endpoints.
    pub fn make_edge(
        &self,
        start: &NodeRef<R>,
        end: &NodeRef<R>,
        proposed_id: Option<&str>,
        props: Option<Properties>,
    ) -> Result<EdgeRef<R>, FactoryError> {
        self.create_edge(ClassChoice::Default, None, start, end, proposed_id, props)
    }

    pub fn make_labelled_edge(
        &self,
        label: &str,
        start: &NodeRef<R>,
        end: &NodeRef<R>,
        proposed_id: Option<&str>,
        props: Option<Properties>,
    ) -> Result<EdgeRef<R>, FactoryError> {
        self.create_edge(
            ClassChoice::Label(label),
            Some(label),
            start,
            end,
            proposed_id,
            props,
        )
    }

    pub fn make_edge_of_class(
        &self,
        class: &ElementClass,
        label: Option<&str>,
        start: &NodeRef<R>,
        end: &NodeRef<R>,
        proposed_id: Option<&str>,
        props: Option<Properties>,
    ) -> Result<EdgeRef<R>, FactoryError> {
        self.create_edge(
            ClassChoice::Explicit(class),
            label,
            start,
            end,
            proposed_id,
            props,
        )
    }

    fn create_edge(
        &self,
        choice: ClassChoice<'_>,
        label: Option<&str>,
        start: &NodeRef<R>,
        end: &NodeRef<R>,
        proposed_id: Option<&str>,
        props: Option<Properties>,
    ) -> Result<EdgeRef<R>, FactoryError> {
        for node in [start, end] {
            if !self.same_as(node.factory()) {
                return Err(FactoryError::ForeignNode(node.id()));
            }
        }
        let mut state = self.state.borrow_mut();
        let (class, label) = resolve_class(&state.edge_classes, choice, label, props.as_ref())?;
        let identity = new_identity(&mut *state.scope, proposed_id, DEFAULT_EDGE_ID);
        let body = class.instantiate(&identity, props)?;
        let index = state.edges.len();
        let (s, e) = (start.index(), end.index());
        state.edge_ids.insert(identity.id().to_string(), index);
        state.edges.push(EdgeRecord {
            core: ElementCore::new(identity, label, class.name().to_string(), body),
            start: s,
            end: e,
            attached: true,
        });
        state.nodes[s]
            .adjacency_mut()
            .edges_mut(Direction::Out)
            .insert(index);
        state.nodes[e]
            .adjacency_mut()
            .edges_mut(Direction::In)
            .insert(index);
        Ok(EdgeRef::new(self.clone(), index))
    }

    pub fn find_edge(&self, id: &str) -> Option<EdgeRef<R>> {
        let index = *self.state.borrow().edge_ids.get(id)?;
        Some(EdgeRef::new(self.clone(), index))
    }
}

fn new_identity(scope: &mut dyn IdentityScope, proposed: Option<&str>, default: &str) -> Identity {
    let proposed = proposed
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(default);
    scope.new_id(proposed)
}

/// Pick the class and label for a new element. The class is checked for a
/// constructor of the right shape before any id is issued.
fn resolve_class(
    registry: &ClassRegistry,
    choice: ClassChoice<'_>,
    label: Option<&str>,
    props: Option<&Properties>,
) -> Result<(ElementClass, String), FactoryError> {
    let class = match choice {
        ClassChoice::Explicit(class) => class.clone(),
        ClassChoice::Label(label) => match registry.class_for_label(label) {
            Some(class) => class.clone(),
            None => {
                debug!(label, "unregistered label, using default class");
                registry.default_for(props).clone()
            }
        },
        ClassChoice::Default => registry.default_for(props).clone(),
    };
    if !class.accepts(props) {
        return Err(FactoryError::NoMatchingConstructor {
            class: class.name().to_string(),
            shape: class::shape_name(props.is_some()),
        });
    }
    let label = match label {
        Some(label) => label.to_string(),
        None => registry
            .label_for_class(class.name())
            .unwrap_or(registry.default_label())
            .to_string(),
    };
    Ok((class, label))
}

impl<R: NodeRecord> Debug for Factory<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.state.try_borrow() {
            Ok(state) => f
                .debug_struct("Factory")
                .field("kind", &R::KIND)
                .field("scope", &state.scope.name())
                .field("nodes", &state.nodes.len())
                .field("edges", &state.edges.len())
                .finish(),
            Err(_) => f.write_str("Factory(<busy>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        element::ElementBody,
        property::{PropertyList, Value},
    };

    #[test]
    fn test_default_ids_are_disambiguated() {
        let factory = GraphFactory::new("F");
        let a = factory.make_node(None, None).unwrap();
        let b = factory.make_node(None, None).unwrap();
        let c = factory.make_node(Some("node0"), None).unwrap();
        assert_eq!(a.id(), "node0");
        assert_eq!(b.id(), "node1");
        assert_eq!(c.id(), "node2");
        assert_eq!(a.label(), "node");
        assert_eq!(a.class_name(), "SimpleNode");
    }

    #[test]
    fn test_class_resolution_order() {
        let factory = GraphFactory::new("F");
        factory.register_node_class("person", ElementClass::data("Person"));
        let props: PropertyList = [("age", 3)].into_iter().collect();

        let registered = factory.make_labelled_node("person", Some("ann"), None).unwrap();
        assert_eq!(registered.class_name(), "Person");
        assert_eq!(registered.label(), "person");

        let unregistered = factory
            .make_labelled_node("robot", Some("r2"), Some(props.clone().into()))
            .unwrap();
        assert_eq!(unregistered.class_name(), "DataNode");
        assert_eq!(unregistered.property("age"), Some(Value::Integer(3)));

        let explicit = factory
            .make_node_of_class(&ElementClass::data("Person"), None, Some("bob"), None)
            .unwrap();
        assert_eq!(explicit.label(), "person");
    }

    #[test]
    fn test_no_matching_constructor_issues_no_id() {
        let factory = GraphFactory::new("F");
        factory.register_node_class("bare", ElementClass::simple("Bare"));
        let props: PropertyList = [("k", 1)].into_iter().collect();
        let result = factory.make_labelled_node("bare", Some("x"), Some(props.into()));
        assert!(matches!(
            result,
            Err(FactoryError::NoMatchingConstructor { .. })
        ));
        assert_eq!(factory.node_count(), 0);
        assert_eq!(factory.make_node(Some("x"), None).unwrap().id(), "x");
    }

    #[test]
    fn test_extension_state() {
        let factory = GraphFactory::new("F");
        let class = ElementClass::new("Weighted")
            .with_plain(|id| ElementBody::default().with_extension(id.id().len() as u32));
        let node = factory
            .make_node_of_class(&class, Some("w"), Some("abc"), None)
            .unwrap();
        assert_eq!(node.extension::<u32>(), Some(3));
        assert_eq!(node.extension::<String>(), None);
    }

    #[test]
    fn test_edges_are_registered_in_endpoints() {
        let factory = GraphFactory::new("F");
        let a = factory.make_node(Some("a"), None).unwrap();
        let b = factory.make_node(Some("b"), None).unwrap();
        let e = factory.make_labelled_edge("knows", &a, &b, None, None).unwrap();
        assert_eq!(e.id(), "edge0");
        assert_eq!(e.to_short_string(), "knows:edge0");
        assert_eq!(a.edges(Direction::Out), vec![e.clone()]);
        assert_eq!(b.edges(Direction::In), vec![e.clone()]);
        assert_eq!(factory.find_edge("edge0"), Some(e));
    }

    #[test]
    fn test_foreign_nodes_rejected() {
        let f1 = GraphFactory::new("F1");
        let f2 = GraphFactory::new("F2");
        let a = f1.make_node(None, None).unwrap();
        let b = f2.make_node(None, None).unwrap();
        assert!(matches!(
            f1.make_edge(&a, &b, None, None),
            Err(FactoryError::ForeignNode(_))
        ));
    }
}
