//! Node handles.
//!
//! A [`NodeRef`] is a factory handle plus an arena index. Which operations
//! it offers depends on the record type: adjacency operations need
//! [`HasAdjacency`], tree operations need [`HasParentChild`].

use std::{
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
};

use derivative::Derivative;
use indexmap::IndexSet;

use crate::{
    direction::Direction,
    edge::EdgeRef,
    element::{ElementCore, GraphElement},
    error::{FactoryError, IdentityError},
    factory::Factory,
    format_debug,
    property::Properties,
    record::{
        GraphNodeRecord, HasAdjacency, HasParentChild, NodeRecord, TreeGraphNodeRecord,
        TreeNodeRecord,
    },
    search::{BoundedDfs, SubtreeIterator},
};

pub type Node = NodeRef<GraphNodeRecord>;
pub type TreeNode = NodeRef<TreeNodeRecord>;
pub type TreeGraphNode = NodeRef<TreeGraphNodeRecord>;

#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub struct NodeRef<R: NodeRecord> {
    factory: Factory<R>,
    index: usize,
}

impl<R: NodeRecord> NodeRef<R> {
    pub(crate) fn new(factory: Factory<R>, index: usize) -> Self {
        Self { factory, index }
    }

    pub fn factory(&self) -> &Factory<R> {
        &self.factory
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    fn wrap(&self, index: usize) -> Self {
        Self::new(self.factory.clone(), index)
    }

    fn owns(&self, other: &NodeRef<R>) -> bool {
        self.factory.same_as(&other.factory)
    }

    /// Change this node's id. Only scopes that support renaming accept it.
    pub fn rename(&self, new_id: &str) -> Result<(), IdentityError> {
        self.factory.rename_node(self.index, new_id)
    }

    /// Cut every edge and tree link this node takes part in.
    ///
    /// Neighbours lose their reciprocal references; former edges stay valid
    /// but orphaned. Container membership is untouched.
    pub fn disconnect(&self) {
        let parent_changed = self.factory.with_state_mut(|state| {
            let n = self.index;
            if let Some(adjacency) = state.node_mut(n).adjacency_opt_mut() {
                let outgoing: Vec<usize> = adjacency.edges(Direction::Out).iter().copied().collect();
                let incoming: Vec<usize> = adjacency.edges(Direction::In).iter().copied().collect();
                adjacency.clear();
                for e in outgoing {
                    let end = state.edge(e).end;
                    if let Some(adj) = state.node_mut(end).adjacency_opt_mut() {
                        adj.edges_mut(Direction::In).shift_remove(&e);
                    }
                    state.edge_mut(e).attached = false;
                }
                for e in incoming {
                    let start = state.edge(e).start;
                    if let Some(adj) = state.node_mut(start).adjacency_opt_mut() {
                        adj.edges_mut(Direction::Out).shift_remove(&e);
                    }
                    state.edge_mut(e).attached = false;
                }
            }
            let Some(hierarchy) = state.node_mut(n).hierarchy_opt_mut() else {
                return false;
            };
            let parent = hierarchy.parent.take();
            let children = std::mem::take(&mut hierarchy.children);
            if let Some(p) = parent
                && let Some(h) = state.node_mut(p).hierarchy_opt_mut()
            {
                h.children.shift_remove(&n);
            }
            for &c in &children {
                if let Some(h) = state.node_mut(c).hierarchy_opt_mut() {
                    h.parent = None;
                }
            }
            let changed = parent.is_some() || !children.is_empty();
            if changed {
                state.parent_changed();
            }
            changed
        });
        if parent_changed {
            tracing::trace!(node = %self, "tree links cleared");
        }
    }
}

impl<R: NodeRecord> GraphElement for NodeRef<R> {
    fn with_core<T>(&self, f: impl FnOnce(&ElementCore) -> T) -> T {
        f(self.factory.borrow().node(self.index).core())
    }

    fn with_core_mut<T>(&self, f: impl FnOnce(&mut ElementCore) -> T) -> T {
        self.factory
            .with_state_mut(|state| f(state.node_mut(self.index).core_mut()))
    }
}

impl<R: HasAdjacency> NodeRef<R> {
    fn edge_refs(&self, indexes: impl IntoIterator<Item = usize>) -> Vec<EdgeRef<R>> {
        indexes
            .into_iter()
            .map(|e| EdgeRef::new(self.factory.clone(), e))
            .collect()
    }

    pub fn degree(&self, direction: Direction) -> usize {
        self.factory
            .borrow()
            .node(self.index)
            .adjacency()
            .degree(direction)
    }

    /// Number of distinct edges touching this node.
    pub fn total_degree(&self) -> usize {
        self.factory.borrow().node(self.index).adjacency().all_edges().len()
    }

    pub fn edges(&self, direction: Direction) -> Vec<EdgeRef<R>> {
        let indexes: Vec<usize> = self
            .factory
            .borrow()
            .node(self.index)
            .adjacency()
            .edges(direction)
            .iter()
            .copied()
            .collect();
        self.edge_refs(indexes)
    }

    /// Edges in either direction, each listed once.
    pub fn all_edges(&self) -> Vec<EdgeRef<R>> {
        let indexes = self.factory.borrow().node(self.index).adjacency().all_edges();
        self.edge_refs(indexes)
    }

    /// Nodes at the far end of this node's edges in `direction`.
    pub fn neighbours(&self, direction: Direction) -> Vec<NodeRef<R>> {
        let state = self.factory.borrow();
        let far: IndexSet<usize> = state
            .node(self.index)
            .adjacency()
            .edges(direction)
            .iter()
            .map(|&e| {
                let edge = state.edge(e);
                match direction {
                    Direction::Out => edge.end,
                    Direction::In => edge.start,
                }
            })
            .collect();
        far.into_iter().map(|n| self.wrap(n)).collect()
    }

    /// Neighbours in both directions, each listed once.
    pub fn all_neighbours(&self) -> Vec<NodeRef<R>> {
        let mut seen = IndexSet::new();
        for direction in Direction::ALL {
            for node in self.neighbours(direction) {
                seen.insert(node.index);
            }
        }
        seen.into_iter().map(|n| self.wrap(n)).collect()
    }

    /// Create an edge between this node and `other`: `Out` makes this node
    /// the start, `In` the end.
    pub fn connect_to(
        &self,
        direction: Direction,
        other: &NodeRef<R>,
        props: Option<Properties>,
    ) -> Result<EdgeRef<R>, FactoryError> {
        match direction {
            Direction::Out => self.factory.make_edge(self, other, None, props),
            Direction::In => self.factory.make_edge(other, self, None, props),
        }
    }

    /// Register `edge` in this node's `direction` set. Returns false (and
    /// changes nothing) unless this node is the edge's endpoint for that
    /// direction, the edge is attached and it was missing from the set.
    pub fn add_edge(&self, edge: &EdgeRef<R>, direction: Direction) -> bool {
        if !self.factory.same_as(edge.factory()) {
            return false;
        }
        self.factory.with_state_mut(|state| {
            let record = state.edge(edge.index());
            let endpoint = match direction {
                Direction::Out => record.start,
                Direction::In => record.end,
            };
            if endpoint != self.index || !record.attached {
                return false;
            }
            state
                .node_mut(self.index)
                .adjacency_mut()
                .edges_mut(direction)
                .insert(edge.index())
        })
    }

    /// Cut the edges between this node and `other` in either direction.
    pub fn disconnect_from(&self, other: &NodeRef<R>) -> usize {
        self.disconnect_from_in(other, None)
    }

    /// Cut the edges between this node and `other` that run in `direction`
    /// as seen from this node. Returns the number of edges cut.
    pub fn disconnect_from_in(&self, other: &NodeRef<R>, direction: Option<Direction>) -> usize {
        if !self.owns(other) {
            return 0;
        }
        let (n, o) = (self.index, other.index);
        self.factory.with_state_mut(|state| {
            let adjacency = state.node(n).adjacency();
            let mut doomed = Vec::new();
            for dir in Direction::ALL {
                if direction.is_some_and(|d| d != dir) {
                    continue;
                }
                for &e in adjacency.edges(dir) {
                    let edge = state.edge(e);
                    let far = match dir {
                        Direction::Out => edge.end,
                        Direction::In => edge.start,
                    };
                    if far == o && !doomed.contains(&e) {
                        doomed.push(e);
                    }
                }
            }
            for &e in &doomed {
                let (start, end) = (state.edge(e).start, state.edge(e).end);
                state
                    .node_mut(start)
                    .adjacency_mut()
                    .edges_mut(Direction::Out)
                    .shift_remove(&e);
                state
                    .node_mut(end)
                    .adjacency_mut()
                    .edges_mut(Direction::In)
                    .shift_remove(&e);
                state.edge_mut(e).attached = false;
            }
            doomed.len()
        })
    }

    /// For every edge touching `other`, create an equivalent edge touching
    /// this node in the same direction. Labels and classes are kept and
    /// properties are deep-copied; `other`'s edges are not modified.
    pub fn add_connections_like(&self, other: &NodeRef<R>) -> Result<Vec<EdgeRef<R>>, FactoryError> {
        if !self.owns(other) {
            return Err(FactoryError::ForeignNode(other.id()));
        }
        let mut created = Vec::new();
        for direction in Direction::ALL {
            for edge in other.edges(direction) {
                let (start, end) = match direction {
                    Direction::Out => (self.clone(), edge.end_node()),
                    Direction::In => (edge.start_node(), self.clone()),
                };
                let (label, class_name, props) =
                    edge.with_core(|c| (c.label.clone(), c.class.clone(), c.data.to_properties()));
                let class = self.factory.edge_classes().class_named(&class_name).cloned();
                let copy = match class {
                    Some(class) => self.factory.make_edge_of_class(
                        &class,
                        Some(&label),
                        &start,
                        &end,
                        None,
                        props,
                    )?,
                    None => self
                        .factory
                        .make_labelled_edge(&label, &start, &end, None, props)?,
                };
                created.push(copy);
            }
        }
        Ok(created)
    }

    /// Drop this node's edges, then copy `other`'s.
    pub fn connect_like(&self, other: &NodeRef<R>) -> Result<Vec<EdgeRef<R>>, FactoryError> {
        self.disconnect_edges();
        self.add_connections_like(other)
    }

    /// Take over `other`'s edges: copy them here, then disconnect `other`.
    pub fn replace(&self, other: &NodeRef<R>) -> Result<Vec<EdgeRef<R>>, FactoryError> {
        let created = self.add_connections_like(other)?;
        other.disconnect_edges();
        Ok(created)
    }

    /// Cut every edge of this node, leaving tree links alone.
    pub fn disconnect_edges(&self) {
        for edge in self.all_edges() {
            edge.disconnect();
        }
    }

    /// Nodes within `distance` hops over edges in either direction.
    pub fn traversal(&self, distance: usize) -> Vec<NodeRef<R>> {
        self.bounded_walk(distance, None)
    }

    /// Nodes within `distance` hops following only `direction`.
    pub fn traversal_in(&self, distance: usize, direction: Direction) -> Vec<NodeRef<R>> {
        self.bounded_walk(distance, Some(direction))
    }

    fn bounded_walk(&self, distance: usize, direction: Option<Direction>) -> Vec<NodeRef<R>> {
        let indexes: Vec<usize> = {
            let state = self.factory.borrow();
            BoundedDfs::new(&state, self.index, distance, direction).collect()
        };
        indexes.into_iter().map(|n| self.wrap(n)).collect()
    }
}

impl<R: HasParentChild> NodeRef<R> {
    pub fn parent(&self) -> Option<NodeRef<R>> {
        let parent = self.factory.borrow().node(self.index).hierarchy().parent();
        parent.map(|p| self.wrap(p))
    }

    pub fn children(&self) -> Vec<NodeRef<R>> {
        let children: Vec<usize> = self
            .factory
            .borrow()
            .node(self.index)
            .hierarchy()
            .children()
            .iter()
            .copied()
            .collect();
        children.into_iter().map(|c| self.wrap(c)).collect()
    }

    pub fn n_children(&self) -> usize {
        self.factory.borrow().node(self.index).hierarchy().children().len()
    }

    pub fn has_children(&self) -> bool {
        self.n_children() > 0
    }

    pub fn has_child(&self, child: &NodeRef<R>) -> bool {
        self.owns(child)
            && self
                .factory
                .borrow()
                .node(self.index)
                .hierarchy()
                .children()
                .contains(&child.index)
    }

    /// Whether `ancestor` is reached by walking up from this node. A node is
    /// not its own descendant.
    pub fn is_descendant_of(&self, ancestor: &NodeRef<R>) -> bool {
        if !self.owns(ancestor) {
            return false;
        }
        let state = self.factory.borrow();
        let mut current = state.node(self.index).hierarchy().parent();
        while let Some(p) = current {
            if p == ancestor.index {
                return true;
            }
            current = state.node(p).hierarchy().parent();
        }
        false
    }

    /// Number of ancestors.
    pub fn depth(&self) -> usize {
        let state = self.factory.borrow();
        let mut depth = 0;
        let mut current = state.node(self.index).hierarchy().parent();
        while let Some(p) = current {
            depth += 1;
            current = state.node(p).hierarchy().parent();
        }
        depth
    }

    /// This node followed by all its descendants, in preorder.
    pub fn sub_tree(&self) -> Vec<NodeRef<R>> {
        let indexes: Vec<usize> = {
            let state = self.factory.borrow();
            SubtreeIterator::new(&state, self.index).collect()
        };
        indexes.into_iter().map(|n| self.wrap(n)).collect()
    }

    /// Attach this node under `parent`. Returns false without changing
    /// anything if `parent` is this node, this node already has a parent,
    /// `parent` belongs to another factory, or `parent` is a descendant of
    /// this node.
    pub fn connect_parent(&self, parent: &NodeRef<R>) -> bool {
        if !self.owns(parent) || parent.index == self.index || parent.is_descendant_of(self) {
            return false;
        }
        let (n, p) = (self.index, parent.index);
        self.factory.with_state_mut(|state| {
            if state.node(n).hierarchy().parent().is_some() {
                return false;
            }
            state.node_mut(n).hierarchy_mut().parent = Some(p);
            state.node_mut(p).hierarchy_mut().children.insert(n);
            state.parent_changed();
            true
        })
    }

    pub fn connect_child(&self, child: &NodeRef<R>) -> bool {
        child.connect_parent(self)
    }

    /// Returns how many of `children` were attached.
    pub fn connect_children<'a>(&self, children: impl IntoIterator<Item = &'a NodeRef<R>>) -> usize {
        children
            .into_iter()
            .filter(|child| self.connect_child(child))
            .count()
    }

    /// Detach this node from its parent, keeping its own children.
    pub fn disconnect_parent(&self) -> bool {
        let n = self.index;
        self.factory.with_state_mut(|state| {
            let Some(p) = state.node_mut(n).hierarchy_mut().parent.take() else {
                return false;
            };
            state.node_mut(p).hierarchy_mut().children.shift_remove(&n);
            state.parent_changed();
            true
        })
    }

    /// Structural equality: same factory, structurally equal parents (or
    /// both none) and children that pair up one-to-one into structurally
    /// equal subtrees. Ids are ignored. Expensive: compares whole subtrees
    /// at every ancestor level.
    pub fn structurally_eq(&self, other: &NodeRef<R>) -> bool {
        if !self.owns(other) || !subtree_eq(self, other) {
            return false;
        }
        match (self.parent(), other.parent()) {
            (None, None) => true,
            (Some(a), Some(b)) => a.structurally_eq(&b),
            _ => false,
        }
    }
}

fn subtree_eq<R: HasParentChild>(a: &NodeRef<R>, b: &NodeRef<R>) -> bool {
    let (ours, theirs) = (a.children(), b.children());
    if ours.len() != theirs.len() {
        return false;
    }
    let mut unmatched = theirs;
    for child in &ours {
        match unmatched.iter().position(|c| subtree_eq(child, c)) {
            Some(i) => {
                unmatched.swap_remove(i);
            }
            None => return false,
        }
    }
    true
}

impl NodeRef<GraphNodeRecord> {
    /// No incoming edges.
    pub fn is_root(&self) -> bool {
        self.degree(Direction::In) == 0
    }

    /// No outgoing edges.
    pub fn is_leaf(&self) -> bool {
        self.degree(Direction::Out) == 0
    }

    /// `label:id` followed by one line per edge.
    pub fn to_detailed_string(&self) -> String {
        format_debug::detailed_string(self, &format_debug::edge_lines(self))
    }
}

impl NodeRef<TreeNodeRecord> {
    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    pub fn is_leaf(&self) -> bool {
        !self.has_children()
    }

    /// `label:id` followed by its parent and children.
    pub fn to_detailed_string(&self) -> String {
        format_debug::detailed_string(self, &format_debug::tree_lines(self))
    }
}

impl NodeRef<TreeGraphNodeRecord> {
    /// Parent-less, regardless of cross-links.
    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Childless, regardless of cross-links.
    pub fn is_leaf(&self) -> bool {
        !self.has_children()
    }

    /// `label:id` followed by its tree links and cross-links.
    pub fn to_detailed_string(&self) -> String {
        let mut lines = format_debug::tree_lines(self);
        lines.extend(format_debug::edge_lines(self));
        format_debug::detailed_string(self, &lines)
    }
}

impl<R: NodeRecord> PartialEq for NodeRef<R> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && std::rc::Rc::ptr_eq(&self.factory.state, &other.factory.state)
    }
}

impl<R: NodeRecord> Eq for NodeRef<R> {}

impl<R: NodeRecord> Hash for NodeRef<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.factory.id().hash(state);
        self.index.hash(state);
    }
}

impl<R: NodeRecord> Display for NodeRef<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.factory.state.try_borrow() {
            Ok(state) => {
                let core = state.node(self.index).core();
                write!(f, "{}:{}", core.label, core.identity.id())
            }
            Err(_) => write!(f, "#{}", self.index),
        }
    }
}

impl<R: NodeRecord> Debug for NodeRef<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", R::KIND, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        factory::{GraphFactory, TreeFactory, TreeGraphFactory},
        property::{PropertyList, Value},
    };

    fn pair(factory: &GraphFactory) -> (Node, Node) {
        (
            factory.make_node(Some("a"), None).unwrap(),
            factory.make_node(Some("b"), None).unwrap(),
        )
    }

    #[test]
    fn test_connect_to_orients_edges() {
        let factory = GraphFactory::new("T");
        let (a, b) = pair(&factory);
        let out = a.connect_to(Direction::Out, &b, None).unwrap();
        let inc = a.connect_to(Direction::In, &b, None).unwrap();
        assert_eq!(out.start_node(), a);
        assert_eq!(inc.end_node(), a);
        assert_eq!(a.degree(Direction::Out), 1);
        assert_eq!(a.degree(Direction::In), 1);
        assert_eq!(a.all_edges().len(), 2);
        assert_eq!(a.all_neighbours(), vec![b.clone()]);
        assert!(!a.is_root());
        assert!(!b.is_leaf());
    }

    #[test]
    fn test_disconnect_clears_both_sides() {
        let factory = GraphFactory::new("T");
        let (a, b) = pair(&factory);
        let c = factory.make_node(Some("c"), None).unwrap();
        let ab = a.connect_to(Direction::Out, &b, None).unwrap();
        c.connect_to(Direction::Out, &a, None).unwrap();
        a.disconnect();
        assert_eq!(a.total_degree(), 0);
        assert_eq!(b.degree(Direction::In), 0);
        assert_eq!(c.degree(Direction::Out), 0);
        assert!(ab.is_orphaned());
        assert_eq!(ab.start_node(), a);
    }

    #[test]
    fn test_disconnect_from_one_neighbour() {
        let factory = GraphFactory::new("T");
        let (a, b) = pair(&factory);
        let c = factory.make_node(Some("c"), None).unwrap();
        a.connect_to(Direction::Out, &b, None).unwrap();
        a.connect_to(Direction::In, &b, None).unwrap();
        a.connect_to(Direction::Out, &c, None).unwrap();
        assert_eq!(a.disconnect_from_in(&b, Some(Direction::Out)), 1);
        assert_eq!(a.degree(Direction::In), 1);
        assert_eq!(a.disconnect_from(&b), 1);
        assert_eq!(a.neighbours(Direction::Out), vec![c]);
        assert_eq!(b.total_degree(), 0);
    }

    #[test]
    fn test_add_edge_rejects_non_endpoint() {
        let factory = GraphFactory::new("T");
        let (a, b) = pair(&factory);
        let e = a.connect_to(Direction::Out, &b, None).unwrap();
        assert!(!b.add_edge(&e, Direction::Out));
        assert!(!a.add_edge(&e, Direction::In));
        assert!(!a.add_edge(&e, Direction::Out));
        assert_eq!(b.degree(Direction::Out), 0);
    }

    #[test]
    fn test_add_connections_like_copies_properties() {
        let factory = GraphFactory::new("T");
        let (a, b) = pair(&factory);
        let c = factory.make_node(Some("c"), None).unwrap();
        let props: PropertyList = [("w", 1)].into_iter().collect();
        let original = factory
            .make_labelled_edge("likes", &a, &b, None, Some(props.into()))
            .unwrap();
        let copies = c.add_connections_like(&b).unwrap();
        assert_eq!(copies.len(), 1);
        let copy = &copies[0];
        assert_eq!(copy.start_node(), a);
        assert_eq!(copy.end_node(), c);
        assert_eq!(copy.label(), "likes");
        copy.set_property("w", Value::Integer(2)).unwrap();
        assert_eq!(original.property("w"), Some(Value::Integer(1)));
        assert_eq!(b.degree(Direction::In), 1);
    }

    #[test]
    fn test_replace_moves_connections() {
        let factory = GraphFactory::new("T");
        let (a, b) = pair(&factory);
        let c = factory.make_node(Some("c"), None).unwrap();
        a.connect_to(Direction::Out, &b, None).unwrap();
        c.replace(&b).unwrap();
        assert_eq!(b.total_degree(), 0);
        assert_eq!(a.neighbours(Direction::Out), vec![c]);
    }

    #[test]
    fn test_rename_updates_lookup() {
        let factory = GraphFactory::new("T");
        let (a, b) = pair(&factory);
        assert!(a.rename("b").is_err());
        a.rename("z").unwrap();
        assert_eq!(factory.find_node("z"), Some(a));
        assert_eq!(factory.find_node("a"), None);
        assert_eq!(factory.find_node("b"), Some(b));
    }

    #[test]
    fn test_tree_links() {
        let factory = TreeFactory::new("T");
        let root = factory.make_node(Some("r"), None).unwrap();
        let a = factory.make_node(Some("a"), None).unwrap();
        let b = factory.make_node(Some("b"), None).unwrap();
        assert!(!root.connect_parent(&root));
        assert_eq!(root.connect_children([&a, &b]), 2);
        let c = factory.make_node(Some("c"), None).unwrap();
        assert!(c.connect_parent(&a));
        assert!(!c.connect_parent(&b));
        assert!(!root.connect_parent(&c));
        assert_eq!(c.parent(), Some(a.clone()));
        assert!(a.has_child(&c));
        assert!(c.is_descendant_of(&root));
        assert_eq!(c.depth(), 2);
        assert_eq!(
            root.sub_tree().iter().map(|n| n.id()).collect::<Vec<_>>(),
            vec!["r", "a", "c", "b"]
        );
        a.disconnect();
        assert_eq!(c.parent(), None);
        assert!(!root.has_child(&a));
        assert!(a.is_root() && a.is_leaf());
        assert_eq!(root.n_children(), 1);
    }

    #[test]
    fn test_structural_equality_ignores_ids() {
        let factory = TreeFactory::new("T");
        let make = |id: &str| factory.make_node(Some(id), None).unwrap();
        let (r, a, b, a1, b1) = (make("r"), make("a"), make("b"), make("a1"), make("b1"));
        r.connect_children([&a, &b]);
        a.connect_child(&a1);
        assert!(!a.structurally_eq(&b));
        b.connect_child(&b1);
        assert!(a.structurally_eq(&b));
        assert!(a1.structurally_eq(&b1));
        assert!(!a1.structurally_eq(&r));
        let other = TreeFactory::new("U").make_node(None, None).unwrap();
        assert!(!r.structurally_eq(&other));
    }

    #[test]
    fn test_tree_graph_node_has_both_capabilities() {
        let factory = TreeGraphFactory::new("T");
        let r = factory.make_node(Some("r"), None).unwrap();
        let a = factory.make_node(Some("a"), None).unwrap();
        assert!(a.connect_parent(&r));
        a.connect_to(Direction::Out, &r, None).unwrap();
        assert!(a.is_leaf());
        assert!(r.is_root());
        assert_eq!(r.degree(Direction::In), 1);
        a.disconnect();
        assert_eq!(r.total_degree(), 0);
        assert!(!r.has_children());
    }
}
