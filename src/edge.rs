use std::{
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
    rc::Rc,
};

use derivative::Derivative;

use crate::{
    direction::Direction,
    element::{ElementCore, GraphElement},
    error::{GraphError, IdentityError},
    factory::Factory,
    node::NodeRef,
    record::{GraphNodeRecord, HasAdjacency, TreeGraphNodeRecord},
};

pub type Edge = EdgeRef<GraphNodeRecord>;
pub type CrossLink = EdgeRef<TreeGraphNodeRecord>;

/// A handle to a directed edge.
///
/// Endpoints can only be changed through operations that update both
/// endpoint sets together.
#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub struct EdgeRef<R: HasAdjacency> {
    factory: Factory<R>,
    index: usize,
}

impl<R: HasAdjacency> EdgeRef<R> {
    pub(crate) fn new(factory: Factory<R>, index: usize) -> Self {
        Self { factory, index }
    }

    pub fn factory(&self) -> &Factory<R> {
        &self.factory
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub fn start_node(&self) -> NodeRef<R> {
        let start = self.factory.borrow().edge(self.index).start;
        NodeRef::new(self.factory.clone(), start)
    }

    pub fn end_node(&self) -> NodeRef<R> {
        let end = self.factory.borrow().edge(self.index).end;
        NodeRef::new(self.factory.clone(), end)
    }

    /// The endpoint opposite `node`. A self-loop returns `node` itself.
    pub fn other_node(&self, node: &NodeRef<R>) -> Result<NodeRef<R>, GraphError> {
        let (start, end) = {
            let state = self.factory.borrow();
            let edge = state.edge(self.index);
            (edge.start, edge.end)
        };
        if self.factory.same_as(node.factory()) {
            if node.index() == start {
                return Ok(NodeRef::new(self.factory.clone(), end));
            }
            if node.index() == end {
                return Ok(NodeRef::new(self.factory.clone(), start));
            }
        }
        Err(GraphError::NotAnEndpoint {
            edge: self.to_short_string(),
            node: node.to_short_string(),
        })
    }

    /// False once the edge has been disconnected from its endpoints.
    pub fn is_orphaned(&self) -> bool {
        !self.factory.borrow().edge(self.index).attached
    }

    /// Remove the edge from both endpoints' sets. The edge keeps its
    /// identity and remembers its former endpoints.
    pub fn disconnect(&self) {
        self.factory.with_state_mut(|state| {
            let edge = state.edge(self.index);
            if !edge.attached {
                return;
            }
            let (start, end) = (edge.start, edge.end);
            state
                .node_mut(start)
                .adjacency_mut()
                .edges_mut(Direction::Out)
                .shift_remove(&self.index);
            state
                .node_mut(end)
                .adjacency_mut()
                .edges_mut(Direction::In)
                .shift_remove(&self.index);
            state.edge_mut(self.index).attached = false;
        });
    }

    /// Re-attach an orphaned edge between `start` and `end`. Returns false
    /// if the edge is still attached or a node belongs to another factory.
    pub fn connect(&self, start: &NodeRef<R>, end: &NodeRef<R>) -> bool {
        if !self.factory.same_as(start.factory()) || !self.factory.same_as(end.factory()) {
            return false;
        }
        let (s, e) = (start.index(), end.index());
        self.factory.with_state_mut(|state| {
            if state.edge(self.index).attached {
                return false;
            }
            let edge = state.edge_mut(self.index);
            edge.start = s;
            edge.end = e;
            edge.attached = true;
            state
                .node_mut(s)
                .adjacency_mut()
                .edges_mut(Direction::Out)
                .insert(self.index);
            state
                .node_mut(e)
                .adjacency_mut()
                .edges_mut(Direction::In)
                .insert(self.index);
            true
        })
    }

    /// Move the start of an attached edge to `node`.
    pub fn set_start_node(&self, node: &NodeRef<R>) -> bool {
        self.move_endpoint(node, Direction::Out)
    }

    /// Move the end of an attached edge to `node`.
    pub fn set_end_node(&self, node: &NodeRef<R>) -> bool {
        self.move_endpoint(node, Direction::In)
    }

    /// `side` names the set of the endpoint being moved: `Out` for the
    /// start, `In` for the end.
    fn move_endpoint(&self, node: &NodeRef<R>, side: Direction) -> bool {
        if !self.factory.same_as(node.factory()) {
            return false;
        }
        let target = node.index();
        self.factory.with_state_mut(|state| {
            let edge = state.edge(self.index);
            if !edge.attached {
                return false;
            }
            let old = match side {
                Direction::Out => edge.start,
                Direction::In => edge.end,
            };
            state
                .node_mut(old)
                .adjacency_mut()
                .edges_mut(side)
                .shift_remove(&self.index);
            let edge = state.edge_mut(self.index);
            match side {
                Direction::Out => edge.start = target,
                Direction::In => edge.end = target,
            }
            state
                .node_mut(target)
                .adjacency_mut()
                .edges_mut(side)
                .insert(self.index);
            true
        })
    }

    pub fn rename(&self, new_id: &str) -> Result<(), IdentityError> {
        self.factory.rename_edge(self.index, new_id)
    }
}

impl<R: HasAdjacency> GraphElement for EdgeRef<R> {
    fn with_core<T>(&self, f: impl FnOnce(&ElementCore) -> T) -> T {
        f(&self.factory.borrow().edge(self.index).core)
    }

    fn with_core_mut<T>(&self, f: impl FnOnce(&mut ElementCore) -> T) -> T {
        self.factory
            .with_state_mut(|state| f(&mut state.edge_mut(self.index).core))
    }
}

impl<R: HasAdjacency> PartialEq for EdgeRef<R> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && Rc::ptr_eq(&self.factory.state, &other.factory.state)
    }
}

impl<R: HasAdjacency> Eq for EdgeRef<R> {}

impl<R: HasAdjacency> Hash for EdgeRef<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.factory.id().hash(state);
        self.index.hash(state);
    }
}

impl<R: HasAdjacency> Display for EdgeRef<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Ok(state) = self.factory.state.try_borrow() else {
            return write!(f, "#{}", self.index);
        };
        let edge = state.edge(self.index);
        let short = |n: usize| {
            let core = state.node(n).core();
            format!("{}:{}", core.label, core.identity.id())
        };
        write!(
            f,
            "[{}] {} {} [{}]",
            short(edge.start),
            edge.core.label,
            edge.core.identity.id(),
            short(edge.end)
        )
    }
}

impl<R: HasAdjacency> Debug for EdgeRef<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Edge({self})")
    }
}
