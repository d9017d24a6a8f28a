//! Node containers.
//!
//! A container is an index of node handles over one factory's arena. Edges
//! are never stored here; they are found by walking node adjacency.
//! Adding or removing a node only touches the index, never the node's links.

mod graph;
mod tree;
mod tree_graph;

use std::{cell::RefCell, rc::Rc};

use indexmap::IndexSet;

use crate::{
    edge::EdgeRef,
    element::GraphElement,
    factory::Factory,
    node::NodeRef,
    record::{HasAdjacency, HasParentChild, NodeRecord},
};

pub use graph::Graph;
pub use tree::Tree;
pub use tree_graph::TreeGraph;

/// The part of a container a factory writes into.
#[derive(Debug, Default)]
pub(crate) struct NodeIndex {
    members: IndexSet<usize>,
    /// `(factory generation, root)` from the last `root()` call.
    root: Option<(u64, Option<usize>)>,
}

impl NodeIndex {
    pub(crate) fn insert(&mut self, node: usize) -> bool {
        self.root = None;
        self.members.insert(node)
    }

    fn remove(&mut self, node: usize) -> bool {
        self.root = None;
        self.members.shift_remove(&node)
    }

    pub(crate) fn invalidate_root(&mut self) {
        self.root = None;
    }
}

/// State and operations shared by every container kind.
pub(crate) struct NodeSet<R: NodeRecord> {
    factory: Factory<R>,
    index: Rc<RefCell<NodeIndex>>,
}

impl<R: NodeRecord> NodeSet<R> {
    /// An empty set that receives every node `factory` creates from now on.
    pub(crate) fn managed(factory: &Factory<R>) -> Self {
        let set = Self::detached(factory);
        factory.manage(&set.index);
        set
    }

    pub(crate) fn detached(factory: &Factory<R>) -> Self {
        Self {
            factory: factory.clone(),
            index: Rc::new(RefCell::new(NodeIndex::default())),
        }
    }

    pub(crate) fn factory(&self) -> &Factory<R> {
        &self.factory
    }

    fn wrap(&self, index: usize) -> NodeRef<R> {
        NodeRef::new(self.factory.clone(), index)
    }

    pub(crate) fn add(&self, node: &NodeRef<R>) -> bool {
        self.factory.same_as(node.factory()) && self.index.borrow_mut().insert(node.index())
    }

    pub(crate) fn remove(&self, node: &NodeRef<R>) -> bool {
        self.factory.same_as(node.factory()) && self.index.borrow_mut().remove(node.index())
    }

    pub(crate) fn contains(&self, node: &NodeRef<R>) -> bool {
        self.factory.same_as(node.factory()) && self.index.borrow().members.contains(&node.index())
    }

    pub(crate) fn len(&self) -> usize {
        self.index.borrow().members.len()
    }

    pub(crate) fn clear(&self) {
        let mut index = self.index.borrow_mut();
        index.members.clear();
        index.root = None;
    }

    pub(crate) fn nodes(&self) -> Vec<NodeRef<R>> {
        let members: Vec<usize> = self.index.borrow().members.iter().copied().collect();
        members.into_iter().map(|n| self.wrap(n)).collect()
    }

    pub(crate) fn filter(&self, pred: impl Fn(&NodeRef<R>) -> bool) -> Vec<NodeRef<R>> {
        self.nodes().into_iter().filter(|n| pred(n)).collect()
    }

    /// Hashed lookup in the factory, then a membership check.
    pub(crate) fn find_node(&self, id: &str) -> Option<NodeRef<R>> {
        self.factory.find_node(id).filter(|node| self.contains(node))
    }
}

impl<R: HasAdjacency> NodeSet<R> {
    /// Every edge leaving a member, found by walking OUT sets.
    pub(crate) fn edges(&self) -> Vec<EdgeRef<R>> {
        self.nodes()
            .iter()
            .flat_map(|node| node.edges(crate::direction::Direction::Out))
            .collect()
    }

    pub(crate) fn find_edge(&self, id: &str) -> Option<EdgeRef<R>> {
        self.edges().into_iter().find(|edge| edge.id() == id)
    }
}

impl<R: HasParentChild> NodeSet<R> {
    /// Members whose parent is not a member. For a container that holds
    /// whole trees these are exactly the parent-less nodes.
    pub(crate) fn roots(&self) -> Vec<NodeRef<R>> {
        self.filter(|n| n.parent().is_none_or(|p| !self.contains(&p)))
    }

    pub(crate) fn leaves(&self) -> Vec<NodeRef<R>> {
        self.filter(|n| !n.has_children())
    }

    /// The only root, or none if there are zero or several.
    pub(crate) fn root(&self) -> Option<NodeRef<R>> {
        let generation = self.factory.generation();
        if let Some((cached, root)) = self.index.borrow().root
            && cached == generation
        {
            return root.map(|r| self.wrap(r));
        }
        let roots = self.roots();
        let root = match roots.as_slice() {
            [only] => Some(only.index()),
            _ => None,
        };
        self.index.borrow_mut().root = Some((generation, root));
        root.map(|r| self.wrap(r))
    }

    pub(crate) fn max_depth(&self) -> usize {
        self.nodes().iter().map(NodeRef::depth).max().unwrap_or(0)
    }

    /// Depth of the shallowest leaf.
    pub(crate) fn min_depth(&self) -> usize {
        self.leaves().iter().map(NodeRef::depth).min().unwrap_or(0)
    }

    /// A detached set holding `node` and its descendants.
    pub(crate) fn sub_tree(&self, node: &NodeRef<R>) -> NodeSet<R> {
        let set = NodeSet::detached(&self.factory);
        for n in node.sub_tree() {
            set.add(&n);
        }
        set
    }
}

/// Delegates the operations every container offers to its `NodeSet`.
macro_rules! node_set_container {
    ($container:ident, $factory:ty, $node:ty) => {
        impl $container {
            /// An empty container that receives every node `factory`
            /// creates from now on.
            pub fn new(factory: &$factory) -> Self {
                Self {
                    set: $crate::container::NodeSet::managed(factory),
                }
            }

            /// An empty container that only holds nodes added explicitly.
            pub fn detached(factory: &$factory) -> Self {
                Self {
                    set: $crate::container::NodeSet::detached(factory),
                }
            }

            pub fn factory(&self) -> &$factory {
                self.set.factory()
            }

            /// Index `node`. Returns false if it was already present or
            /// belongs to another factory.
            pub fn add_node(&mut self, node: &$node) -> bool {
                self.set.add(node)
            }

            /// Drop `node` from the index. Its links are left alone; callers
            /// that want the node gone should `disconnect()` it as well.
            pub fn remove_node(&mut self, node: &$node) -> bool {
                self.set.remove(node)
            }

            pub fn contains(&self, node: &$node) -> bool {
                self.set.contains(node)
            }

            pub fn size(&self) -> usize {
                self.set.len()
            }

            pub fn is_empty(&self) -> bool {
                self.set.len() == 0
            }

            pub fn clear(&mut self) {
                self.set.clear()
            }

            /// Members in insertion order.
            pub fn nodes(&self) -> Vec<$node> {
                self.set.nodes()
            }

            pub fn find_node(&self, id: &str) -> Option<$node> {
                self.set.find_node(id)
            }
        }
    };
}

pub(crate) use node_set_container;
