//! Arena records. Factories store one record per node and per edge, and
//! handles refer to them by index.
//!
//! Node records compose two capabilities: [`HasAdjacency`] (directed edge
//! sets) and [`HasParentChild`] (a tree link). [`TreeGraphNodeRecord`]
//! carries both.

use indexmap::IndexSet;

use crate::{direction::Direction, element::ElementCore};

/// The incoming and outgoing edge indexes of a node.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
    incoming: IndexSet<usize>,
    outgoing: IndexSet<usize>,
}

impl Adjacency {
    pub fn edges(&self, direction: Direction) -> &IndexSet<usize> {
        match direction {
            Direction::In => &self.incoming,
            Direction::Out => &self.outgoing,
        }
    }

    pub(crate) fn edges_mut(&mut self, direction: Direction) -> &mut IndexSet<usize> {
        match direction {
            Direction::In => &mut self.incoming,
            Direction::Out => &mut self.outgoing,
        }
    }

    pub fn degree(&self, direction: Direction) -> usize {
        self.edges(direction).len()
    }

    /// Union of both sets; a self-loop is listed once.
    pub fn all_edges(&self) -> IndexSet<usize> {
        self.incoming.union(&self.outgoing).copied().collect()
    }

    pub(crate) fn clear(&mut self) {
        self.incoming.clear();
        self.outgoing.clear();
    }
}

/// The parent and child indexes of a tree node.
#[derive(Clone, Debug, Default)]
pub struct Hierarchy {
    pub(crate) parent: Option<usize>,
    pub(crate) children: IndexSet<usize>,
}

impl Hierarchy {
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn children(&self) -> &IndexSet<usize> {
        &self.children
    }
}

/// A record stored in a factory's node arena.
pub trait NodeRecord: 'static {
    /// Human-readable kind, used in diagnostics.
    const KIND: &'static str;

    fn from_core(core: ElementCore) -> Self;

    fn core(&self) -> &ElementCore;

    fn core_mut(&mut self) -> &mut ElementCore;

    /// The adjacency sets, for records that have them.
    fn adjacency_opt_mut(&mut self) -> Option<&mut Adjacency> {
        None
    }

    /// The tree link, for records that have one.
    fn hierarchy_opt_mut(&mut self) -> Option<&mut Hierarchy> {
        None
    }
}

/// Nodes that take part in directed edges.
pub trait HasAdjacency: NodeRecord {
    fn adjacency(&self) -> &Adjacency;
    fn adjacency_mut(&mut self) -> &mut Adjacency;
}

/// Nodes that take part in a single-parent hierarchy.
pub trait HasParentChild: NodeRecord {
    fn hierarchy(&self) -> &Hierarchy;
    fn hierarchy_mut(&mut self) -> &mut Hierarchy;
}

#[derive(Debug)]
pub struct GraphNodeRecord {
    core: ElementCore,
    adjacency: Adjacency,
}

#[derive(Debug)]
pub struct TreeNodeRecord {
    core: ElementCore,
    hierarchy: Hierarchy,
}

#[derive(Debug)]
pub struct TreeGraphNodeRecord {
    core: ElementCore,
    adjacency: Adjacency,
    hierarchy: Hierarchy,
}

macro_rules! impl_core {
    () => {
        fn core(&self) -> &ElementCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut ElementCore {
            &mut self.core
        }
    };
}

impl NodeRecord for GraphNodeRecord {
    const KIND: &'static str = "Node";

    fn from_core(core: ElementCore) -> Self {
        Self {
            core,
            adjacency: Adjacency::default(),
        }
    }

    impl_core!();

    fn adjacency_opt_mut(&mut self) -> Option<&mut Adjacency> {
        Some(&mut self.adjacency)
    }
}

impl NodeRecord for TreeNodeRecord {
    const KIND: &'static str = "TreeNode";

    fn from_core(core: ElementCore) -> Self {
        Self {
            core,
            hierarchy: Hierarchy::default(),
        }
    }

    impl_core!();

    fn hierarchy_opt_mut(&mut self) -> Option<&mut Hierarchy> {
        Some(&mut self.hierarchy)
    }
}

impl NodeRecord for TreeGraphNodeRecord {
    const KIND: &'static str = "TreeGraphNode";

    fn from_core(core: ElementCore) -> Self {
        Self {
            core,
            adjacency: Adjacency::default(),
            hierarchy: Hierarchy::default(),
        }
    }

    impl_core!();

    fn adjacency_opt_mut(&mut self) -> Option<&mut Adjacency> {
        Some(&mut self.adjacency)
    }

    fn hierarchy_opt_mut(&mut self) -> Option<&mut Hierarchy> {
        Some(&mut self.hierarchy)
    }
}

impl HasAdjacency for GraphNodeRecord {
    fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    fn adjacency_mut(&mut self) -> &mut Adjacency {
        &mut self.adjacency
    }
}

impl HasAdjacency for TreeGraphNodeRecord {
    fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    fn adjacency_mut(&mut self) -> &mut Adjacency {
        &mut self.adjacency
    }
}

impl HasParentChild for TreeNodeRecord {
    fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    fn hierarchy_mut(&mut self) -> &mut Hierarchy {
        &mut self.hierarchy
    }
}

impl HasParentChild for TreeGraphNodeRecord {
    fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    fn hierarchy_mut(&mut self) -> &mut Hierarchy {
        &mut self.hierarchy
    }
}

/// An edge record. `attached` is false once the edge has been disconnected
/// from both endpoints.
#[derive(Debug)]
pub struct EdgeRecord {
    pub(crate) core: ElementCore,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) attached: bool,
}
