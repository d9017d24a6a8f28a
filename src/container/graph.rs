use std::fmt::{Debug, Display, Formatter};

use super::{NodeSet, node_set_container};
use crate::{
    edge::Edge,
    factory::GraphFactory,
    format_debug,
    node::Node,
    record::GraphNodeRecord,
};

/// A directed graph: an index of [`Node`]s whose edges are discovered
/// through the nodes.
pub struct Graph {
    set: NodeSet<GraphNodeRecord>,
}

node_set_container!(Graph, GraphFactory, Node);

impl Graph {
    /// Edges leaving any member, synthesized on every call by walking OUT
    /// sets.
    pub fn edges(&self) -> Vec<Edge> {
        self.set.edges()
    }

    /// Linear in the number of edges.
    pub fn find_edge(&self, id: &str) -> Option<Edge> {
        self.set.find_edge(id)
    }

    /// Members without incoming edges.
    pub fn roots(&self) -> Vec<Node> {
        self.set.filter(Node::is_root)
    }

    /// Members without outgoing edges.
    pub fn leaves(&self) -> Vec<Node> {
        self.set.filter(Node::is_leaf)
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        format_debug::write_summary(f, "Graph", self.size(), self.edges().len())
    }
}

impl Debug for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        format_debug::write_debug(f, "Graph", &self.nodes(), &self.edges())
    }
}
