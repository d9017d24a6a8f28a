use std::fmt::{Debug, Display, Formatter};

use super::{NodeSet, node_set_container};
use crate::{
    edge::CrossLink,
    factory::TreeGraphFactory,
    format_debug,
    node::TreeGraphNode,
    record::TreeGraphNodeRecord,
};

/// A tree whose nodes may also be joined by directed cross-links.
pub struct TreeGraph {
    set: NodeSet<TreeGraphNodeRecord>,
}

node_set_container!(TreeGraph, TreeGraphFactory, TreeGraphNode);

impl TreeGraph {
    /// Cross-links leaving any member, found by walking OUT sets.
    pub fn edges(&self) -> Vec<CrossLink> {
        self.set.edges()
    }

    pub fn find_edge(&self, id: &str) -> Option<CrossLink> {
        self.set.find_edge(id)
    }

    pub fn root(&self) -> Option<TreeGraphNode> {
        self.set.root()
    }

    pub fn roots(&self) -> Vec<TreeGraphNode> {
        self.set.roots()
    }

    pub fn leaves(&self) -> Vec<TreeGraphNode> {
        self.set.leaves()
    }

    pub fn max_depth(&self) -> usize {
        self.set.max_depth()
    }

    pub fn min_depth(&self) -> usize {
        self.set.min_depth()
    }

    /// A detached container of `node` and everything reachable from it
    /// through child links. Cross-links are not followed.
    pub fn sub_tree(&self, node: &TreeGraphNode) -> TreeGraph {
        TreeGraph {
            set: self.set.sub_tree(node),
        }
    }
}

impl Display for TreeGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        format_debug::write_summary(f, "TreeGraph", self.size(), self.edges().len())
    }
}

impl Debug for TreeGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        format_debug::write_tree_debug(f, "TreeGraph", &self.roots())?;
        format_debug::write_debug(f, "CrossLinks", &[], &self.edges())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;

    #[test]
    fn test_sub_tree_ignores_cross_links() {
        let factory = TreeGraphFactory::new("TG");
        let tg = TreeGraph::new(&factory);
        let make = |id: &str| factory.make_node(Some(id), None).unwrap();
        let (r, a, b, c) = (make("r"), make("a"), make("b"), make("c"));
        r.connect_children([&a, &b]);
        a.connect_child(&c);
        c.connect_to(Direction::Out, &b, None).unwrap();

        assert_eq!(tg.root(), Some(r.clone()));
        assert_eq!(tg.edges().len(), 1);
        assert_eq!(tg.leaves(), vec![b.clone(), c.clone()]);
        assert_eq!(tg.max_depth(), 2);
        assert_eq!(tg.min_depth(), 1);

        let sub = tg.sub_tree(&a);
        assert_eq!(sub.nodes(), vec![a.clone(), c.clone()]);
        assert!(!sub.contains(&b));
        assert_eq!(sub.root(), Some(a));
        // Cross-links leaving subtree members are still visible.
        assert_eq!(sub.edges().len(), 1);
    }
}
