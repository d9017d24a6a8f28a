use std::fmt::{Debug, Display, Formatter};

use super::{NodeSet, node_set_container};
use crate::{factory::TreeFactory, format_debug, node::TreeNode, record::TreeNodeRecord};

/// An index of [`TreeNode`]s linked by parent and child references.
pub struct Tree {
    set: NodeSet<TreeNodeRecord>,
}

node_set_container!(Tree, TreeFactory, TreeNode);

impl Tree {
    /// A detached tree holding `root` and all its descendants.
    pub fn from_root(root: &TreeNode) -> Self {
        let tree = Self::detached(root.factory());
        for node in root.sub_tree() {
            tree.set.add(&node);
        }
        tree
    }

    /// The unique member without a parent in this tree. None once the
    /// index holds a forest.
    pub fn root(&self) -> Option<TreeNode> {
        self.set.root()
    }

    pub fn roots(&self) -> Vec<TreeNode> {
        self.set.roots()
    }

    pub fn leaves(&self) -> Vec<TreeNode> {
        self.set.leaves()
    }

    pub fn max_depth(&self) -> usize {
        self.set.max_depth()
    }

    pub fn min_depth(&self) -> usize {
        self.set.min_depth()
    }

    /// A detached tree of `node` and everything below it.
    pub fn sub_tree(&self, node: &TreeNode) -> Tree {
        Tree {
            set: self.set.sub_tree(node),
        }
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        format_debug::write_summary(f, "Tree", self.size(), 0)
    }
}

impl Debug for Tree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        format_debug::write_tree_debug(f, "Tree", &self.roots())
    }
}
