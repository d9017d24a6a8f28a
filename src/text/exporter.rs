//! Writes containers back out in the dialect their parser reads.

use std::io::{self, Write};

use tracing::{debug, warn};

use super::{Dialect, HEADER_KEYS, config::ParserConfig};
use crate::{
    container::{Graph, Tree, TreeGraph},
    edge::EdgeRef,
    element::GraphElement,
    factory::Factory,
    node::NodeRef,
    property::types::TypeRegistry,
    record::{HasAdjacency, HasParentChild, NodeRecord},
};

pub struct Exporter<'c> {
    types: &'c TypeRegistry,
    indent: char,
}

impl<'c> Exporter<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self {
            types: &config.types,
            indent: config.indent,
        }
    }

    pub fn write_graph(&self, graph: &Graph, out: &mut impl Write) -> io::Result<()> {
        self.write_header(out, Dialect::Graph, graph.factory())?;
        let nodes = graph.nodes();
        writeln!(out, "// {} NODES", nodes.len())?;
        for node in &nodes {
            self.write_element(out, 0, &format!("{} {}", node.label(), node.id()), node)?;
        }
        self.write_edges(out, "EDGES", graph.edges(), |n| graph.contains(n))
    }

    pub fn write_tree(&self, tree: &Tree, out: &mut impl Write) -> io::Result<()> {
        self.write_header(out, Dialect::Tree, tree.factory())?;
        self.write_hierarchy(out, &tree.roots(), tree.size(), |n| tree.contains(n))
    }

    pub fn write_tree_graph(&self, tree_graph: &TreeGraph, out: &mut impl Write) -> io::Result<()> {
        self.write_header(out, Dialect::TreeGraph, tree_graph.factory())?;
        self.write_hierarchy(out, &tree_graph.roots(), tree_graph.size(), |n| {
            tree_graph.contains(n)
        })?;
        self.write_edges(out, "CROSS-LINKS", tree_graph.edges(), |n| tree_graph.contains(n))
    }

    pub fn graph_to_string(&self, graph: &Graph) -> String {
        render(|out| self.write_graph(graph, out))
    }

    pub fn tree_to_string(&self, tree: &Tree) -> String {
        render(|out| self.write_tree(tree, out))
    }

    pub fn tree_graph_to_string(&self, tree_graph: &TreeGraph) -> String {
        render(|out| self.write_tree_graph(tree_graph, out))
    }

    /// Dialect line, scope and label registrations.
    fn write_header<R: NodeRecord>(&self, out: &mut impl Write, dialect: Dialect, factory: &Factory<R>) -> io::Result<()> {
        writeln!(out, "{dialect}")?;
        writeln!(out, "scope = String(\"{}\")", factory.scope_name())?;
        let node_classes = factory.node_classes();
        let edge_classes = factory.edge_classes();
        for (label, class) in node_classes.labels().chain(edge_classes.labels()) {
            if HEADER_KEYS.contains(&label) {
                warn!(%label, %class, "label collides with a header setting, not writing its class");
                continue;
            }
            writeln!(out, "{label} = String(\"{class}\")")?;
        }
        Ok(())
    }

    /// `head` at `depth`, then one `name = Type(value)` line per property
    /// one level deeper.
    fn write_element(&self, out: &mut impl Write, depth: usize, head: &str, element: &impl GraphElement) -> io::Result<()> {
        let indent = self.indent.to_string();
        writeln!(out, "{}{head}", indent.repeat(depth))?;
        if let Some(props) = element.properties() {
            let prefix = indent.repeat(depth + 1);
            for (name, value) in props.iter() {
                let (type_name, text) = self.types.format(value);
                writeln!(out, "{prefix}{name} = {type_name}({text})")?;
            }
        }
        Ok(())
    }

    fn write_hierarchy<R: HasParentChild>(
        &self,
        out: &mut impl Write,
        roots: &[NodeRef<R>],
        size: usize,
        is_member: impl Fn(&NodeRef<R>) -> bool,
    ) -> io::Result<()> {
        writeln!(out, "// {size} NODES")?;
        for root in roots {
            // Preorder through member children only. A member below a
            // non-member is itself one of `roots` and is written there.
            let mut stack = vec![(root.clone(), 0)];
            while let Some((node, depth)) = stack.pop() {
                let head = format!("{} {}", node.label(), node.id());
                self.write_element(out, depth, &head, &node)?;
                let children = node.children();
                stack.extend(
                    children
                        .into_iter()
                        .rev()
                        .filter(|child| is_member(child))
                        .map(|child| (child, depth + 1)),
                );
            }
        }
        Ok(())
    }

    /// Edges whose end node is a member; the rest could not be resolved
    /// when read back.
    fn write_edges<R: HasAdjacency>(
        &self,
        out: &mut impl Write,
        title: &str,
        edges: Vec<EdgeRef<R>>,
        is_member: impl Fn(&NodeRef<R>) -> bool,
    ) -> io::Result<()> {
        let (kept, skipped): (Vec<_>, Vec<_>) = edges.into_iter().partition(|e| is_member(&e.end_node()));
        if !skipped.is_empty() {
            debug!(skipped = skipped.len(), "not writing edges that leave the container");
        }
        writeln!(out, "// {} {title}", kept.len())?;
        for edge in &kept {
            // The edge line is written flat; its properties get one indent.
            self.write_element(out, 0, &edge.to_string(), edge)?;
        }
        Ok(())
    }
}

fn render(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write(&mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}
