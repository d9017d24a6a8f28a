use std::fmt::{Debug, Formatter};

use crate::{
    direction::Direction,
    edge::EdgeRef,
    element::GraphElement,
    node::NodeRef,
    record::{HasAdjacency, HasParentChild, NodeRecord},
};

/// Displays a node or edge by its text-format form.
struct Tag(String);

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn detailed_string<R: NodeRecord>(node: &NodeRef<R>, lines: &[String]) -> String {
    let mut out = node.to_short_string();
    if let Some(props) = node.properties()
        && !props.is_empty()
    {
        let rendered: Vec<String> = props.iter().map(|(k, v)| format!("{k}={v}")).collect();
        out.push_str(&format!(" {{{}}}", rendered.join(", ")));
    }
    for line in lines {
        out.push_str("\n  ");
        out.push_str(line);
    }
    out
}

pub(crate) fn edge_lines<R: HasAdjacency>(node: &NodeRef<R>) -> Vec<String> {
    let mut lines = Vec::new();
    for direction in Direction::ALL {
        for edge in node.edges(direction) {
            let (arrow, far) = match direction {
                Direction::Out => ("->", edge.end_node()),
                Direction::In => ("<-", edge.start_node()),
            };
            lines.push(format!(
                "{arrow} {} via {}",
                far.to_short_string(),
                edge.to_short_string()
            ));
        }
    }
    lines
}

pub(crate) fn tree_lines<R: HasParentChild>(node: &NodeRef<R>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(parent) = node.parent() {
        lines.push(format!("parent {}", parent.to_short_string()));
    }
    for child in node.children() {
        lines.push(format!("child {}", child.to_short_string()));
    }
    lines
}

pub(crate) fn write_summary(
    fmt: &mut Formatter<'_>,
    name: &str,
    nodes: usize,
    edges: usize,
) -> std::fmt::Result {
    write!(fmt, "{name}({nodes} nodes, {edges} edges)")
}

/// `Name { nodes: [...], edges: [...] }` using the text-format forms.
pub(crate) fn write_debug<R: HasAdjacency>(
    fmt: &mut Formatter<'_>,
    name: &str,
    nodes: &[NodeRef<R>],
    edges: &[EdgeRef<R>],
) -> std::fmt::Result {
    fmt.debug_struct(name)
        .field(
            "nodes",
            &nodes
                .iter()
                .map(|n| Tag(n.to_short_string()))
                .collect::<Vec<_>>(),
        )
        .field(
            "edges",
            &edges.iter().map(|e| Tag(e.to_string())).collect::<Vec<_>>(),
        )
        .finish()
}

/// One line per node, indented by depth below the given roots.
pub(crate) fn write_tree_debug<R: HasParentChild>(
    fmt: &mut Formatter<'_>,
    name: &str,
    roots: &[NodeRef<R>],
) -> std::fmt::Result {
    writeln!(fmt, "{name} {{")?;
    for root in roots {
        let base = root.depth();
        for node in root.sub_tree() {
            let indent = "  ".repeat(node.depth() - base + 1);
            writeln!(fmt, "{indent}{}", node.to_short_string())?;
        }
    }
    writeln!(fmt, "}}")
}
