#![allow(dead_code)]

use arborgraph::{EdgeRef, NodeRef, prelude::*, record::{HasAdjacency, NodeRecord}};

pub const FIXTURE_A: &str = "\
graph
label1 name1
  prop1 = Integer(1)
label2 name2
[label1:name1] label4 edgename [label2:name2]
";

pub const FIXTURE_B: &str = "\
tree
// a root with two levels below it
label1 root
\tlabel1 left
\t\tlabel2 leaf1
\t\t\tweight = Double(1.5)
\t\tlabel2 leaf2
\tlabel1 right
";

pub const FIXTURE_TREE_GRAPH: &str = "\
treegraph
type = String(TreeGraph)
dept hq
\tdept sales
\t\tperson ann
\t\t\tage = Integer(41)
\tdept eng
\t\tperson bob
[person:ann] reports r1 [person:bob]
\tsince = Integer(2020)
[dept:sales] funds f1 [dept:eng]
";

/// `label:id{key=value,...}` with properties in stored order.
pub fn node_summary<R: NodeRecord>(node: &NodeRef<R>) -> String {
    format!("{}{}", node.to_short_string(), props_summary(node.properties()))
}

/// `start -label:id-> end{key=value,...}`.
pub fn edge_summary<R: HasAdjacency>(edge: &EdgeRef<R>) -> String {
    format!(
        "{} -{}-> {}{}",
        edge.start_node().to_short_string(),
        edge.to_short_string(),
        edge.end_node().to_short_string(),
        props_summary(edge.properties())
    )
}

fn props_summary(props: Option<PropertyList>) -> String {
    match props {
        Some(props) if !props.is_empty() => {
            let parts: Vec<_> = props.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{{{}}}", parts.join(","))
        }
        _ => String::new(),
    }
}

pub fn sorted(mut items: Vec<String>) -> Vec<String> {
    items.sort();
    items
}
