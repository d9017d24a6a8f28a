mod common;

use arborgraph::prelude::*;
use common::{FIXTURE_A, FIXTURE_B, FIXTURE_TREE_GRAPH, edge_summary, node_summary};

#[test]
fn test_fixture_a_graph() {
    let graph = read_str(FIXTURE_A, &ParserConfig::default())
        .unwrap()
        .into_graph()
        .unwrap();
    let nodes: Vec<_> = graph.nodes().iter().map(node_summary).collect();
    assert_eq!(nodes, vec!["label1:name1{prop1=1}", "label2:name2"]);

    let edges: Vec<_> = graph.edges().iter().map(edge_summary).collect();
    assert_eq!(edges, vec!["label1:name1 -label4:edgename-> label2:name2"]);

    let name1 = graph.find_node("name1").unwrap();
    assert_eq!(name1.property("prop1"), Some(Value::Integer(1)));
    assert!(name1.is_root());
    assert!(graph.find_node("name2").unwrap().is_leaf());
    assert_eq!(graph.roots(), vec![name1]);
}

#[test]
fn test_fixture_b_tree() {
    let tree = read_str(FIXTURE_B, &ParserConfig::default())
        .unwrap()
        .into_tree()
        .unwrap();
    let root = tree.root().unwrap();
    assert_eq!(root.to_short_string(), "label1:root");
    assert_eq!(root.depth(), 0);
    assert_eq!(tree.max_depth(), 2);
    assert_eq!(tree.min_depth(), 1);
    assert_eq!(tree.size(), 5);

    let left = tree.find_node("left").unwrap();
    assert_eq!(left.parent(), Some(root.clone()));
    assert!(root.has_child(&left));
    let leaves: Vec<_> = tree.leaves().iter().map(|n| n.id()).collect();
    assert_eq!(leaves, vec!["leaf1", "leaf2", "right"]);
    assert_eq!(
        tree.find_node("leaf1").unwrap().property("weight"),
        Some(Value::Double(1.5))
    );
}

#[test]
fn test_tree_graph_fixture() {
    let tg = read_str(FIXTURE_TREE_GRAPH, &ParserConfig::default())
        .unwrap()
        .into_tree_graph()
        .unwrap();
    assert_eq!(tg.size(), 5);
    assert_eq!(tg.root().unwrap().id(), "hq");
    assert_eq!(tg.max_depth(), 2);

    let edges: Vec<_> = tg.edges().iter().map(edge_summary).collect();
    assert_eq!(
        common::sorted(edges),
        vec![
            "dept:sales -funds:f1-> dept:eng",
            "person:ann -reports:r1-> person:bob{since=2020}",
        ]
    );

    // Cross-links do not affect the hierarchy.
    let ann = tg.find_node("ann").unwrap();
    assert!(ann.is_leaf());
    assert_eq!(ann.parent().unwrap().id(), "sales");
    assert_eq!(ann.traversal(1).len(), 1);
}
