use std::collections::HashSet;
use std::hash::Hash;

use quickcheck::{Arbitrary, Gen};
use tracing::info_span;

use crate::prelude::*;
use crate::tracing_support::init_tracing;

/// One mutation applied to a graph under test. Node positions are taken
/// modulo the current node count.
#[derive(Clone, Debug)]
pub enum Op {
    AddNode,
    Connect(usize, usize),
    DisconnectFrom(usize, usize),
    Disconnect(usize),
    Replace(usize, usize),
    DropEdge(usize),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        let a = usize::arbitrary(g) % 32;
        let b = usize::arbitrary(g) % 32;
        match u8::arbitrary(g) % 8 {
            0 | 1 => Op::AddNode,
            2 | 3 => Op::Connect(a, b),
            4 => Op::DisconnectFrom(a, b),
            5 => Op::Disconnect(a),
            6 => Op::Replace(a, b),
            _ => Op::DropEdge(a),
        }
    }
}

/// A graph described by the operations that built it, so quickcheck can
/// shrink failures to short op lists.
#[derive(Clone, Debug)]
pub struct ArbGraph {
    pub ops: Vec<Op>,
}

impl Arbitrary for ArbGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 60;
        ArbGraph {
            ops: (0..len).map(|_| Op::arbitrary(g)).collect(),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.ops.shrink().map(|ops| ArbGraph { ops }))
    }
}

impl ArbGraph {
    pub fn build(&self) -> (GraphFactory, Graph) {
        let factory = GraphFactory::new("QC");
        let graph = Graph::new(&factory);
        for op in &self.ops {
            let nodes = graph.nodes();
            let pick = |i: usize| nodes.get(i % nodes.len().max(1)).cloned();
            match *op {
                Op::AddNode => {
                    factory.make_node(None, None).ok();
                }
                Op::Connect(a, b) => {
                    if let (Some(a), Some(b)) = (pick(a), pick(b)) {
                        a.connect_to(Direction::Out, &b, None).ok();
                    }
                }
                Op::DisconnectFrom(a, b) => {
                    if let (Some(a), Some(b)) = (pick(a), pick(b)) {
                        a.disconnect_from(&b);
                    }
                }
                Op::Disconnect(a) => {
                    if let Some(a) = pick(a) {
                        a.disconnect();
                    }
                }
                Op::Replace(a, b) => {
                    if let (Some(a), Some(b)) = (pick(a), pick(b))
                        && a != b
                    {
                        a.replace(&b).ok();
                    }
                }
                Op::DropEdge(i) => {
                    let edges = graph.edges();
                    if !edges.is_empty() {
                        edges[i % edges.len()].disconnect();
                    }
                }
            }
        }
        (factory, graph)
    }
}

pub fn has_duplicates<T: Eq + Hash>(items: impl IntoIterator<Item = T>) -> bool {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return true;
        }
    }
    false
}

/// Checks that every edge in a node's OUT set starts there and sits in its
/// end node's IN set, and the mirror image for IN sets.
pub fn check_graph_consistency(factory: &GraphFactory) {
    init_tracing();
    let _span = info_span!("check_graph_consistency").entered();
    for node in factory.nodes() {
        for direction in Direction::ALL {
            let edges = node.edges(direction);
            assert!(!has_duplicates(edges.iter().cloned()), "{node} has duplicate {direction} edges");
            for edge in edges {
                assert!(!edge.is_orphaned(), "{edge} is orphaned but linked from {node}");
                let (near, far) = match direction {
                    Direction::Out => (edge.start_node(), edge.end_node()),
                    Direction::In => (edge.end_node(), edge.start_node()),
                };
                assert_eq!(near, node, "{edge} listed under the wrong node");
                assert!(
                    far.edges(direction.opposite()).contains(&edge),
                    "{edge} missing from {far}'s {} set",
                    direction.opposite()
                );
            }
        }
    }
}

mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[quickcheck]
    fn prop_adjacency_stays_consistent(g: ArbGraph) -> bool {
        let (factory, _graph) = g.build();
        check_graph_consistency(&factory);
        true
    }

    #[quickcheck]
    fn prop_new_nodes_reach_every_container(containers: u8, nodes: u8) -> bool {
        let factory = GraphFactory::new("QC");
        let graphs: Vec<Graph> = (0..containers % 5).map(|_| Graph::new(&factory)).collect();
        let made: Vec<Node> = (0..nodes % 20)
            .filter_map(|_| factory.make_node(None, None).ok())
            .collect();
        graphs
            .iter()
            .all(|g| g.size() == made.len() && made.iter().all(|n| g.contains(n)))
    }

    #[quickcheck]
    fn prop_disconnect_isolates_node(g: ArbGraph, pick: usize) -> bool {
        let (factory, graph) = g.build();
        let nodes = graph.nodes();
        if nodes.is_empty() {
            return true;
        }
        let node = &nodes[pick % nodes.len()];
        node.disconnect();
        check_graph_consistency(&factory);
        node.total_degree() == 0 && graph.contains(node)
    }

    #[quickcheck]
    fn prop_traversal_is_monotonic(g: ArbGraph, pick: usize, distance: u8) -> bool {
        let (_factory, graph) = g.build();
        let nodes = graph.nodes();
        if nodes.is_empty() {
            return true;
        }
        let start = &nodes[pick % nodes.len()];
        let distance = usize::from(distance % 6);
        let near = start.traversal(distance);
        let far = start.traversal(distance + 1);
        !near.contains(start)
            && !has_duplicates(near.iter().cloned())
            && near.iter().all(|n| far.contains(n))
            && (distance > 0 || near.is_empty())
    }

    #[quickcheck]
    fn prop_one_hop_traversal_is_neighbourhood(g: ArbGraph, pick: usize) -> bool {
        let (_factory, graph) = g.build();
        let nodes = graph.nodes();
        if nodes.is_empty() {
            return true;
        }
        let start = &nodes[pick % nodes.len()];
        let mut expected: Vec<_> = start
            .all_neighbours()
            .into_iter()
            .filter(|n| n != start)
            .map(|n| n.to_string())
            .collect();
        let mut actual: Vec<_> = start.traversal(1).into_iter().map(|n| n.to_string()).collect();
        expected.sort();
        expected.dedup();
        actual.sort();
        expected == actual
    }
}
