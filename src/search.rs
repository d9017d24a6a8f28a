use std::collections::HashMap;

use crate::{
    direction::Direction,
    factory::FactoryState,
    record::{HasAdjacency, HasParentChild},
};

const DEFAULT_HASH_SET_CAPACITY: usize = 64;

/// Depth-first walk over edges, at most `distance` hops from the start.
///
/// The start node is never yielded and every other node at most once.
/// Reaching a node again along a shorter path lets the walk continue
/// past it, so the hop bound is exact even though the walk is depth-first.
pub struct BoundedDfs<'s, R> {
    state: &'s FactoryState<R>,
    direction: Option<Direction>,
    /// Remaining hop budget with which each node was last expanded.
    budget: HashMap<usize, usize>,
    stack: Vec<(usize, usize)>,
    start: usize,
}

impl<'s, R> BoundedDfs<'s, R>
where
    R: HasAdjacency,
{
    pub(crate) fn new(
        state: &'s FactoryState<R>,
        start: usize,
        distance: usize,
        direction: Option<Direction>,
    ) -> Self {
        let mut walk = Self {
            state,
            direction,
            budget: HashMap::with_capacity(DEFAULT_HASH_SET_CAPACITY),
            stack: Vec::new(),
            start,
        };
        walk.budget.insert(start, distance);
        walk.push_neighbours(start, distance);
        walk
    }

    fn neighbours(&self, node: usize) -> Vec<usize> {
        let adjacency = self.state.node(node).adjacency();
        let directions: &[Direction] = match &self.direction {
            Some(direction) => std::slice::from_ref(direction),
            None => &Direction::ALL,
        };
        let mut result = Vec::new();
        for &direction in directions {
            for &edge in adjacency.edges(direction) {
                let record = self.state.edge(edge);
                result.push(match direction {
                    Direction::Out => record.end,
                    Direction::In => record.start,
                });
            }
        }
        result
    }

    fn push_neighbours(&mut self, node: usize, remaining: usize) {
        if remaining == 0 {
            return;
        }
        let mut neighbours = self.neighbours(node);
        neighbours.reverse();
        self.stack
            .extend(neighbours.into_iter().map(|n| (n, remaining - 1)));
    }
}

impl<'s, R> Iterator for BoundedDfs<'s, R>
where
    R: HasAdjacency,
{
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, remaining)) = self.stack.pop() {
            let first_visit = !self.budget.contains_key(&node);
            match self.budget.get(&node) {
                Some(&best) if best >= remaining => continue,
                _ => {
                    self.budget.insert(node, remaining);
                }
            }
            self.push_neighbours(node, remaining);
            if first_visit && node != self.start {
                return Some(node);
            }
        }
        None
    }
}

/// Preorder walk over a node and its descendants through child links.
pub struct SubtreeIterator<'s, R> {
    state: &'s FactoryState<R>,
    stack: Vec<usize>,
}

impl<'s, R> SubtreeIterator<'s, R>
where
    R: HasParentChild,
{
    pub(crate) fn new(state: &'s FactoryState<R>, root: usize) -> Self {
        Self {
            state,
            stack: vec![root],
        }
    }
}

impl<'s, R> Iterator for SubtreeIterator<'s, R>
where
    R: HasParentChild,
{
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let children = self.state.node(node).hierarchy().children();
        self.stack.extend(children.iter().rev().copied());
        Some(node)
    }
}
