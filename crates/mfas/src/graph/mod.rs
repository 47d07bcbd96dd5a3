//! Immutable weighted digraph over a borrowed node list.

use crate::error::{Error, Result, edge_label, node_label};
use crate::weights::EdgeWeights;
use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Node identifier. Ties in the greedy ordering are broken by `Ord`.
pub trait NodeId: Copy + Ord + Hash + Debug {}

impl<T: Copy + Ord + Hash + Debug> NodeId for T {}

/// Conventional integer key, e.g. a camera index.
pub type Key = u64;

/// A directed edge `(tail, head)`.
pub type KeyPair<K = Key> = (K, K);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightSums {
    pub in_weight: f64,
    pub out_weight: f64,
}

/// The graph handed to the ordering engine and the outlier evaluator.
///
/// The node list is borrowed from the caller, who usually owns a much larger problem, and must
/// outlive the graph. Edges are stored once per unordered node pair with a non-negative weight.
/// Nothing is mutated after construction, so a `Graph` can be queried from several threads.
#[derive(Debug, Clone)]
pub struct Graph<'a, K: NodeId = Key> {
    nodes: &'a [K],
    node_index: FxHashMap<K, usize>,
    edges: FxHashMap<KeyPair<K>, f64>,
}

impl<'a, K: NodeId> Graph<'a, K> {
    /// Fails without building anything if the node list has duplicates, an edge references a
    /// node outside it, or a node's weighted in- or out-degree is not representable as an `f64`.
    pub fn new(nodes: &'a [K], weights: EdgeWeights<K>) -> Result<Self> {
        let mut node_index: FxHashMap<K, usize> = FxHashMap::default();
        node_index.reserve(nodes.len());
        for (idx, &node) in nodes.iter().enumerate() {
            if node_index.insert(node, idx).is_some() {
                return Err(Error::DuplicateNode {
                    node: node_label(&node),
                });
            }
        }

        let edges = weights.into_map();
        for (tail, head) in edges.keys() {
            if !node_index.contains_key(tail) || !node_index.contains_key(head) {
                return Err(Error::MissingEndpoint {
                    edge: edge_label(tail, head),
                });
            }
        }

        let graph = Self {
            nodes,
            node_index,
            edges,
        };
        // Greedy scores are `out - in`; both sums must stay finite.
        let sums = graph.weight_sums();
        if let Some(node) = nodes.iter().find(|n| {
            sums.get(*n)
                .is_some_and(|s| !(s.in_weight.is_finite() && s.out_weight.is_finite()))
        }) {
            return Err(Error::WeightOverflow {
                node: node_label(node),
            });
        }

        tracing::debug!(
            nodes = nodes.len(),
            edges = graph.edges.len(),
            "built feedback arc set graph"
        );
        Ok(graph)
    }

    pub fn nodes(&self) -> &'a [K] {
        self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_node(&self, node: &K) -> bool {
        self.node_index.contains_key(node)
    }

    /// Position of `node` in the borrowed node list.
    pub fn node_index(&self, node: &K) -> Option<usize> {
        self.node_index.get(node).copied()
    }

    /// Weight of the stored edge `tail -> head`. The reverse orientation is a different edge.
    pub fn edge_weight(&self, tail: &K, head: &K) -> Option<f64> {
        self.edges.get(&(*tail, *head)).copied()
    }

    pub fn has_edge(&self, tail: &K, head: &K) -> bool {
        self.edges.contains_key(&(*tail, *head))
    }

    pub fn edges(&self) -> impl Iterator<Item = (KeyPair<K>, f64)> + '_ {
        self.edges.iter().map(|(&e, &w)| (e, w))
    }

    /// Edges sorted by `(tail, head)`. Use this when a traversal must not depend on hashing.
    pub fn sorted_edges(&self) -> Vec<(KeyPair<K>, f64)> {
        let mut out: Vec<(KeyPair<K>, f64)> = self.edges().collect();
        out.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub fn edge_map(&self) -> &FxHashMap<KeyPair<K>, f64> {
        &self.edges
    }

    pub fn total_weight(&self) -> f64 {
        self.sorted_edges().iter().fold(0.0, |acc, (_, w)| acc + w)
    }

    /// Weighted in/out degree of every node, computed from the edge set on each call.
    pub fn weight_sums(&self) -> FxHashMap<K, WeightSums> {
        let mut sums: FxHashMap<K, WeightSums> = self
            .nodes
            .iter()
            .map(|&n| (n, WeightSums::default()))
            .collect();
        for ((tail, head), w) in self.sorted_edges() {
            if let Some(s) = sums.get_mut(&tail) {
                s.out_weight += w;
            }
            if let Some(s) = sums.get_mut(&head) {
                s.in_weight += w;
            }
        }
        sums
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_edges_are_ordered_by_tail_then_head() {
        let nodes = [1u64, 2, 3];
        let weights =
            EdgeWeights::from_signed([((3, 1), 1.0), ((1, 2), 0.5), ((2, 3), 2.0)]).unwrap();
        let g = Graph::new(&nodes, weights).unwrap();
        let keys: Vec<KeyPair> = g.sorted_edges().into_iter().map(|(e, _)| e).collect();
        assert_eq!(keys, vec![(1, 2), (2, 3), (3, 1)]);
    }
}
