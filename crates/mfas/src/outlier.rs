//! Outlier weights: how strongly each stored edge disagrees with a node ordering.

use crate::error::{Error, Result, node_label};
use crate::graph::{Graph, KeyPair, NodeId};
use rustc_hash::FxHashMap;

/// One score per stored edge: `0` when the tail is ordered before the head, the edge weight
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierWeights<K: NodeId> {
    weights: FxHashMap<KeyPair<K>, f64>,
}

impl<K: NodeId> OutlierWeights<K> {
    pub fn get(&self, tail: &K, head: &K) -> Option<f64> {
        self.weights.get(&(*tail, *head)).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (KeyPair<K>, f64)> + '_ {
        self.weights.iter().map(|(&e, &w)| (e, w))
    }

    /// Edges with a non-zero score, sorted by `(tail, head)`.
    pub fn outliers(&self) -> Vec<(KeyPair<K>, f64)> {
        let mut out: Vec<(KeyPair<K>, f64)> = self.iter().filter(|&(_, w)| w > 0.0).collect();
        out.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub fn inlier_count(&self) -> usize {
        self.weights.values().filter(|&&w| w == 0.0).count()
    }

    /// Total weight of backward edges, i.e. the cost of the ordering as a feedback arc set.
    pub fn total(&self) -> f64 {
        self.outliers().iter().fold(0.0, |acc, (_, w)| acc + w)
    }

    pub fn as_map(&self) -> &FxHashMap<KeyPair<K>, f64> {
        &self.weights
    }

    pub fn into_map(self) -> FxHashMap<KeyPair<K>, f64> {
        self.weights
    }
}

/// Scores every stored edge of `graph` against `ordering`.
///
/// `ordering` must be a permutation of the graph's nodes.
pub fn compute_outlier_weights<K: NodeId>(
    graph: &Graph<'_, K>,
    ordering: &[K],
) -> Result<OutlierWeights<K>> {
    let mut position: FxHashMap<K, usize> = FxHashMap::default();
    position.reserve(ordering.len());
    for (i, &node) in ordering.iter().enumerate() {
        if !graph.has_node(&node) {
            return Err(Error::UnknownNode {
                node: node_label(&node),
            });
        }
        if position.insert(node, i).is_some() {
            return Err(Error::DuplicateNode {
                node: node_label(&node),
            });
        }
    }
    if let Some(missing) = graph.nodes().iter().find(|n| !position.contains_key(*n)) {
        return Err(Error::UnorderedNode {
            node: node_label(missing),
        });
    }

    Ok(score_edges(graph, &position))
}

/// `position` must cover every node of `graph`.
pub(crate) fn score_edges<K: NodeId>(
    graph: &Graph<'_, K>,
    position: &FxHashMap<K, usize>,
) -> OutlierWeights<K> {
    let weights: FxHashMap<KeyPair<K>, f64> = graph
        .edges()
        .map(|((tail, head), w)| {
            let score = if position[&tail] < position[&head] {
                0.0
            } else {
                w
            };
            ((tail, head), score)
        })
        .collect();

    let out = OutlierWeights { weights };
    tracing::debug!(
        edges = out.len(),
        outliers = out.len() - out.inlier_count(),
        total = out.total(),
        "scored edges against ordering"
    );
    out
}
