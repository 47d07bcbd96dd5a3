//! Greedy 1D ordering for the weighted minimum feedback arc set problem.
//!
//! Nodes are peeled off one at a time: the remaining node with the largest
//! `out_weight - in_weight` (counting only edges between remaining nodes) is placed next, ahead
//! of everything still unplaced. Equal scores go to the smallest node id, so the result depends
//! only on the node set and the edge weights.

use crate::graph::{Graph, NodeId};
use std::cmp;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderingStrategy {
    /// Ordered candidate set, `O((N + E) log N)`.
    #[default]
    Heap,
    /// Linear rescan of the remaining nodes per step, `O(N^2 + E)`.
    Scan,
}

#[derive(Debug, Clone, Default)]
pub struct OrderingOptions {
    /// Both strategies select the same node at every step and return identical orderings.
    pub strategy: OrderingStrategy,
}

pub fn compute_ordering<K: NodeId>(graph: &Graph<'_, K>, options: &OrderingOptions) -> Vec<K> {
    let n = graph.node_count();
    tracing::debug!(nodes = n, strategy = ?options.strategy, "computing greedy ordering");
    if n == 0 {
        return Vec::new();
    }

    let mut work = Work::new(graph);
    let mut order: Vec<K> = Vec::with_capacity(n);

    match options.strategy {
        OrderingStrategy::Heap => {
            let mut queue: BTreeSet<Candidate<K>> = (0..n).map(|i| work.candidate(i)).collect();
            while let Some(best) = queue.pop_first() {
                tracing::trace!(node = ?best.id, score = best.score, "placed");
                order.push(best.id);
                for (j, stale) in work.remove_node(best.index) {
                    queue.remove(&stale);
                    queue.insert(work.candidate(j));
                }
            }
        }
        OrderingStrategy::Scan => {
            while let Some(best) = work.best_remaining() {
                tracing::trace!(node = ?best.id, score = best.score, "placed");
                order.push(best.id);
                work.remove_node(best.index);
            }
        }
    }

    tracing::debug!(placed = order.len(), "greedy ordering done");
    order
}

/// A node's current score. Sorts best-first: higher score, then smaller id.
#[derive(Debug, Clone, Copy)]
struct Candidate<K> {
    score: f64,
    id: K,
    index: usize,
}

impl<K: Ord> Ord for Candidate<K> {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl<K: Ord> PartialOrd for Candidate<K> {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> PartialEq for Candidate<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == cmp::Ordering::Equal
    }
}

impl<K: Ord> Eq for Candidate<K> {}

/// Per-call working state: remaining nodes plus incremental weighted degrees.
///
/// Adjacency and the initial sums are built from edges sorted by node id, and each later update
/// is a single subtraction, so the floating-point sums do not depend on hash iteration order.
struct Work<K> {
    ids: Vec<K>,
    alive: Vec<bool>,
    in_w: Vec<f64>,
    out_w: Vec<f64>,
    // Remaining incident edges; when a count drops to zero the matching sum is reset to exactly 0.
    in_n: Vec<usize>,
    out_n: Vec<usize>,
    in_edges: Vec<Vec<(usize, f64)>>,
    out_edges: Vec<Vec<(usize, f64)>>,
}

impl<K: NodeId> Work<K> {
    fn new(graph: &Graph<'_, K>) -> Self {
        let ids = graph.nodes().to_vec();
        let n = ids.len();
        let mut work = Self {
            ids,
            alive: vec![true; n],
            in_w: vec![0.0; n],
            out_w: vec![0.0; n],
            in_n: vec![0; n],
            out_n: vec![0; n],
            in_edges: vec![Vec::new(); n],
            out_edges: vec![Vec::new(); n],
        };

        for ((tail, head), w) in graph.sorted_edges() {
            let (Some(t), Some(h)) = (graph.node_index(&tail), graph.node_index(&head)) else {
                continue;
            };
            work.out_edges[t].push((h, w));
            work.in_edges[h].push((t, w));
            work.out_w[t] += w;
            work.in_w[h] += w;
            work.out_n[t] += 1;
            work.in_n[h] += 1;
        }
        work
    }

    fn candidate(&self, i: usize) -> Candidate<K> {
        Candidate {
            score: self.out_w[i] - self.in_w[i],
            id: self.ids[i],
            index: i,
        }
    }

    fn best_remaining(&self) -> Option<Candidate<K>> {
        (0..self.ids.len())
            .filter(|&i| self.alive[i])
            .map(|i| self.candidate(i))
            .min()
    }

    /// Removes `v` and discounts its edges from the remaining neighbours.
    ///
    /// Returns each touched neighbour with its candidate from before the update.
    fn remove_node(&mut self, v: usize) -> Vec<(usize, Candidate<K>)> {
        if !self.alive[v] {
            return Vec::new();
        }
        self.alive[v] = false;

        // At most one stored edge per node pair, so every neighbour is touched once.
        let mut touched: Vec<(usize, Candidate<K>)> = Vec::new();
        for k in 0..self.out_edges[v].len() {
            let (w, wgt) = self.out_edges[v][k];
            if !self.alive[w] {
                continue;
            }
            touched.push((w, self.candidate(w)));
            self.in_n[w] -= 1;
            self.in_w[w] = if self.in_n[w] == 0 {
                0.0
            } else {
                self.in_w[w] - wgt
            };
        }
        for k in 0..self.in_edges[v].len() {
            let (u, wgt) = self.in_edges[v][k];
            if !self.alive[u] {
                continue;
            }
            touched.push((u, self.candidate(u)));
            self.out_n[u] -= 1;
            self.out_w[u] = if self.out_n[u] == 0 {
                0.0
            } else {
                self.out_w[u] - wgt
            };
        }
        touched
    }
}
