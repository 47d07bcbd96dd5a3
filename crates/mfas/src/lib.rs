#![forbid(unsafe_code)]

//! Minimum feedback arc set (MFAS) ordering for robust translation averaging.
//!
//! Given a weighted directed graph, a greedy heuristic orders the nodes so that the total weight
//! of edges pointing backwards is small. Edges that still point backwards are outliers. This is
//! the 1D step of 1DSfM (Wilson & Snavely, "Robust Global Translations with 1DSfM", ECCV 2014):
//! relative camera translations are projected onto an axis, and measurements that disagree with
//! the resulting 1D order are likely wrong.
//!
//! ```
//! use mfas::Mfas;
//!
//! let nodes = [0u64, 1, 2];
//! let mfas = Mfas::new(&nodes, [((0, 1), 1.0), ((1, 2), 1.0), ((2, 0), 1.0)]).unwrap();
//! assert_eq!(mfas.compute_ordering(), vec![0, 1, 2]);
//! assert_eq!(mfas.compute_outlier_weights().get(&2, &0), Some(1.0));
//! ```

pub mod error;
pub mod graph;
pub mod order;
pub mod outlier;
pub mod weights;

pub use error::{Error, Result};
pub use graph::{Graph, Key, KeyPair, NodeId, WeightSums};
pub use mfas_geometry::{Direction, Unit3};
pub use order::{OrderingOptions, OrderingStrategy};
pub use outlier::OutlierWeights;
pub use weights::EdgeWeights;

use rustc_hash::FxHashMap;

/// Relative translation measurements keyed by `(from, to)`.
pub type TranslationEdges<K = Key, D = Unit3> = FxHashMap<KeyPair<K>, D>;

#[derive(Debug, Clone, Default)]
pub struct MfasOptions {
    pub ordering: OrderingOptions,
}

/// A feedback arc set problem over a borrowed node list.
#[derive(Debug, Clone)]
pub struct Mfas<'a, K: NodeId = Key> {
    graph: Graph<'a, K>,
    options: MfasOptions,
}

impl<'a, K: NodeId> Mfas<'a, K> {
    /// Builds the problem from signed edge weights. A negative weight on `(u, v)` is stored as
    /// `(v, u)` with its magnitude.
    pub fn new(
        nodes: &'a [K],
        edge_weights: impl IntoIterator<Item = (KeyPair<K>, f64)>,
    ) -> Result<Self> {
        let weights = EdgeWeights::from_signed(edge_weights)?;
        Ok(Self::from_graph(Graph::new(nodes, weights)?))
    }

    /// Builds the problem for translation averaging: each relative translation is projected onto
    /// `projection` to obtain its signed weight.
    pub fn from_translations<'d, D, I>(
        nodes: &'a [K],
        translations: I,
        projection: &D,
    ) -> Result<Self>
    where
        D: Direction + 'd,
        K: 'd,
        I: IntoIterator<Item = (&'d KeyPair<K>, &'d D)>,
    {
        let weights = EdgeWeights::from_translations(translations, projection)?;
        Ok(Self::from_graph(Graph::new(nodes, weights)?))
    }

    pub fn from_graph(graph: Graph<'a, K>) -> Self {
        Self {
            graph,
            options: MfasOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MfasOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &MfasOptions {
        &self.options
    }

    pub fn graph(&self) -> &Graph<'a, K> {
        &self.graph
    }

    /// The sign-normalized weights, all `>= 0`.
    pub fn edge_weights(&self) -> &FxHashMap<KeyPair<K>, f64> {
        self.graph.edge_map()
    }

    /// The greedy MFAS ordering of all nodes.
    pub fn compute_ordering(&self) -> Vec<K> {
        order::compute_ordering(&self.graph, &self.options.ordering)
    }

    /// Outlier weights against this problem's own greedy ordering.
    pub fn compute_outlier_weights(&self) -> OutlierWeights<K> {
        let position: FxHashMap<K, usize> = self
            .compute_ordering()
            .into_iter()
            .enumerate()
            .map(|(i, node)| (node, i))
            .collect();
        outlier::score_edges(&self.graph, &position)
    }

    /// Outlier weights against a caller-supplied ordering, which must be a permutation of the
    /// nodes.
    pub fn outlier_weights(&self, ordering: &[K]) -> Result<OutlierWeights<K>> {
        outlier::compute_outlier_weights(&self.graph, ordering)
    }
}
