//! Sign-normalized edge weights.
//!
//! Measurements arrive as signed weights on node pairs, either directly or as translation
//! directions projected onto an axis. A negative weight on `(u, v)` claims that `v` precedes `u`,
//! so it is stored as `(v, u)` with the magnitude. Every stored weight is therefore `>= 0`, and
//! each measured pair produces exactly one stored edge.

use crate::error::{Error, Result, edge_label};
use crate::graph::{KeyPair, NodeId};
use mfas_geometry::Direction;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeWeights<K: NodeId> {
    weights: FxHashMap<KeyPair<K>, f64>,
}

impl<K: NodeId> Default for EdgeWeights<K> {
    fn default() -> Self {
        Self {
            weights: FxHashMap::default(),
        }
    }
}

impl<K: NodeId> EdgeWeights<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_signed(edges: impl IntoIterator<Item = (KeyPair<K>, f64)>) -> Result<Self> {
        let mut out = Self::new();
        for (edge, w) in edges {
            out.insert_signed(edge, w)?;
        }
        Ok(out)
    }

    /// Projects each relative translation onto `projection` and normalizes the sign.
    ///
    /// A projection direction with zero or non-finite norm is rejected before any edge is
    /// processed.
    pub fn from_translations<'d, D, I>(translations: I, projection: &D) -> Result<Self>
    where
        D: Direction + 'd,
        K: 'd,
        I: IntoIterator<Item = (&'d KeyPair<K>, &'d D)>,
    {
        let norm = projection.norm();
        if !norm.is_finite() || norm <= 0.0 {
            return Err(Error::DegenerateDirection { norm });
        }

        let mut out = Self::new();
        for (&edge, direction) in translations {
            out.insert_signed(edge, direction.dot(projection))?;
        }
        tracing::debug!(edges = out.len(), "projected translation directions");
        Ok(out)
    }

    /// Stores `w` on `(u, v)`, or `-w` on `(v, u)` when `w` is negative.
    ///
    /// A zero weight (of either sign) keeps the measured direction.
    pub fn insert_signed(&mut self, (u, v): KeyPair<K>, w: f64) -> Result<()> {
        if u == v {
            return Err(Error::SelfLoop {
                edge: edge_label(&u, &v),
            });
        }
        if !w.is_finite() {
            return Err(Error::NonFiniteWeight {
                edge: edge_label(&u, &v),
                weight: w,
            });
        }
        if self.weights.contains_key(&(u, v)) || self.weights.contains_key(&(v, u)) {
            return Err(Error::DuplicateEdge {
                edge: edge_label(&u, &v),
            });
        }

        let key = if w >= 0.0 { (u, v) } else { (v, u) };
        self.weights.insert(key, w.abs());
        Ok(())
    }

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

    pub fn as_map(&self) -> &FxHashMap<KeyPair<K>, f64> {
        &self.weights
    }

    pub fn into_map(self) -> FxHashMap<KeyPair<K>, f64> {
        self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_is_stored_as_positive_zero_in_measured_direction() {
        let mut w: EdgeWeights<u32> = EdgeWeights::new();
        w.insert_signed((1, 2), -0.0).unwrap();
        let stored = w.get(&1, &2).unwrap();
        assert_eq!(stored, 0.0);
        assert!(stored.is_sign_positive());
        assert_eq!(w.get(&2, &1), None);
    }

    #[test]
    fn reversed_duplicate_is_rejected_even_after_flip() {
        let mut w: EdgeWeights<u32> = EdgeWeights::new();
        w.insert_signed((1, 2), -3.0).unwrap();
        assert!(matches!(
            w.insert_signed((2, 1), 3.0),
            Err(Error::DuplicateEdge { .. })
        ));
        assert_eq!(w.len(), 1);
    }
}
