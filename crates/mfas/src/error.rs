#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("edge {edge} references a node missing from the node list")]
    MissingEndpoint { edge: String },

    #[error("edge {edge} connects a node to itself")]
    SelfLoop { edge: String },

    #[error("node {node} appears more than once")]
    DuplicateNode { node: String },

    #[error("edge {edge} is given in both directions")]
    DuplicateEdge { edge: String },

    #[error("edge {edge} has a non-finite weight ({weight})")]
    NonFiniteWeight { edge: String, weight: f64 },

    #[error("weights incident to node {node} sum past the f64 range")]
    WeightOverflow { node: String },

    #[error("projection direction is degenerate (norm {norm})")]
    DegenerateDirection { norm: f64 },

    #[error("ordering does not place node {node}")]
    UnorderedNode { node: String },

    #[error("ordering contains node {node}, which is not in the graph")]
    UnknownNode { node: String },

    #[error(transparent)]
    Geometry(#[from] mfas_geometry::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn edge_label<K: std::fmt::Debug>(tail: &K, head: &K) -> String {
    format!("{tail:?} -> {head:?}")
}

pub(crate) fn node_label<K: std::fmt::Debug>(node: &K) -> String {
    format!("{node:?}")
}
