//! Typed graph construction errors.

use thiserror::Error;

/// Failure building a [`crate::road::RoadGraph`].
///
/// All of these are detected by [`crate::road::RoadGraphBuilder::build`];
/// a built graph is always well-formed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// The graph has no nodes, so no query point can be resolved.
    #[error("road graph has no nodes")]
    EmptyGraph,

    /// A node coordinate is NaN or infinite.
    #[error("node {index} has a non-finite position ({x}, {y})")]
    NonFinitePosition { index: usize, x: f64, y: f64 },

    /// A way references a node index that does not exist.
    #[error("way {way} references unknown node {node} (graph has {node_count} nodes)")]
    UnknownNode {
        way: usize,
        node: usize,
        node_count: usize,
    },

    /// A way must connect at least two nodes.
    #[error("way {way} has {len} node(s); at least 2 are required")]
    DegenerateWay { way: usize, len: usize },

    /// The metric scale must be finite and strictly positive.
    #[error("metric scale must be finite and positive, got {scale}")]
    InvalidMetricScale { scale: f64 },

    /// More nodes than `NodeId` can address.
    #[error("road graph supports at most {max} nodes")]
    TooManyNodes { max: usize },
}
