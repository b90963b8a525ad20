//! Route graph contract trait.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Stable index of a node within its graph.
///
/// Ids are dense: a graph with `n` nodes uses ids `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The id as a slice index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A planar graph that route search can traverse.
///
/// # Contract
///
/// - `find_closest_node` must return `Some` for any finite input whenever the
///   graph has at least one routable node.
/// - `distance` must be symmetric, non-negative and never shorter than the
///   straight line between the two positions, so the Euclidean heuristic
///   stays admissible.
/// - `neighbors` may compute adjacency lazily but must be idempotent: repeated
///   calls return the same ids in the same order.
/// - The graph is only read during search. Per-search state (costs, parents,
///   visited flags) is owned by the search, never stored on the graph.
pub trait RouteGraph {
    /// Number of nodes; valid ids are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Position of `id` in normalized space, `None` if the id is out of range.
    fn position(&self, id: NodeId) -> Option<Point>;

    /// Nearest routable node to `(x, y)` in normalized space.
    fn find_closest_node(&self, x: f64, y: f64) -> Option<NodeId>;

    /// Adjacent nodes of `id`. Empty for unknown ids.
    fn neighbors(&self, id: NodeId) -> &[NodeId];

    /// Conversion factor from normalized distance to meters.
    fn metric_scale(&self) -> f64;

    /// Travel distance between two nodes in normalized units.
    ///
    /// Defaults to the straight-line distance between their positions.
    /// Unknown ids are infinitely far apart.
    fn distance(&self, a: NodeId, b: NodeId) -> f64 {
        match (self.position(a), self.position(b)) {
            (Some(pa), Some(pb)) => pa.distance(&pb),
            _ => f64::INFINITY,
        }
    }
}
