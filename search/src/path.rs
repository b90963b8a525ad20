//! Path reconstruction from parent links.

use serde::Serialize;
use wayfind_graph::{NodeId, Point, RouteGraph};

use crate::error::SearchError;
use crate::node::StateTable;

/// Copy of a node's position and search state at reconstruction time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathNode {
    pub id: NodeId,
    pub position: Point,
    pub g_value: f64,
    pub h_value: f64,
}

/// A route from start to goal, inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Nodes in travel order; never empty.
    pub nodes: Vec<PathNode>,
    /// Total length in meters (graph units times the metric scale).
    pub distance: f64,
}

impl PathResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for a reconstructed path; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges traversed.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    #[must_use]
    pub fn first(&self) -> Option<&PathNode> {
        self.nodes.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&PathNode> {
        self.nodes.last()
    }
}

/// Reconstruct the path from `start` to `goal` by walking parent links.
///
/// Distances between consecutive nodes are summed in graph units, then
/// multiplied by the graph's metric scale. `start == goal` yields a single
/// node and zero distance.
///
/// # Errors
///
/// Returns [`SearchError::UnknownNode`] if `goal` is outside the table, and
/// [`SearchError::BrokenParentChain`] if the parent links end, or loop, before
/// reaching `start`.
pub fn reconstruct_path<G>(
    graph: &G,
    states: &StateTable,
    start: NodeId,
    goal: NodeId,
) -> Result<PathResult, SearchError>
where
    G: RouteGraph + ?Sized,
{
    let mut nodes = Vec::new();
    let mut raw_distance = 0.0;
    let mut current = goal;

    // A valid chain visits each node at most once.
    for _ in 0..states.len() {
        let state = states.get(current).ok_or(SearchError::UnknownNode {
            node: current,
            node_count: states.len(),
        })?;
        let position = graph.position(current).ok_or(SearchError::UnknownNode {
            node: current,
            node_count: graph.node_count(),
        })?;
        nodes.push(PathNode {
            id: current,
            position,
            g_value: state.g_value,
            h_value: state.h_value,
        });

        if current == start {
            nodes.reverse();
            return Ok(PathResult {
                nodes,
                distance: raw_distance * graph.metric_scale(),
            });
        }

        let parent = state
            .parent
            .ok_or(SearchError::BrokenParentChain { node: current })?;
        raw_distance += graph.distance(current, parent);
        current = parent;
    }

    Err(SearchError::BrokenParentChain { node: current })
}
