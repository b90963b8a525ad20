//! Typed search errors.
//!
//! Pre-flight failures (bad query points, bad policy, unknown nodes) are
//! returned before any expansion happens. A search that runs and fails to
//! reach the goal is not an error: it terminates with a
//! [`crate::search::TerminationReason`] on its outcome. The `NoPathFound` and
//! `ExpansionBudgetExceeded` variants only appear when a caller asks for the
//! path itself via [`crate::search::SearchOutcome::into_path`].

use thiserror::Error;
use wayfind_graph::NodeId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The graph has no node to resolve a query point to.
    #[error("graph has no nodes to route between")]
    EmptyGraph,

    /// A query coordinate is not a finite percentage in `0..=100`.
    #[error("query point ({x}, {y}) is not a finite percentage in 0..=100")]
    InvalidQueryPoint { x: f64, y: f64 },

    /// A node id is outside the graph.
    #[error("node {node} is not in the graph ({node_count} nodes)")]
    UnknownNode { node: NodeId, node_count: usize },

    /// The search policy is not usable.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },

    /// The open set emptied before the goal was reached.
    #[error("no path from {start} to {goal}")]
    NoPathFound { start: NodeId, goal: NodeId },

    /// The expansion budget ran out before the goal was reached.
    #[error("expansion budget of {limit} exhausted before reaching the goal")]
    ExpansionBudgetExceeded { limit: u64 },

    /// Parent links from `node` do not lead back to the start node.
    #[error("parent chain broken at {node}")]
    BrokenParentChain { node: NodeId },
}
