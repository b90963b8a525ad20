//! Map world contract: the minimal trait a fixture map must implement.
//!
//! Worlds provide map data and a representative query only. Search,
//! reporting and digest computation are runner concerns.

use wayfind_graph::{GraphError, RoadGraph};

use crate::query::RouteQuery;

/// A named fixture map with a default query.
pub trait MapWorld {
    /// Unique world identifier (e.g., `"unit_square"`).
    fn world_id(&self) -> &str;

    /// Build the road graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if the world's parameters describe an invalid
    /// graph (e.g. a zero-sized grid).
    fn build_graph(&self) -> Result<RoadGraph, GraphError>;

    /// The query this world is meant to exercise.
    fn default_query(&self) -> RouteQuery;
}
