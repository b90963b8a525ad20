//! `UnitSquare`: four corners joined along the sides, no diagonals.
//!
//! ```text
//! n3 ── n2
//! │      │
//! n0 ── n1
//! ```
//!
//! Corner to opposite corner is always two sides long.

use wayfind_graph::{GraphError, RoadGraph};

use crate::contract::MapWorld;
use crate::query::RouteQuery;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSquare {
    /// Meters per side.
    pub metric_scale: f64,
}

impl Default for UnitSquare {
    fn default() -> Self {
        Self { metric_scale: 1.0 }
    }
}

impl MapWorld for UnitSquare {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "unit_square"
    }

    fn build_graph(&self) -> Result<RoadGraph, GraphError> {
        let mut b = RoadGraph::builder();
        let n0 = b.add_node(0.0, 0.0);
        let n1 = b.add_node(1.0, 0.0);
        let n2 = b.add_node(1.0, 1.0);
        let n3 = b.add_node(0.0, 1.0);
        b.add_way([n0, n1]);
        b.add_way([n1, n2]);
        b.add_way([n2, n3]);
        b.add_way([n3, n0]);
        b.metric_scale(self.metric_scale);
        b.build()
    }

    fn default_query(&self) -> RouteQuery {
        RouteQuery::new([0.0, 0.0], [100.0, 100.0])
    }
}
