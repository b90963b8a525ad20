//! `Islands`: two road networks with no connection between them.
//!
//! A triangle near the origin and a triangle near `(1, 1)`. Routing from one
//! to the other must exhaust the open set.

use wayfind_graph::{GraphError, RoadGraph};

use crate::contract::MapWorld;
use crate::query::RouteQuery;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Islands;

impl MapWorld for Islands {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "islands"
    }

    fn build_graph(&self) -> Result<RoadGraph, GraphError> {
        let mut b = RoadGraph::builder();
        let a0 = b.add_node(0.0, 0.0);
        let a1 = b.add_node(0.2, 0.0);
        let a2 = b.add_node(0.1, 0.2);
        b.add_way([a0, a1, a2, a0]);

        let b0 = b.add_node(0.8, 0.8);
        let b1 = b.add_node(1.0, 0.8);
        let b2 = b.add_node(0.9, 1.0);
        b.add_way([b0, b1, b2, b0]);
        b.build()
    }

    fn default_query(&self) -> RouteQuery {
        RouteQuery::new([0.0, 0.0], [100.0, 100.0])
    }
}
