//! `SingleNode`: one node, no ways. Every query resolves to it.

use wayfind_graph::{GraphError, RoadGraph};

use crate::contract::MapWorld;
use crate::query::RouteQuery;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleNode;

impl MapWorld for SingleNode {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "single_node"
    }

    fn build_graph(&self) -> Result<RoadGraph, GraphError> {
        let mut b = RoadGraph::builder();
        b.add_node(0.5, 0.5);
        b.build()
    }

    fn default_query(&self) -> RouteQuery {
        RouteQuery::new([0.0, 0.0], [100.0, 100.0])
    }
}
