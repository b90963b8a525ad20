//! `StreetGrid`: a Manhattan street grid spanning the unit square.
//!
//! `cols × rows` intersections, one way per row and one per column.
//! Closed intersections stay in the graph but no street passes through them,
//! so routes must go around.

use wayfind_graph::{GraphError, NodeId, RoadGraph, RoadGraphBuilder};

use crate::contract::MapWorld;
use crate::query::RouteQuery;

#[derive(Debug, Clone, PartialEq)]
pub struct StreetGrid {
    pub cols: usize,
    pub rows: usize,
    pub metric_scale: f64,
    /// `(col, row)` of closed intersections.
    pub closed: Vec<(usize, usize)>,
}

impl StreetGrid {
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            metric_scale: 1.0,
            closed: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_metric_scale(mut self, metric_scale: f64) -> Self {
        self.metric_scale = metric_scale;
        self
    }

    /// Close the intersection at `(col, row)`.
    #[must_use]
    pub fn close(mut self, col: usize, row: usize) -> Self {
        self.closed.push((col, row));
        self
    }

    /// Id of the intersection at `(col, row)`; row-major.
    #[must_use]
    pub fn node_at(&self, col: usize, row: usize) -> NodeId {
        NodeId(u32::try_from(row * self.cols + col).unwrap_or(u32::MAX))
    }

    fn is_open(&self, col: usize, row: usize) -> bool {
        !self.closed.contains(&(col, row))
    }

    /// Add one way per run of consecutive open intersections along `line`.
    fn add_runs<I>(&self, builder: &mut RoadGraphBuilder, line: I)
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut run = Vec::new();
        for (col, row) in line {
            if self.is_open(col, row) {
                run.push(self.node_at(col, row));
            } else {
                flush_run(builder, &mut run);
            }
        }
        flush_run(builder, &mut run);
    }
}

fn flush_run(builder: &mut RoadGraphBuilder, run: &mut Vec<NodeId>) {
    if run.len() >= 2 {
        builder.add_way(run.drain(..));
    } else {
        run.clear();
    }
}

#[allow(clippy::cast_precision_loss)]
fn coordinate(i: usize, count: usize) -> f64 {
    if count <= 1 {
        0.0
    } else {
        i as f64 / (count - 1) as f64
    }
}

impl MapWorld for StreetGrid {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "street_grid"
    }

    fn build_graph(&self) -> Result<RoadGraph, GraphError> {
        let mut builder = RoadGraph::builder();
        for row in 0..self.rows {
            for col in 0..self.cols {
                builder.add_node(coordinate(col, self.cols), coordinate(row, self.rows));
            }
        }
        for row in 0..self.rows {
            self.add_runs(&mut builder, (0..self.cols).map(|col| (col, row)));
        }
        for col in 0..self.cols {
            self.add_runs(&mut builder, (0..self.rows).map(|row| (col, row)));
        }
        builder.metric_scale(self.metric_scale);
        builder.build()
    }

    fn default_query(&self) -> RouteQuery {
        RouteQuery::new([0.0, 0.0], [100.0, 100.0])
    }
}
