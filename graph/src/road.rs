//! In-memory planar road network.
//!
//! A [`RoadGraph`] is a set of positioned nodes joined by ways (ordered node
//! lists, one per road). Two nodes are adjacent when they are consecutive on
//! some way. Adjacency is derived per node on first request and cached, so a
//! search only pays for the part of the network it actually reaches.

use once_cell::sync::OnceCell;

use crate::contract::{NodeId, RouteGraph};
use crate::error::GraphError;
use crate::point::Point;

/// Default conversion from normalized units to meters.
pub const DEFAULT_METRIC_SCALE: f64 = 1.0;

/// Immutable road network with lazily cached adjacency.
///
/// Safe to share between threads: adjacency caches are one-time cells and no
/// search state is stored here.
#[derive(Debug)]
pub struct RoadGraph {
    positions: Vec<Point>,
    ways: Vec<Vec<NodeId>>,
    /// For each node, the indices of the ways passing through it.
    node_ways: Vec<Vec<usize>>,
    adjacency: Vec<OnceCell<Vec<NodeId>>>,
    routable_count: usize,
    metric_scale: f64,
}

impl RoadGraph {
    /// Start building a graph.
    #[must_use]
    pub fn builder() -> RoadGraphBuilder {
        RoadGraphBuilder::default()
    }

    /// All node positions, indexed by `NodeId`.
    #[must_use]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// All ways, in insertion order.
    #[must_use]
    pub fn ways(&self) -> &[Vec<NodeId>] {
        &self.ways
    }

    /// Whether `id` lies on at least one way.
    #[must_use]
    pub fn is_routable(&self, id: NodeId) -> bool {
        self.node_ways.get(id.index()).is_some_and(|w| !w.is_empty())
    }

    /// Number of nodes whose adjacency has been computed so far.
    #[cfg(test)]
    fn cached_adjacency_count(&self) -> usize {
        self.adjacency.iter().filter(|c| c.get().is_some()).count()
    }

    fn compute_neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for &way_idx in &self.node_ways[id.index()] {
            let way = &self.ways[way_idx];
            for (pos, &node) in way.iter().enumerate() {
                if node != id {
                    continue;
                }
                if pos > 0 {
                    out.push(way[pos - 1]);
                }
                if let Some(&next) = way.get(pos + 1) {
                    out.push(next);
                }
            }
        }
        out.retain(|&n| n != id);
        out.sort_unstable();
        out.dedup();
        out
    }
}

impl RouteGraph for RoadGraph {
    fn node_count(&self) -> usize {
        self.positions.len()
    }

    fn position(&self, id: NodeId) -> Option<Point> {
        self.positions.get(id.index()).copied()
    }

    /// Nearest node that lies on a way. Isolated nodes are only considered
    /// when the graph has no ways at all. Ties go to the lower id.
    fn find_closest_node(&self, x: f64, y: f64) -> Option<NodeId> {
        let target = Point::new(x, y);
        let only_routable = self.routable_count > 0;

        let mut best: Option<(usize, f64)> = None;
        for (idx, p) in self.positions.iter().enumerate() {
            if only_routable && self.node_ways[idx].is_empty() {
                continue;
            }
            let d = p.distance_squared(&target);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((idx, d)),
            }
        }
        // Node count is bounded by `u32::MAX` at build time.
        best.and_then(|(idx, _)| u32::try_from(idx).ok().map(NodeId))
    }

    fn neighbors(&self, id: NodeId) -> &[NodeId] {
        match self.adjacency.get(id.index()) {
            Some(cell) => cell.get_or_init(|| self.compute_neighbors(id)).as_slice(),
            None => &[],
        }
    }

    fn metric_scale(&self) -> f64 {
        self.metric_scale
    }
}

/// Incremental constructor for [`RoadGraph`].
#[derive(Debug, Clone, Default)]
pub struct RoadGraphBuilder {
    positions: Vec<Point>,
    ways: Vec<Vec<usize>>,
    metric_scale: Option<f64>,
}

impl RoadGraphBuilder {
    /// Add a node at `(x, y)` and return its id.
    pub fn add_node(&mut self, x: f64, y: f64) -> NodeId {
        let id = NodeId(u32::try_from(self.positions.len()).unwrap_or(u32::MAX));
        self.positions.push(Point::new(x, y));
        id
    }

    /// Add a way through `nodes`, in travel order.
    pub fn add_way<I>(&mut self, nodes: I) -> &mut Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.ways.push(nodes.into_iter().map(NodeId::index).collect());
        self
    }

    /// Add a way from raw node indices (as found in map files).
    pub fn add_way_indices(&mut self, nodes: Vec<usize>) -> &mut Self {
        self.ways.push(nodes);
        self
    }

    /// Set the normalized-to-meters conversion factor.
    pub fn metric_scale(&mut self, scale: f64) -> &mut Self {
        self.metric_scale = Some(scale);
        self
    }

    /// Validate and freeze the graph.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] if the graph is empty, a position is not
    /// finite, a way is too short or references an unknown node, or the
    /// metric scale is not finite and positive.
    pub fn build(self) -> Result<RoadGraph, GraphError> {
        let node_count = self.positions.len();
        if node_count == 0 {
            return Err(GraphError::EmptyGraph);
        }
        if u32::try_from(node_count).is_err() {
            return Err(GraphError::TooManyNodes {
                max: u32::MAX as usize,
            });
        }
        for (index, p) in self.positions.iter().enumerate() {
            if !p.is_finite() {
                return Err(GraphError::NonFinitePosition {
                    index,
                    x: p.x,
                    y: p.y,
                });
            }
        }

        let metric_scale = self.metric_scale.unwrap_or(DEFAULT_METRIC_SCALE);
        if !metric_scale.is_finite() || metric_scale <= 0.0 {
            return Err(GraphError::InvalidMetricScale {
                scale: metric_scale,
            });
        }

        let mut node_ways = vec![Vec::new(); node_count];
        let mut ways = Vec::with_capacity(self.ways.len());
        for (way_idx, way) in self.ways.into_iter().enumerate() {
            if way.len() < 2 {
                return Err(GraphError::DegenerateWay {
                    way: way_idx,
                    len: way.len(),
                });
            }
            let mut ids = Vec::with_capacity(way.len());
            for node in way {
                let Some(slot) = node_ways.get_mut(node) else {
                    return Err(GraphError::UnknownNode {
                        way: way_idx,
                        node,
                        node_count,
                    });
                };
                if slot.last() != Some(&way_idx) {
                    slot.push(way_idx);
                }
                // In range: checked against node_count above, which fits u32.
                ids.push(NodeId(u32::try_from(node).unwrap_or(u32::MAX)));
            }
            ways.push(ids);
        }

        let routable_count = node_ways.iter().filter(|w| !w.is_empty()).count();
        let adjacency = (0..node_count).map(|_| OnceCell::new()).collect();

        Ok(RoadGraph {
            positions: self.positions,
            ways,
            node_ways,
            adjacency,
            routable_count,
            metric_scale,
        })
    }
}
