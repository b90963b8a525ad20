//! JSON map files.
//!
//! ```json
//! {
//!   "metric_scale": 1200.0,
//!   "nodes": [[0.0, 0.0], [0.5, 0.0], [0.5, 0.5]],
//!   "ways": [[0, 1, 2]]
//! }
//! ```
//!
//! Node positions are in normalized `[0, 1]` space; `ways` reference nodes by
//! their index in `nodes`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wayfind_graph::road::DEFAULT_METRIC_SCALE;
use wayfind_graph::{NodeId, RoadGraph, RouteGraph};

use crate::error::HarnessError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapFile {
    pub nodes: Vec<[f64; 2]>,
    #[serde(default)]
    pub ways: Vec<Vec<usize>>,
    #[serde(default = "default_metric_scale")]
    pub metric_scale: f64,
}

fn default_metric_scale() -> f64 {
    DEFAULT_METRIC_SCALE
}

impl MapFile {
    /// Parse a map from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Json`] on malformed input.
    pub fn from_json_str(s: &str) -> Result<Self, HarnessError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a map file.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] if the file cannot be read and
    /// [`HarnessError::Json`] if it is not a valid map.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let text = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Snapshot an existing graph.
    #[must_use]
    pub fn from_graph(graph: &RoadGraph) -> Self {
        Self {
            nodes: graph.positions().iter().map(|p| [p.x, p.y]).collect(),
            ways: graph
                .ways()
                .iter()
                .map(|w| w.iter().copied().map(NodeId::index).collect())
                .collect(),
            metric_scale: graph.metric_scale(),
        }
    }

    /// Build the road graph described by this file.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Graph`] if the map fails graph validation.
    pub fn into_graph(self) -> Result<RoadGraph, HarnessError> {
        let mut builder = RoadGraph::builder();
        for [x, y] in self.nodes {
            builder.add_node(x, y);
        }
        for way in self.ways {
            builder.add_way_indices(way);
        }
        builder.metric_scale(self.metric_scale);
        Ok(builder.build()?)
    }
}
