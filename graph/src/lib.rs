//! Wayfind Graph: the road-network collaborator searched by `wayfind_search`.
//!
//! The search crate only sees the [`contract::RouteGraph`] trait. This crate
//! also ships [`road::RoadGraph`], an in-memory planar road network built from
//! nodes and ways, so the search can run against real data.
//!
//! # Crate dependency graph
//!
//! ```text
//! wayfind_graph  ←  wayfind_search  ←  wayfind_harness
//! (nodes, ways)     (A*, open set)      (maps, queries, reports)
//! ```
//!
//! # Coordinate space
//!
//! Node positions live in a normalized `[0, 1] × [0, 1]` space. Distances
//! returned by the graph are in that space; [`contract::RouteGraph::metric_scale`]
//! converts them to meters.

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod point;
pub mod road;

pub use contract::{NodeId, RouteGraph};
pub use error::GraphError;
pub use point::Point;
pub use road::{RoadGraph, RoadGraphBuilder};
