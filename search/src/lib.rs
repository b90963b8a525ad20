//! Wayfind Search: A* route search over planar road graphs.
//!
//! This crate depends only on `wayfind_graph`, and only through the
//! [`wayfind_graph::RouteGraph`] trait.
//!
//! # Flow
//!
//! ```text
//! RoutePlanner::new      percentages → nearest start/end nodes
//!   └─ AStarSearch::run  seed → select_next → expand → … → goal | exhausted
//!        └─ reconstruct_path   parent links → ordered nodes + meters
//! ```
//!
//! # Key types
//!
//! - [`RoutePlanner`]: query resolution and entry point
//! - [`AStarSearch`]: the engine; owns all per-search state
//! - [`OpenSet`]: binary-heap open set with deterministic tie-break
//! - [`SearchOutcome`]: termination reason, optional path, trace
//! - [`SearchTrace`]: expansion log with a canonical digest
//! - [`SearchPolicy`]: expansion budget and neighbor discipline

#![forbid(unsafe_code)]

pub mod canon;
pub mod error;
pub mod frontier;
pub mod node;
pub mod path;
pub mod planner;
pub mod policy;
pub mod search;
pub mod trace;

pub use error::SearchError;
pub use frontier::{OpenEntry, OpenSet};
pub use node::{FrontierKey, SearchState, StateTable};
pub use path::{reconstruct_path, PathNode, PathResult};
pub use planner::RoutePlanner;
pub use policy::{NeighborPolicy, SearchPolicy};
pub use search::{AStarSearch, SearchOutcome, SearchPhase, SearchStats, TerminationReason};
pub use trace::{ExpandEvent, SearchTrace};
