//! Harness runner: resolves a query against a map, runs the search and
//! summarizes the outcome as a [`RouteReport`].
//!
//! # Pipeline
//!
//! ```text
//! MapWorld::build_graph() | MapFile::into_graph()
//!   → RoutePlanner::new(query percentages) → with_policy()
//!   → run() → trace.digest() → RouteReport
//! ```
//!
//! The runner implements no search logic itself. A search that ends without
//! reaching the goal still yields a report; only pre-flight failures (bad
//! query, bad policy, empty graph) and a broken parent chain are errors.

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};
use wayfind_graph::{NodeId, RoadGraph, RouteGraph};
use wayfind_search::{RoutePlanner, SearchOutcome, TerminationReason};

use crate::contract::MapWorld;
use crate::error::HarnessError;
use crate::query::RouteQuery;

/// Summary of one route query, written as `report.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReport {
    /// World id when the run came from a fixture world.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_id: Option<String>,
    pub start_node: NodeId,
    pub end_node: NodeId,
    pub termination: TerminationReason,
    pub found: bool,
    /// Route length in meters; `None` when no route was found.
    pub distance_m: Option<f64>,
    /// Node ids from start to end; empty when no route was found.
    pub path: Vec<NodeId>,
    /// Normalized `[x, y]` position of each node in `path`.
    pub waypoints: Vec<[f64; 2]>,
    pub expansions: u64,
    /// Digest of the canonical search trace (`"sha256:<hex>"`).
    pub trace_digest: String,
}

/// A report together with the full outcome it was built from.
#[derive(Debug, Clone)]
pub struct RouteRun {
    pub report: RouteReport,
    pub outcome: SearchOutcome,
}

/// Run `query` against `graph`.
///
/// # Errors
///
/// Returns [`HarnessError::Search`] for an invalid query point, an invalid
/// policy, an empty graph or a broken parent chain, and
/// [`HarnessError::Canon`] if the trace cannot be digested.
pub fn run_query<G: RouteGraph + ?Sized>(
    graph: &G,
    query: &RouteQuery,
) -> Result<RouteRun, HarnessError> {
    let [sx, sy] = query.start;
    let [ex, ey] = query.end;
    let planner = RoutePlanner::new(graph, sx, sy, ex, ey)?.with_policy(query.policy.clone());
    let outcome = planner.run()?;
    let trace_digest = outcome.trace.digest()?;

    let (path, waypoints) = match &outcome.path {
        Some(p) => (
            p.node_ids(),
            p.nodes.iter().map(|n| [n.position.x, n.position.y]).collect(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    let report = RouteReport {
        world_id: None,
        start_node: outcome.start,
        end_node: outcome.goal,
        termination: outcome.termination,
        found: outcome.is_goal_reached(),
        distance_m: outcome.distance(),
        path,
        waypoints,
        expansions: outcome.stats.expansions,
        trace_digest,
    };

    info!(
        found = report.found,
        distance_m = report.distance_m,
        expansions = report.expansions,
        digest = %report.trace_digest,
        "route query complete"
    );

    Ok(RouteRun { report, outcome })
}

/// Build a fixture world's graph and run its default query.
///
/// # Errors
///
/// Returns [`HarnessError::Graph`] if the world builds an invalid graph, plus
/// the errors of [`run_query`].
pub fn run_world(world: &dyn MapWorld) -> Result<RouteRun, HarnessError> {
    let span = info_span!("run_world", world = world.world_id());
    let _guard = span.enter();

    let graph: RoadGraph = world.build_graph()?;
    let mut run = run_query(&graph, &world.default_query())?;
    run.report.world_id = Some(world.world_id().to_owned());
    Ok(run)
}
