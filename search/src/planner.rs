//! Route planner: resolves percentage query points to graph nodes and runs
//! the search between them.

use tracing::debug;
use wayfind_graph::{NodeId, RouteGraph};

use crate::error::SearchError;
use crate::path::PathResult;
use crate::policy::SearchPolicy;
use crate::search::{AStarSearch, SearchOutcome};

/// A start/end query resolved against one graph.
///
/// Construction only reads the graph; no search state is created until
/// [`RoutePlanner::run`].
pub struct RoutePlanner<'g, G: RouteGraph + ?Sized> {
    graph: &'g G,
    start_node: NodeId,
    end_node: NodeId,
    policy: SearchPolicy,
}

impl<'g, G: RouteGraph + ?Sized> RoutePlanner<'g, G> {
    /// Resolve start and end points given as percentages (0–100) of the
    /// graph's extent.
    ///
    /// Each coordinate is divided by 100 and matched to the nearest graph
    /// node with [`RouteGraph::find_closest_node`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQueryPoint`] if a coordinate is not a
    /// finite value in `0..=100`, and [`SearchError::EmptyGraph`] if the graph
    /// has no node to resolve to.
    pub fn new(
        graph: &'g G,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
    ) -> Result<Self, SearchError> {
        if graph.node_count() == 0 {
            return Err(SearchError::EmptyGraph);
        }
        let start_node = resolve(graph, start_x, start_y)?;
        let end_node = resolve(graph, end_x, end_y)?;
        debug!(start = %start_node, end = %end_node, "resolved query points");

        Ok(Self {
            graph,
            start_node,
            end_node,
            policy: SearchPolicy::default(),
        })
    }

    /// Replace the search policy.
    #[must_use]
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    #[must_use]
    pub fn end_node(&self) -> NodeId {
        self.end_node
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// A fresh engine for this query, not yet seeded.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy is invalid.
    pub fn search(&self) -> Result<AStarSearch<'g, G>, SearchError> {
        AStarSearch::new(
            self.graph,
            self.start_node,
            self.end_node,
            self.policy.clone(),
        )
    }

    /// Run A* from the start node to the end node.
    ///
    /// Every call starts from clean search state.
    ///
    /// # Errors
    ///
    /// See [`AStarSearch::new`] and [`AStarSearch::run`].
    pub fn run(&self) -> Result<SearchOutcome, SearchError> {
        self.search()?.run()
    }

    /// Run A* and return only the path.
    ///
    /// # Errors
    ///
    /// As [`RoutePlanner::run`], plus [`SearchError::NoPathFound`] and
    /// [`SearchError::ExpansionBudgetExceeded`] when the goal is not reached.
    pub fn route(&self) -> Result<PathResult, SearchError> {
        self.run()?.into_path()
    }
}

impl<G: RouteGraph + ?Sized> std::fmt::Debug for RoutePlanner<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutePlanner")
            .field("start_node", &self.start_node)
            .field("end_node", &self.end_node)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn resolve<G: RouteGraph + ?Sized>(graph: &G, x: f64, y: f64) -> Result<NodeId, SearchError> {
    let (Some(ux), Some(uy)) = (percent_to_unit(x), percent_to_unit(y)) else {
        return Err(SearchError::InvalidQueryPoint { x, y });
    };
    graph
        .find_closest_node(ux, uy)
        .ok_or(SearchError::EmptyGraph)
}

/// Map a percentage in `0..=100` to `0..=1`.
fn percent_to_unit(value: f64) -> Option<f64> {
    (value.is_finite() && (0.0..=100.0).contains(&value)).then(|| value * 0.01)
}
