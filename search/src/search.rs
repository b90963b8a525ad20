//! A* engine: seeding, best-first selection, expansion and termination.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use wayfind_graph::{NodeId, Point, RouteGraph};

use crate::error::SearchError;
use crate::frontier::{OpenEntry, OpenSet};
use crate::node::{SearchState, StateTable};
use crate::path::{reconstruct_path, PathResult};
use crate::policy::{NeighborPolicy, SearchPolicy};
use crate::trace::{ExpandEvent, SearchTrace, TraceMetadata};

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TerminationReason {
    /// The goal was selected from the open set.
    GoalReached { node: NodeId },
    /// The open set emptied without reaching the goal: no path exists.
    FrontierExhausted,
    /// `max_expansions` was hit first.
    ExpansionBudgetExceeded { limit: u64 },
}

/// Lifecycle of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Constructed, start node not yet queued.
    Idle,
    /// Open set seeded, goal not yet reached.
    Expanding,
    /// Goal selected from the open set.
    Done,
    /// Open set emptied without reaching the goal.
    Exhausted,
    /// Stopped by the expansion budget.
    Budgeted,
}

/// Counters gathered during one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SearchStats {
    /// Nodes removed from the open set and expanded (the goal is not expanded).
    pub expansions: u64,
    /// Nodes discovered, including the start node.
    pub discovered: u64,
    /// Times an open node was given a cheaper parent.
    pub reparented: u64,
    /// Superseded open-set entries discarded on pop.
    pub stale_skipped: u64,
    /// Largest open-set size.
    pub open_high_water: u64,
    /// Open-set pushes, including entries later superseded.
    pub pushed: u64,
}

/// Result of running a search.
///
/// Always carries the trace and counters. Check
/// [`SearchOutcome::is_goal_reached`] or [`SearchOutcome::termination`] for
/// the outcome; `path` is `Some` exactly when the goal was reached.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub start: NodeId,
    pub goal: NodeId,
    pub termination: TerminationReason,
    /// Engine phase at termination: `Done`, `Exhausted` or `Budgeted`.
    pub phase: SearchPhase,
    pub path: Option<PathResult>,
    pub stats: SearchStats,
    pub trace: SearchTrace,
}

impl SearchOutcome {
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.termination, TerminationReason::GoalReached { .. })
    }

    /// Path length in meters, if a path was found.
    #[must_use]
    pub fn distance(&self) -> Option<f64> {
        self.path.as_ref().map(|p| p.distance)
    }

    /// Take the path, turning a failed search into an error.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoPathFound`] if the open set was exhausted and
    /// [`SearchError::ExpansionBudgetExceeded`] if the budget stopped the run.
    pub fn into_path(self) -> Result<PathResult, SearchError> {
        match (self.termination, self.path) {
            (TerminationReason::GoalReached { .. }, Some(path)) => Ok(path),
            (TerminationReason::ExpansionBudgetExceeded { limit }, _) => {
                Err(SearchError::ExpansionBudgetExceeded { limit })
            }
            (TerminationReason::GoalReached { node }, None) => {
                Err(SearchError::BrokenParentChain { node })
            }
            (TerminationReason::FrontierExhausted, _) => Err(SearchError::NoPathFound {
                start: self.start,
                goal: self.goal,
            }),
        }
    }
}

/// A* search over a [`RouteGraph`] between two resolved nodes.
///
/// All per-node state lives in this value; the graph is only read. Use
/// [`AStarSearch::run`] for a full search, or drive it step by step with
/// [`AStarSearch::seed`], [`AStarSearch::select_next`] and
/// [`AStarSearch::expand`].
pub struct AStarSearch<'g, G: RouteGraph + ?Sized> {
    graph: &'g G,
    start: NodeId,
    goal: NodeId,
    goal_position: Point,
    policy: SearchPolicy,
    states: StateTable,
    open: OpenSet,
    stats: SearchStats,
    expansions: Vec<ExpandEvent>,
    phase: SearchPhase,
}

impl<'g, G: RouteGraph + ?Sized> AStarSearch<'g, G> {
    /// Prepare a search from `start` to `goal`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation
    /// and [`SearchError::UnknownNode`] if either node is not in the graph.
    pub fn new(
        graph: &'g G,
        start: NodeId,
        goal: NodeId,
        policy: SearchPolicy,
    ) -> Result<Self, SearchError> {
        policy.validate()?;
        let node_count = graph.node_count();
        if graph.position(start).is_none() {
            return Err(SearchError::UnknownNode {
                node: start,
                node_count,
            });
        }
        let goal_position = graph.position(goal).ok_or(SearchError::UnknownNode {
            node: goal,
            node_count,
        })?;

        Ok(Self {
            graph,
            start,
            goal,
            goal_position,
            policy,
            states: StateTable::new(node_count),
            open: OpenSet::new(),
            stats: SearchStats::default(),
            expansions: Vec::new(),
            phase: SearchPhase::Idle,
        })
    }

    #[must_use]
    pub fn start(&self) -> NodeId {
        self.start
    }

    #[must_use]
    pub fn goal(&self) -> NodeId {
        self.goal
    }

    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Search state of `node` in this run.
    #[must_use]
    pub fn state(&self, node: NodeId) -> Option<&SearchState> {
        self.states.get(node)
    }

    #[must_use]
    pub fn open_set(&self) -> &OpenSet {
        &self.open
    }

    /// Straight-line distance from `node` to the goal, in graph units.
    #[must_use]
    pub fn heuristic(&self, node: NodeId) -> f64 {
        self.graph
            .position(node)
            .map_or(f64::INFINITY, |p| p.distance(&self.goal_position))
    }

    /// Mark the start node visited and queue it. No-op unless `Idle`.
    pub fn seed(&mut self) {
        if self.phase != SearchPhase::Idle {
            return;
        }
        let h_value = self.heuristic(self.start);
        if let Some(state) = self.states.get_mut(self.start) {
            *state = SearchState {
                visited: true,
                closed: false,
                g_value: 0.0,
                h_value,
                parent: None,
            };
        }
        self.open.push(OpenEntry {
            node: self.start,
            g_value: 0.0,
            h_value,
        });
        self.stats.discovered += 1;
        self.phase = SearchPhase::Expanding;
    }

    /// Remove and return the open node with the lowest `f = g + h`.
    ///
    /// Ties go to the lower `h`, then the lower node id. Entries superseded
    /// by a cheaper re-queue are discarded. The returned node is closed.
    ///
    /// Selecting the goal moves the engine to [`SearchPhase::Done`]; an empty
    /// open set moves it to [`SearchPhase::Exhausted`].
    pub fn select_next(&mut self) -> Option<NodeId> {
        while let Some(entry) = self.open.pop() {
            let Some(state) = self.states.get_mut(entry.node) else {
                continue;
            };
            if !entry.is_current(state) {
                self.stats.stale_skipped += 1;
                continue;
            }
            state.closed = true;
            if entry.node == self.goal {
                self.phase = SearchPhase::Done;
            }
            return Some(entry.node);
        }
        if self.phase == SearchPhase::Expanding {
            self.phase = SearchPhase::Exhausted;
        }
        None
    }

    /// Queue the neighbors of `node` according to the neighbor policy.
    ///
    /// Each admitted neighbor gets `node` as parent,
    /// `g = g(node) + distance(node, neighbor)` and `h = heuristic(neighbor)`,
    /// is marked visited and is pushed onto the open set.
    pub fn expand(&mut self, node: NodeId) {
        let Some(current) = self.states.get(node).copied() else {
            return;
        };
        let graph = self.graph;
        let mut queued = Vec::new();

        for &neighbor in graph.neighbors(node) {
            let Some(prev) = self.states.get(neighbor).copied() else {
                continue;
            };
            let g_value = current.g_value + graph.distance(node, neighbor);
            if !g_value.is_finite() {
                continue;
            }
            let admit = match self.policy.neighbor_policy {
                NeighborPolicy::Strict => {
                    !prev.closed && (!prev.visited || g_value < prev.g_value)
                }
                NeighborPolicy::FirstDiscovery => !prev.visited,
            };
            if !admit {
                continue;
            }

            let h_value = if prev.visited {
                prev.h_value
            } else {
                self.heuristic(neighbor)
            };
            if prev.visited {
                self.stats.reparented += 1;
            } else {
                self.stats.discovered += 1;
            }
            if let Some(state) = self.states.get_mut(neighbor) {
                state.visited = true;
                state.g_value = g_value;
                state.h_value = h_value;
                state.parent = Some(node);
            }
            self.open.push(OpenEntry {
                node: neighbor,
                g_value,
                h_value,
            });
            queued.push(neighbor);
        }

        debug!(
            node = %node,
            g = current.g_value,
            h = current.h_value,
            queued = queued.len(),
            open = self.open.len(),
            "expanded node"
        );
        self.expansions.push(ExpandEvent {
            expansion_order: self.stats.expansions,
            node,
            g_value: current.g_value,
            h_value: current.h_value,
            queued,
        });
        self.stats.expansions += 1;
    }

    /// Run the search to completion.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::BrokenParentChain`] if the goal is reached but
    /// its parent links cannot be walked back to the start. Failing to reach
    /// the goal is not an error; see [`SearchOutcome::termination`].
    pub fn run(mut self) -> Result<SearchOutcome, SearchError> {
        self.seed();

        // The budget counts expansions; selecting the goal is not one.
        let termination = loop {
            let Some(current) = self.select_next() else {
                break TerminationReason::FrontierExhausted;
            };
            if current == self.goal {
                break TerminationReason::GoalReached { node: current };
            }
            if let Some(limit) = self.policy.max_expansions {
                if self.stats.expansions >= limit {
                    warn!(
                        limit,
                        start = %self.start,
                        goal = %self.goal,
                        "expansion budget exhausted before reaching goal"
                    );
                    self.phase = SearchPhase::Budgeted;
                    break TerminationReason::ExpansionBudgetExceeded { limit };
                }
            }
            self.expand(current);
        };

        let path = match termination {
            TerminationReason::GoalReached { node } => {
                Some(reconstruct_path(self.graph, &self.states, self.start, node)?)
            }
            TerminationReason::FrontierExhausted
            | TerminationReason::ExpansionBudgetExceeded { .. } => None,
        };
        self.stats.open_high_water = self.open.high_water();
        self.stats.pushed = self.open.total_pushed();

        info!(
            start = %self.start,
            goal = %self.goal,
            termination = ?termination,
            expansions = self.stats.expansions,
            discovered = self.stats.discovered,
            distance = path.as_ref().map(|p| p.distance),
            "search finished"
        );

        let trace = SearchTrace {
            expansions: self.expansions,
            metadata: TraceMetadata {
                start: self.start,
                goal: self.goal,
                neighbor_policy: self.policy.neighbor_policy,
                max_expansions: self.policy.max_expansions,
                termination,
                stats: self.stats,
            },
        };

        Ok(SearchOutcome {
            start: self.start,
            goal: self.goal,
            termination,
            phase: self.phase,
            path,
            stats: self.stats,
            trace,
        })
    }
}
