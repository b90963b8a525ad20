//! Per-search node state and the frontier ordering key.
//!
//! Search state lives in a [`StateTable`] owned by one search run, indexed by
//! `NodeId`. The graph itself is never mutated, so repeated or concurrent
//! searches over the same graph start from clean state.

use std::cmp::Ordering;

use wayfind_graph::NodeId;

/// Search bookkeeping for one node during one run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SearchState {
    /// Set when the node is first discovered; never cleared.
    pub visited: bool,
    /// Set when the node is removed from the open set for expansion.
    pub closed: bool,
    /// Cost of the best known path from the start.
    pub g_value: f64,
    /// Straight-line estimate to the goal.
    pub h_value: f64,
    /// Predecessor on the best known path (`None` for the start node).
    pub parent: Option<NodeId>,
}

impl SearchState {
    /// `f = g + h`, the frontier ordering value.
    #[must_use]
    pub fn f_value(&self) -> f64 {
        self.g_value + self.h_value
    }
}

/// Side table of [`SearchState`], one slot per graph node.
#[derive(Debug, Clone)]
pub struct StateTable {
    states: Vec<SearchState>,
}

impl StateTable {
    /// A zeroed table for a graph of `node_count` nodes.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            states: vec![SearchState::default(); node_count],
        }
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SearchState> {
        self.states.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SearchState> {
        self.states.get_mut(id.index())
    }

    /// Number of slots (equals the graph's node count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// The frontier ordering key: `(f_value, h_value, node)`.
///
/// Lower `f` first; ties go to the lower `h` (the node believed closer to the
/// goal), then to the lower node id. Floats are compared with `total_cmp`, so
/// the order is total and identical across runs.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub f_value: f64,
    pub h_value: f64,
    pub node: NodeId,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_value
            .total_cmp(&other.f_value)
            .then(self.h_value.total_cmp(&other.h_value))
            .then(self.node.cmp(&other.node))
    }
}
