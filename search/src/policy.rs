//! Search policy types.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// How an expansion treats neighbors that were already discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborPolicy {
    /// Closed nodes are never re-queued. An open node is re-parented only
    /// when the new path to it is strictly cheaper. Returns optimal paths
    /// for any graph whose distances respect the Euclidean lower bound.
    #[default]
    Strict,
    /// A node keeps the parent and cost of its first discovery; visited
    /// neighbors are skipped. Cheaper per expansion, not guaranteed optimal.
    FirstDiscovery,
}

impl NeighborPolicy {
    /// Stable lowercase name, as used in traces and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::FirstDiscovery => "first_discovery",
        }
    }
}

/// Search budget and neighbor discipline.
///
/// Deserializable from config; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchPolicy {
    /// Hard cap on node expansions (`None` = unbounded).
    pub max_expansions: Option<u64>,
    /// Treatment of already-discovered neighbors.
    pub neighbor_policy: NeighborPolicy,
}

impl SearchPolicy {
    /// Policy with an expansion budget.
    #[must_use]
    pub fn with_max_expansions(mut self, limit: u64) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Policy with the given neighbor discipline.
    #[must_use]
    pub fn with_neighbor_policy(mut self, neighbor_policy: NeighborPolicy) -> Self {
        self.neighbor_policy = neighbor_policy;
        self
    }

    /// Check the policy before a search starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_expansions` is zero,
    /// which would stop every search before its first expansion.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }
}
