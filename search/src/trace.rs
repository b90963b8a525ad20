//! `SearchTrace`: expansion-event log of one search run.
//!
//! The ordered list of [`ExpandEvent`]s records every decision the engine
//! made. Its canonical JSON form and digest are stable across runs and
//! platforms, so two runs can be compared by digest alone.

use serde_json::json;
use wayfind_graph::NodeId;

use crate::canon::{canonical_hash, canonical_json_bytes, f64_hex, CanonError};
use crate::policy::NeighborPolicy;
use crate::search::{SearchStats, TerminationReason};

/// Domain prefix for search trace content hashing.
pub const DOMAIN_SEARCH_TRACE: &[u8] = b"WAYFIND::SEARCH_TRACE::V1\0";

/// The complete trace of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTrace {
    /// Expansions in the order they happened.
    pub expansions: Vec<ExpandEvent>,
    pub metadata: TraceMetadata,
}

/// One open-set pop followed by neighbor expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandEvent {
    /// Position of this event in the run (0-based).
    pub expansion_order: u64,
    /// The expanded node.
    pub node: NodeId,
    pub g_value: f64,
    pub h_value: f64,
    /// Neighbors pushed onto the open set, in graph order.
    pub queued: Vec<NodeId>,
}

/// Run-level bindings and counters.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceMetadata {
    pub start: NodeId,
    pub goal: NodeId,
    pub neighbor_policy: NeighborPolicy,
    pub max_expansions: Option<u64>,
    pub termination: TerminationReason,
    pub stats: SearchStats,
}

impl SearchTrace {
    /// Serialize to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails. Costs are hex-encoded,
    /// so this only fails if the JSON model itself is changed to carry floats.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content digest of the canonical JSON (`"sha256:<hex>"`).
    ///
    /// # Errors
    ///
    /// See [`SearchTrace::to_canonical_json_bytes`].
    pub fn digest(&self) -> Result<String, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_TRACE, &bytes))
    }

    /// Node ids in expansion order.
    #[must_use]
    pub fn expansion_order(&self) -> Vec<NodeId> {
        self.expansions.iter().map(|e| e.node).collect()
    }

    fn to_json_value(&self) -> serde_json::Value {
        json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
        })
    }
}

fn expand_event_to_json(e: &ExpandEvent) -> serde_json::Value {
    json!({
        "expansion_order": e.expansion_order,
        "g_value": f64_hex(e.g_value),
        "h_value": f64_hex(e.h_value),
        "node": e.node.0,
        "queued": e.queued.iter().map(|n| n.0).collect::<Vec<_>>(),
    })
}

fn metadata_to_json(m: &TraceMetadata) -> serde_json::Value {
    json!({
        "goal": m.goal.0,
        "max_expansions": m.max_expansions,
        "neighbor_policy": m.neighbor_policy.as_str(),
        "start": m.start.0,
        "stats": {
            "discovered": m.stats.discovered,
            "expansions": m.stats.expansions,
            "open_high_water": m.stats.open_high_water,
            "pushed": m.stats.pushed,
            "reparented": m.stats.reparented,
            "stale_skipped": m.stats.stale_skipped,
        },
        "termination": termination_to_json(&m.termination),
    })
}

fn termination_to_json(r: &TerminationReason) -> serde_json::Value {
    match r {
        TerminationReason::GoalReached { node } => {
            json!({"node": node.0, "type": "goal_reached"})
        }
        TerminationReason::FrontierExhausted => json!({"type": "frontier_exhausted"}),
        TerminationReason::ExpansionBudgetExceeded { limit } => {
            json!({"limit": limit, "type": "expansion_budget_exceeded"})
        }
    }
}
