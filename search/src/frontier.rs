//! Open set: a binary min-heap of discovered, unexpanded nodes.
//!
//! A node may sit in the heap more than once when a cheaper path to it is
//! found after it was queued. The search discards the superseded entries
//! when they surface (see [`OpenEntry::is_current`]).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use wayfind_graph::NodeId;

use crate::node::{FrontierKey, SearchState};

/// A node as it was when queued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenEntry {
    pub node: NodeId,
    pub g_value: f64,
    pub h_value: f64,
}

impl OpenEntry {
    #[must_use]
    pub fn f_value(&self) -> f64 {
        self.g_value + self.h_value
    }

    #[must_use]
    pub fn key(&self) -> FrontierKey {
        FrontierKey {
            f_value: self.f_value(),
            h_value: self.h_value,
            node: self.node,
        }
    }

    /// Whether this entry still describes `state`: the node is not yet
    /// closed and its cost has not been lowered since it was queued.
    #[must_use]
    pub fn is_current(&self, state: &SearchState) -> bool {
        !state.closed && self.g_value.to_bits() == state.g_value.to_bits()
    }
}

/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest `f` first).
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    entry: OpenEntry,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first open set.
#[derive(Debug, Default)]
pub struct OpenSet {
    heap: BinaryHeap<FrontierEntry>,
    high_water: u64,
    total_pushed: u64,
}

impl OpenSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: OpenEntry) {
        self.heap.push(FrontierEntry {
            key: Reverse(entry.key()),
            entry,
        });
        self.total_pushed += 1;
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Remove and return the entry with the smallest [`FrontierKey`].
    #[must_use]
    pub fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop().map(|e| e.entry)
    }

    /// Iterate over the queued entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &OpenEntry> {
        self.heap.iter().map(|e| &e.entry)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the open set has reached.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Number of pushes, including superseded entries.
    #[must_use]
    pub fn total_pushed(&self) -> u64 {
        self.total_pushed
    }
}
