//! Lazy-deletion min-heap frontier.
//!
//! Duplicate entries for the same vertex are allowed. The engine discards
//! stale ones when they are popped, so there is no decrease-key and no
//! vertex-to-position index.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::node::{FrontierKey, SearchNode};

/// Failure of a frontier operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierError {
    /// `pop_min` was called on an empty frontier.
    EmptyFrontier,
}

impl std::fmt::Display for FrontierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFrontier => write!(f, "pop_min on empty frontier"),
        }
    }
}

impl std::error::Error for FrontierError {}

/// A frontier entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior.
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node: SearchNode,
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

/// Min-priority frontier ordered by [`FrontierKey`].
///
/// `creation_order` is unique per node within a run, so the key is a total
/// order and pop order is fully determined by the push sequence.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    high_water: u64,
}

impl Frontier {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a node. O(log k).
    pub fn push(&mut self, node: SearchNode) {
        self.heap.push(FrontierEntry {
            key: Reverse(FrontierKey::from(&node)),
            node,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Remove and return the node with the smallest key.
    ///
    /// # Errors
    ///
    /// [`FrontierError::EmptyFrontier`] if nothing remains.
    pub fn pop_min(&mut self) -> Result<SearchNode, FrontierError> {
        self.heap
            .pop()
            .map(|e| e.node)
            .ok_or(FrontierError::EmptyFrontier)
    }

    /// The node `pop_min` would return next.
    #[must_use]
    pub fn peek(&self) -> Option<&SearchNode> {
        self.heap.peek().map(|e| &e.node)
    }

    /// Key of the node `pop_min` would return next.
    #[must_use]
    pub fn peek_key(&self) -> Option<FrontierKey> {
        self.heap.peek().map(|e| e.key.0)
    }

    /// Current frontier size, stale entries included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
