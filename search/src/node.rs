//! Search nodes and the frontier ordering key.

use waypoint_kernel::model::{Cost, VertexId};

/// Arena index of a [`SearchNode`]. Equal to its position in the run's node list.
pub type NodeId = u64;

/// An immutable record of one frontier insertion.
///
/// Nodes form a tree rooted at the start node. `parent_id` is an index into
/// the run's node arena, and a node's parent always has a smaller `node_id`,
/// so the parent chain can never cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    /// Arena index (also the global creation counter).
    pub node_id: NodeId,
    /// Parent arena index (`None` for the root).
    pub parent_id: Option<NodeId>,
    /// The vertex this node reaches.
    pub vertex: VertexId,
    /// Number of edges from the start (root = 0).
    pub depth: u32,
    /// Cost from the start, `g(n)`.
    pub g_cost: Cost,
    /// Heuristic estimate at insertion, `h(n)`.
    pub h_cost: Cost,
    /// Insertion counter for deterministic tie-breaking.
    pub creation_order: u64,
}

impl SearchNode {
    /// The root node for `start`: `g = 0`, `f = h(start)`.
    #[must_use]
    pub fn root(start: VertexId, h_cost: Cost) -> Self {
        Self {
            node_id: 0,
            parent_id: None,
            vertex: start,
            depth: 0,
            g_cost: 0,
            h_cost,
            creation_order: 0,
        }
    }

    /// `f_cost = g_cost + h_cost` (the frontier ordering key).
    ///
    /// Saturates at `Cost::MAX`. The engine never creates a node for which
    /// [`SearchNode::checked_f_cost`] is `None`, so saturation only shows up
    /// on hand-built nodes.
    #[must_use]
    pub fn f_cost(&self) -> Cost {
        self.g_cost.saturating_add(self.h_cost)
    }

    /// `g_cost + h_cost`, or `None` if the sum does not fit in a `Cost`.
    #[must_use]
    pub fn checked_f_cost(&self) -> Option<Cost> {
        self.g_cost.checked_add(self.h_cost)
    }
}

/// The frontier ordering key: `(f_cost, creation_order)`.
///
/// Lower `f_cost` first; among equal `f_cost`, the node inserted first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub f_cost: Cost,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

impl From<&SearchNode> for FrontierKey {
    fn from(node: &SearchNode) -> Self {
        Self {
            f_cost: node.f_cost(),
            creation_order: node.creation_order,
        }
    }
}
