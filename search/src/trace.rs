//! `SearchTraceV1`: pop-by-pop audit log of one search run.
//!
//! The normative decision surface is the ordered list of `PopEventV1`
//! entries. Node summaries are a derived index over the node arena. Two runs
//! over the same graph, endpoints and policy produce byte-identical
//! canonical JSON.

use waypoint_kernel::model::{Cost, VertexId};
use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::node::{FrontierKey, NodeId, SearchNode};
use crate::policy::SearchPolicy;
use crate::search::SearchStats;

/// The complete audit trail of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTraceV1 {
    /// Ordered pop events (empty when the policy disables recording).
    pub pops: Vec<PopEventV1>,
    /// Derived node index sorted by `node_id` ascending.
    pub node_summaries: Vec<NodeSummaryV1>,
    /// Aggregate metadata.
    pub metadata: TraceMetadata,
}

/// One frontier pop and what the engine did with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopEventV1 {
    /// Total order of frontier pops, stale ones included.
    pub pop_order: u64,
    /// The popped node.
    pub node_id: NodeId,
    /// The popped node's vertex.
    pub vertex: VertexId,
    /// `g` carried by the popped node.
    pub g_cost: Cost,
    /// The frontier key at time of pop.
    pub pop_key: FrontierKey,
    /// What happened.
    pub outcome: PopOutcomeV1,
}

/// Outcome of a pop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopOutcomeV1 {
    /// The vertex was already finalized with `finalized_g`; the node was dropped.
    StaleDiscarded { finalized_g: Cost },
    /// The vertex is the goal; search stops.
    GoalReached,
    /// The vertex was finalized and its unvisited neighbours pushed.
    Expanded {
        expansion_order: u64,
        children: Vec<NodeId>,
        skipped_visited: u64,
    },
}

/// Derived node summary for path reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummaryV1 {
    pub node_id: NodeId,
    pub parent_id: Option<NodeId>,
    pub vertex: VertexId,
    pub depth: u32,
    pub g_cost: Cost,
    pub f_cost: Cost,
    pub is_goal: bool,
    pub expansion_order: Option<u64>,
}

/// Aggregate metadata with input bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceMetadata {
    /// Digest of the searched graph (`None` when recording is off).
    pub graph_digest: Option<String>,
    pub start: VertexId,
    pub goal: VertexId,
    pub policy: SearchPolicy,
    pub termination_reason: TerminationReasonV1,
    pub stats: SearchStats,
}

/// Why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// The goal vertex was popped.
    GoalReached { node_id: NodeId },
    /// Frontier emptied without reaching the goal.
    FrontierExhausted,
    /// `max_expansions` was hit.
    ExpansionBudgetExceeded { max_expansions: u64 },
    /// Frontier emptied, but at least one child was dropped because its
    /// `g` or `f` did not fit in a `u64`. `from -> to` is the first such edge.
    CostOverflow { from: VertexId, to: VertexId },
    /// `pop_min` failed on a frontier that was just checked non-empty.
    FrontierInvariantViolation,
}

/// Collects pop events during a run; a no-op when disabled.
#[derive(Debug)]
pub(crate) struct TraceRecorder {
    enabled: bool,
    pops: Vec<PopEventV1>,
}

impl TraceRecorder {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            pops: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, pop_order: u64, node: &SearchNode, outcome: PopOutcomeV1) {
        if !self.enabled {
            return;
        }
        self.pops.push(PopEventV1 {
            pop_order,
            node_id: node.node_id,
            vertex: node.vertex,
            g_cost: node.g_cost,
            pop_key: FrontierKey::from(node),
            outcome,
        });
    }

    /// Close the log: derive node summaries and attach metadata.
    pub(crate) fn finish(self, nodes: &[SearchNode], metadata: TraceMetadata) -> SearchTraceV1 {
        if !self.enabled {
            return SearchTraceV1 {
                pops: self.pops,
                node_summaries: Vec::new(),
                metadata,
            };
        }

        // Node ids are arena indices, so a dense lookup table suffices.
        let mut expansion_orders: Vec<Option<u64>> = vec![None; nodes.len()];
        for pop in &self.pops {
            if let PopOutcomeV1::Expanded {
                expansion_order, ..
            } = pop.outcome
            {
                if let Some(slot) = usize::try_from(pop.node_id)
                    .ok()
                    .and_then(|i| expansion_orders.get_mut(i))
                {
                    *slot = Some(expansion_order);
                }
            }
        }

        let goal_node = match metadata.termination_reason {
            TerminationReasonV1::GoalReached { node_id } => Some(node_id),
            _ => None,
        };

        let mut node_summaries: Vec<NodeSummaryV1> = nodes
            .iter()
            .zip(expansion_orders)
            .map(|(n, expansion_order)| NodeSummaryV1 {
                node_id: n.node_id,
                parent_id: n.parent_id,
                vertex: n.vertex,
                depth: n.depth,
                g_cost: n.g_cost,
                f_cost: n.f_cost(),
                is_goal: goal_node == Some(n.node_id),
                expansion_order,
            })
            .collect();
        node_summaries.sort_by_key(|n| n.node_id);

        SearchTraceV1 {
            pops: self.pops,
            node_summaries,
            metadata,
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchTraceV1 {
    /// Serialize the trace to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content digest of the trace under [`HashDomain::SearchTrace`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchTrace, &bytes))
    }

    /// Convert to a `serde_json::Value` for canonical serialization.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "metadata": metadata_to_json(&self.metadata),
            "node_summaries": self.node_summaries.iter().map(node_summary_to_json).collect::<Vec<_>>(),
            "pops": self.pops.iter().map(pop_event_to_json).collect::<Vec<_>>(),
        })
    }
}

fn pop_event_to_json(e: &PopEventV1) -> serde_json::Value {
    serde_json::json!({
        "g_cost": e.g_cost,
        "node_id": e.node_id,
        "outcome": outcome_to_json(&e.outcome),
        "pop_key": {
            "creation_order": e.pop_key.creation_order,
            "f_cost": e.pop_key.f_cost,
        },
        "pop_order": e.pop_order,
        "vertex": e.vertex.raw(),
    })
}

fn outcome_to_json(o: &PopOutcomeV1) -> serde_json::Value {
    match o {
        PopOutcomeV1::StaleDiscarded { finalized_g } => {
            serde_json::json!({"finalized_g": finalized_g, "type": "stale_discarded"})
        }
        PopOutcomeV1::GoalReached => serde_json::json!({"type": "goal_reached"}),
        PopOutcomeV1::Expanded {
            expansion_order,
            children,
            skipped_visited,
        } => serde_json::json!({
            "children": children,
            "expansion_order": expansion_order,
            "skipped_visited": skipped_visited,
            "type": "expanded",
        }),
    }
}

fn node_summary_to_json(n: &NodeSummaryV1) -> serde_json::Value {
    serde_json::json!({
        "depth": n.depth,
        "expansion_order": n.expansion_order,
        "f_cost": n.f_cost,
        "g_cost": n.g_cost,
        "is_goal": n.is_goal,
        "node_id": n.node_id,
        "parent_id": n.parent_id,
        "vertex": n.vertex.raw(),
    })
}

fn metadata_to_json(m: &TraceMetadata) -> serde_json::Value {
    serde_json::json!({
        "goal": m.goal.raw(),
        "graph_digest": m.graph_digest,
        "policy": m.policy.to_json_value(),
        "start": m.start.raw(),
        "stats": stats_to_json(&m.stats),
        "termination_reason": termination_reason_to_json(&m.termination_reason),
    })
}

fn stats_to_json(s: &SearchStats) -> serde_json::Value {
    serde_json::json!({
        "expansions": s.expansions,
        "frontier_high_water": s.frontier_high_water,
        "nodes_created": s.nodes_created,
        "path_length": s.path_length,
        "pops": s.pops,
        "overflow_drops": s.overflow_drops,
        "stale_discards": s.stale_discards,
    })
}

pub(crate) fn termination_reason_to_json(r: &TerminationReasonV1) -> serde_json::Value {
    match r {
        TerminationReasonV1::GoalReached { node_id } => {
            serde_json::json!({"node_id": node_id, "type": "goal_reached"})
        }
        TerminationReasonV1::FrontierExhausted => serde_json::json!({"type": "frontier_exhausted"}),
        TerminationReasonV1::ExpansionBudgetExceeded { max_expansions } => {
            serde_json::json!({"max_expansions": max_expansions, "type": "expansion_budget_exceeded"})
        }
        TerminationReasonV1::CostOverflow { from, to } => {
            serde_json::json!({"from": from.raw(), "to": to.raw(), "type": "cost_overflow"})
        }
        TerminationReasonV1::FrontierInvariantViolation => {
            serde_json::json!({"type": "frontier_invariant_violation"})
        }
    }
}
