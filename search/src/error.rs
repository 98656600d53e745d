//! Typed search errors.
//!
//! `SearchError` covers pre-flight failures (bad vertex, bad goal, bad
//! policy) and the three ways a run can stop without an answer. `Unreachable`
//! is not here: it is an ordinary [`crate::search::SearchResult`].

use waypoint_kernel::model::{Cost, VertexId};

/// Typed failure for a search or orchestration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// `start` or a goal is not a vertex of the graph.
    VertexOutOfRange { vertex: VertexId, vertex_count: usize },
    /// A designated goal has a non-zero heuristic estimate.
    GoalHeuristicNonZero { goal: VertexId, heuristic: Cost },
    /// The policy failed validation.
    InvalidPolicy { detail: String },
    /// The run hit `max_expansions` before reaching a verdict.
    ExpansionBudgetExceeded { max_expansions: u64 },
    /// The goal is only reachable along paths whose cost does not fit in
    /// [`Cost`]. `from -> to` is the first edge that overflowed.
    CostOverflow { from: VertexId, to: VertexId },
    /// The frontier reported empty right after a non-empty check.
    FrontierInvariantViolation,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VertexOutOfRange {
                vertex,
                vertex_count,
            } => write!(f, "vertex {vertex} out of range (vertex_count={vertex_count})"),
            Self::GoalHeuristicNonZero { goal, heuristic } => {
                write!(f, "goal {goal} has heuristic {heuristic}, expected 0")
            }
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::ExpansionBudgetExceeded { max_expansions } => {
                write!(f, "expansion budget of {max_expansions} exhausted")
            }
            Self::CostOverflow { from, to } => {
                write!(f, "path cost overflows u64 on edge {from} -> {to}")
            }
            Self::FrontierInvariantViolation => {
                write!(f, "frontier invariant violated: pop from non-empty frontier failed")
            }
        }
    }
}

impl std::error::Error for SearchError {}
