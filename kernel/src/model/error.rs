//! Typed graph construction errors.

use crate::model::vertex::{Cost, VertexId};

/// Typed failure for graph construction.
///
/// All of these are configuration errors: they are returned from the
/// constructors, so a malformed graph never reaches a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge cost was negative.
    InvalidEdgeCost {
        from: VertexId,
        to: VertexId,
        cost: i64,
    },
    /// A heuristic estimate was negative.
    InvalidHeuristic { vertex: VertexId, value: i64 },
    /// The heuristic table does not have one entry per vertex.
    HeuristicLengthMismatch { expected: usize, actual: usize },
    /// A dense matrix row does not have one column per vertex.
    MatrixNotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// An edge or lookup referenced a vertex outside `0..vertex_count`.
    VertexOutOfRange { vertex: VertexId, vertex_count: usize },
    /// The same directed edge was added twice.
    DuplicateEdge { from: VertexId, to: VertexId },
    /// The label list does not have one entry per vertex.
    LabelCountMismatch { expected: usize, actual: usize },
    /// Two vertices share a label.
    DuplicateLabel { label: String },
    /// The vertex count does not fit in a `u32` identifier.
    TooManyVertices { count: usize },
    /// Canonical serialization of the graph failed.
    Canonicalization { detail: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEdgeCost { from, to, cost } => {
                write!(f, "negative edge cost {cost} on {from} -> {to}")
            }
            Self::InvalidHeuristic { vertex, value } => {
                write!(f, "negative heuristic {value} for vertex {vertex}")
            }
            Self::HeuristicLengthMismatch { expected, actual } => {
                write!(f, "heuristic table has {actual} entries, expected {expected}")
            }
            Self::MatrixNotSquare {
                row,
                expected,
                actual,
            } => write!(f, "matrix row {row} has {actual} columns, expected {expected}"),
            Self::VertexOutOfRange {
                vertex,
                vertex_count,
            } => write!(f, "vertex {vertex} out of range (vertex_count={vertex_count})"),
            Self::DuplicateEdge { from, to } => write!(f, "duplicate edge {from} -> {to}"),
            Self::LabelCountMismatch { expected, actual } => {
                write!(f, "{actual} labels supplied, expected {expected}")
            }
            Self::DuplicateLabel { label } => write!(f, "duplicate vertex label: {label}"),
            Self::TooManyVertices { count } => {
                write!(f, "vertex count {count} exceeds u32 identifier space")
            }
            Self::Canonicalization { detail } => {
                write!(f, "graph canonicalization failed: {detail}")
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// An edge on which the heuristic breaks the triangle inequality:
/// `h(from) > cost + h(to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsistencyViolation {
    pub from: VertexId,
    pub to: VertexId,
    pub cost: Cost,
    pub h_from: Cost,
    pub h_to: Cost,
}

impl std::fmt::Display for ConsistencyViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "inconsistent heuristic on {} -> {}: h={} > {} + {}",
            self.from, self.to, self.h_from, self.cost, self.h_to
        )
    }
}

impl std::error::Error for ConsistencyViolation {}
