//! Graph model: an immutable weighted directed graph plus a heuristic table.
//!
//! A [`Graph`] is fully defined at construction and never mutated after.
//! Every input anomaly (negative cost, negative heuristic, ragged matrix,
//! duplicate edge, bad labels) is rejected as a [`GraphError`] before any
//! search can run against it.

pub mod builder;
pub mod error;
pub mod graph;
pub mod vertex;

pub use builder::GraphBuilder;
pub use error::{ConsistencyViolation, GraphError};
pub use graph::Graph;
pub use vertex::{Cost, VertexId};
