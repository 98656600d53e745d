//! Sparse, incremental graph construction.

use std::collections::BTreeMap;

use crate::model::error::GraphError;
use crate::model::graph::{edge_cost, heuristic_value, vertex_ids, Graph};
use crate::model::vertex::{Cost, VertexId};

/// Accumulates edges, heuristic values and labels, then validates them all
/// in [`GraphBuilder::build`].
///
/// Errors are deferred to `build` so construction reads as a flat list of
/// calls; the first problem found is reported.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    vertex_count: usize,
    edges: BTreeMap<(VertexId, VertexId), i64>,
    heuristic: Vec<i64>,
    labels: Option<Vec<String>>,
    deferred: Option<GraphError>,
}

impl GraphBuilder {
    /// Start a graph with `vertex_count` vertices, no edges and a zero heuristic.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: BTreeMap::new(),
            heuristic: vec![0; vertex_count],
            labels: None,
            deferred: None,
        }
    }

    /// Add the directed edge `from -> to`.
    #[must_use]
    pub fn edge(mut self, from: u32, to: u32, cost: i64) -> Self {
        self.add_edge(VertexId::new(from), VertexId::new(to), cost);
        self
    }

    /// Add the directed edge `from -> to` in place.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, cost: i64) {
        if self.deferred.is_some() {
            return;
        }
        for v in [from, to] {
            if v.index() >= self.vertex_count {
                self.deferred = Some(GraphError::VertexOutOfRange {
                    vertex: v,
                    vertex_count: self.vertex_count,
                });
                return;
            }
        }
        if self.edges.insert((from, to), cost).is_some() {
            self.deferred = Some(GraphError::DuplicateEdge { from, to });
        }
    }

    /// Replace the whole heuristic table.
    #[must_use]
    pub fn heuristic(mut self, values: &[i64]) -> Self {
        if self.deferred.is_none() && values.len() != self.vertex_count {
            self.deferred = Some(GraphError::HeuristicLengthMismatch {
                expected: self.vertex_count,
                actual: values.len(),
            });
        }
        self.heuristic = values.to_vec();
        self
    }

    /// Attach labels, one per vertex.
    #[must_use]
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Validate and freeze.
    ///
    /// # Errors
    ///
    /// The first deferred [`GraphError`] (out-of-range endpoint, duplicate
    /// edge, heuristic length), then negative costs or estimates, then label
    /// problems.
    pub fn build(self) -> Result<Graph, GraphError> {
        if let Some(err) = self.deferred {
            return Err(err);
        }
        let ids = vertex_ids(self.vertex_count)?;

        let mut adjacency: Vec<Vec<(VertexId, Cost)>> = vec![Vec::new(); self.vertex_count];
        for (&(from, to), &raw) in &self.edges {
            adjacency[from.index()].push((to, edge_cost(from, to, raw)?));
        }

        let heuristic = ids
            .iter()
            .zip(&self.heuristic)
            .map(|(&v, &raw)| heuristic_value(v, raw))
            .collect::<Result<Vec<_>, _>>()?;

        let graph = Graph::assemble(adjacency, heuristic);
        match self.labels {
            Some(labels) => graph.with_labels(labels),
            None => Ok(graph),
        }
    }
}
