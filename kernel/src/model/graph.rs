//! The immutable graph: sparse adjacency, heuristic table, labels.

use std::collections::BTreeSet;

use crate::model::error::{ConsistencyViolation, GraphError};
use crate::model::vertex::{Cost, VertexId};
use crate::proof::canon::canonical_json_bytes;
use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Weighted directed graph with one heuristic estimate per vertex.
///
/// Adjacency lists are sorted by destination index, so [`Graph::neighbors`]
/// has a fixed order for a fixed graph. That order is what makes frontier
/// tie-breaking reproducible.
///
/// `Graph` has no interior mutability and is `Send + Sync`; any number of
/// searches may borrow it at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<(VertexId, Cost)>>,
    heuristic: Vec<Cost>,
    labels: Vec<String>,
    edge_count: usize,
}

impl Graph {
    /// Build a graph from a vertex count, an edge-cost lookup and a heuristic
    /// lookup.
    ///
    /// `cost(u, v)` returns `Some(c)` if the edge `u -> v` exists. A zero cost
    /// is a legal zero-weight edge here; only the dense matrix constructors
    /// treat 0 as "no edge". Labels default to the decimal vertex index.
    ///
    /// # Errors
    ///
    /// - [`GraphError::TooManyVertices`] if `vertex_count` exceeds `u32`.
    /// - [`GraphError::InvalidEdgeCost`] for any negative edge cost.
    /// - [`GraphError::InvalidHeuristic`] for any negative estimate.
    pub fn from_lookups<C, H>(
        vertex_count: usize,
        mut cost: C,
        mut heuristic: H,
    ) -> Result<Self, GraphError>
    where
        C: FnMut(VertexId, VertexId) -> Option<i64>,
        H: FnMut(VertexId) -> i64,
    {
        let ids = vertex_ids(vertex_count)?;

        let mut adjacency = Vec::with_capacity(vertex_count);
        for &from in &ids {
            let mut row = Vec::new();
            for &to in &ids {
                if let Some(raw) = cost(from, to) {
                    row.push((to, edge_cost(from, to, raw)?));
                }
            }
            adjacency.push(row);
        }

        let estimates = ids
            .iter()
            .map(|&v| heuristic_value(v, heuristic(v)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::assemble(adjacency, estimates))
    }

    /// Build from a dense source-major matrix: `rows[u][v]` is the cost of
    /// `u -> v`, and 0 means "no edge".
    ///
    /// # Errors
    ///
    /// [`GraphError::MatrixNotSquare`], [`GraphError::HeuristicLengthMismatch`],
    /// plus everything [`Graph::from_lookups`] rejects.
    pub fn from_adjacency_matrix<R: AsRef<[i64]>>(
        rows: &[R],
        heuristic: &[i64],
    ) -> Result<Self, GraphError> {
        check_dense_shape(rows, heuristic)?;
        Self::from_lookups(
            rows.len(),
            |u, v| nonzero(rows[u.index()].as_ref()[v.index()]),
            |v| heuristic[v.index()],
        )
    }

    /// Build from a dense target-major matrix: `rows[v][u]` is the cost of
    /// `u -> v` (each row lists a vertex's incoming edges), and 0 means
    /// "no edge".
    ///
    /// # Errors
    ///
    /// Same as [`Graph::from_adjacency_matrix`].
    pub fn from_incoming_matrix<R: AsRef<[i64]>>(
        rows: &[R],
        heuristic: &[i64],
    ) -> Result<Self, GraphError> {
        check_dense_shape(rows, heuristic)?;
        Self::from_lookups(
            rows.len(),
            |u, v| nonzero(rows[v.index()].as_ref()[u.index()]),
            |v| heuristic[v.index()],
        )
    }

    /// Internal constructor for already-validated parts (used by the builder).
    pub(crate) fn assemble(mut adjacency: Vec<Vec<(VertexId, Cost)>>, heuristic: Vec<Cost>) -> Self {
        for row in &mut adjacency {
            row.sort_by_key(|&(to, _)| to);
        }
        let edge_count = adjacency.iter().map(Vec::len).sum();
        let labels = (0..heuristic.len()).map(|i| i.to_string()).collect();
        Self {
            adjacency,
            heuristic,
            labels,
            edge_count,
        }
    }

    /// Attach human-readable labels, one per vertex, in index order.
    ///
    /// # Errors
    ///
    /// [`GraphError::LabelCountMismatch`] if the count differs from the
    /// vertex count; [`GraphError::DuplicateLabel`] if two labels collide.
    pub fn with_labels<I, S>(mut self, labels: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.vertex_count() {
            return Err(GraphError::LabelCountMismatch {
                expected: self.vertex_count(),
                actual: labels.len(),
            });
        }
        let mut seen = BTreeSet::new();
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(GraphError::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }
        self.labels = labels;
        Ok(self)
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.heuristic.len()
    }

    /// Number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether `v` is a vertex of this graph.
    #[must_use]
    pub fn contains(&self, v: VertexId) -> bool {
        v.index() < self.vertex_count()
    }

    /// All vertices in index order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.heuristic.len()).filter_map(VertexId::from_index)
    }

    /// Outgoing `(neighbor, cost)` pairs of `v`, ascending by neighbor index.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not a vertex of this graph.
    #[must_use]
    pub fn neighbors(&self, v: VertexId) -> &[(VertexId, Cost)] {
        &self.adjacency[v.index()]
    }

    /// Cost of the edge `from -> to`, if present.
    #[must_use]
    pub fn cost(&self, from: VertexId, to: VertexId) -> Option<Cost> {
        let row = self.adjacency.get(from.index())?;
        row.binary_search_by_key(&to, |&(dest, _)| dest)
            .ok()
            .map(|i| row[i].1)
    }

    /// Heuristic estimate `h(v)`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not a vertex of this graph.
    #[must_use]
    pub fn heuristic(&self, v: VertexId) -> Cost {
        self.heuristic[v.index()]
    }

    /// Label of `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not a vertex of this graph.
    #[must_use]
    pub fn label(&self, v: VertexId) -> &str {
        &self.labels[v.index()]
    }

    /// Find a vertex by its label.
    #[must_use]
    pub fn vertex_by_label(&self, label: &str) -> Option<VertexId> {
        self.labels
            .iter()
            .position(|l| l == label)
            .and_then(VertexId::from_index)
    }

    /// Vertices whose heuristic is exactly 0, ascending.
    ///
    /// Under an admissible heuristic these are the only vertices that can be
    /// goals, so this is the default goal set.
    #[must_use]
    pub fn zero_heuristic_vertices(&self) -> Vec<VertexId> {
        self.vertices().filter(|&v| self.heuristic(v) == 0).collect()
    }

    /// Check the triangle inequality `h(u) <= cost(u, v) + h(v)` on every edge.
    ///
    /// # Errors
    ///
    /// Returns the first violating edge in (source, destination) order.
    pub fn is_consistent(&self) -> Result<(), ConsistencyViolation> {
        for from in self.vertices() {
            let h_from = self.heuristic(from);
            for &(to, cost) in self.neighbors(from) {
                let h_to = self.heuristic(to);
                if h_from > cost.saturating_add(h_to) {
                    return Err(ConsistencyViolation {
                        from,
                        to,
                        cost,
                        h_from,
                        h_to,
                    });
                }
            }
        }
        Ok(())
    }

    /// Canonical JSON value: labels, heuristic table and the sorted edge list.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let edges: Vec<serde_json::Value> = self
            .vertices()
            .flat_map(|from| {
                self.neighbors(from)
                    .iter()
                    .map(move |&(to, cost)| serde_json::json!([from.raw(), to.raw(), cost]))
            })
            .collect();
        serde_json::json!({
            "edges": edges,
            "heuristic": self.heuristic,
            "labels": self.labels,
            "vertex_count": self.vertex_count(),
        })
    }

    /// Content digest of the graph under [`HashDomain::GraphModel`].
    ///
    /// # Errors
    ///
    /// [`GraphError::Canonicalization`] if canonical serialization fails.
    pub fn digest(&self) -> Result<ContentHash, GraphError> {
        let bytes = canonical_json_bytes(&self.to_json_value()).map_err(|e| {
            GraphError::Canonicalization {
                detail: e.to_string(),
            }
        })?;
        Ok(canonical_hash(HashDomain::GraphModel, &bytes))
    }
}

pub(crate) fn vertex_ids(vertex_count: usize) -> Result<Vec<VertexId>, GraphError> {
    if u32::try_from(vertex_count).is_err() {
        return Err(GraphError::TooManyVertices {
            count: vertex_count,
        });
    }
    Ok((0..vertex_count).filter_map(VertexId::from_index).collect())
}

pub(crate) fn edge_cost(from: VertexId, to: VertexId, raw: i64) -> Result<Cost, GraphError> {
    Cost::try_from(raw).map_err(|_| GraphError::InvalidEdgeCost {
        from,
        to,
        cost: raw,
    })
}

pub(crate) fn heuristic_value(vertex: VertexId, raw: i64) -> Result<Cost, GraphError> {
    Cost::try_from(raw).map_err(|_| GraphError::InvalidHeuristic { vertex, value: raw })
}

fn nonzero(raw: i64) -> Option<i64> {
    (raw != 0).then_some(raw)
}

fn check_dense_shape<R: AsRef<[i64]>>(rows: &[R], heuristic: &[i64]) -> Result<(), GraphError> {
    let n = rows.len();
    for (row, cols) in rows.iter().enumerate() {
        let actual = cols.as_ref().len();
        if actual != n {
            return Err(GraphError::MatrixNotSquare {
                row,
                expected: n,
                actual,
            });
        }
    }
    if heuristic.len() != n {
        return Err(GraphError::HeuristicLengthMismatch {
            expected: n,
            actual: heuristic.len(),
        });
    }
    Ok(())
}
