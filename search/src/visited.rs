//! Visited set: vertices whose cost-from-start has been finalized.

use waypoint_kernel::model::{Cost, VertexId};

/// Dense `VertexId -> finalized g` map, plus the finalization order.
///
/// Marking is one-way: once a vertex is finalized it stays finalized and its
/// `g` never changes for the rest of the run.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    finalized: Vec<Option<Cost>>,
    order: Vec<VertexId>,
}

impl VisitedSet {
    /// An empty set sized for `vertex_count` vertices.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            finalized: vec![None; vertex_count],
            order: Vec::new(),
        }
    }

    /// Whether `v` has been finalized.
    #[must_use]
    pub fn contains(&self, v: VertexId) -> bool {
        self.g_cost(v).is_some()
    }

    /// The finalized `g` of `v`, if any.
    #[must_use]
    pub fn g_cost(&self, v: VertexId) -> Option<Cost> {
        self.finalized.get(v.index()).copied().flatten()
    }

    /// Finalize `v` with `g_cost`.
    ///
    /// Returns `false` (and changes nothing) if `v` was already finalized or
    /// lies outside the set.
    pub fn mark(&mut self, v: VertexId, g_cost: Cost) -> bool {
        let Some(slot) = self.finalized.get_mut(v.index()) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(g_cost);
        self.order.push(v);
        true
    }

    /// Number of finalized vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been finalized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Finalized vertices in the order they were finalized.
    #[must_use]
    pub fn order(&self) -> &[VertexId] {
        &self.order
    }

    /// `(vertex, g)` pairs in finalization order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Cost)> + '_ {
        self.order
            .iter()
            .filter_map(|&v| self.g_cost(v).map(|g| (v, g)))
    }
}
