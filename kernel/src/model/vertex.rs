//! Vertex identifiers and cost units.

use std::fmt;

/// Non-negative path or edge cost.
pub type Cost = u64;

/// Dense vertex identifier: an index in `0..graph.vertex_count()`.
///
/// Ordering is by index, which is also the deterministic neighbour order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(u32);

impl VertexId {
    /// Construct from a raw index.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Construct from a `usize` index, or `None` if it does not fit in `u32`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    /// The raw `u32` value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The index as `usize`, for slice access.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VertexId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}
