//! Shared helpers for waypoint benchmark suites.

use waypoint_kernel::model::{Graph, GraphBuilder, VertexId};

/// A `side x side` 4-connected grid with Manhattan-distance heuristic towards
/// the bottom-right corner.
///
/// Edge costs vary deterministically between 1 and 4 so that the search has
/// real choices to make; the heuristic stays consistent because every step
/// costs at least 1 and changes Manhattan distance by exactly 1.
///
/// # Panics
///
/// Panics if `side` is zero or the grid does not fit in `u32` vertex ids.
#[must_use]
pub fn grid_graph(side: u32) -> Graph {
    assert!(side > 0, "grid side must be positive");
    let n = side * side;
    let id = |x: u32, y: u32| y * side + x;

    let mut builder = GraphBuilder::new(n as usize);
    for y in 0..side {
        for x in 0..side {
            let from = id(x, y);
            let mut link = |to: u32| {
                let cost = 1 + i64::from((from * 7 + to * 13) % 4);
                builder.add_edge(VertexId::new(from), VertexId::new(to), cost);
            };
            if x + 1 < side {
                link(id(x + 1, y));
            }
            if x > 0 {
                link(id(x - 1, y));
            }
            if y + 1 < side {
                link(id(x, y + 1));
            }
            if y > 0 {
                link(id(x, y - 1));
            }
        }
    }

    let heuristic: Vec<i64> = (0..n)
        .map(|v| i64::from((side - 1 - v % side) + (side - 1 - v / side)))
        .collect();
    builder
        .heuristic(&heuristic)
        .build()
        .expect("grid graph is valid")
}

/// Top-left corner of [`grid_graph`].
#[must_use]
pub fn grid_start() -> VertexId {
    VertexId::new(0)
}

/// Bottom-right corner of [`grid_graph`], the only zero-heuristic vertex.
#[must_use]
pub fn grid_goal(side: u32) -> VertexId {
    VertexId::new(side * side - 1)
}

/// Same grid with an all-zero heuristic (uniform-cost search baseline).
///
/// # Panics
///
/// Panics if `side` is zero.
#[must_use]
pub fn flat_grid_graph(side: u32) -> Graph {
    let grid = grid_graph(side);
    Graph::from_lookups(
        grid.vertex_count(),
        |u, v| grid.cost(u, v).and_then(|c| i64::try_from(c).ok()),
        |_| 0,
    )
    .expect("flat grid is valid")
}

/// Grid for the orchestration benches: every vertex on the bottom row is a
/// goal, and the heuristic counts rows left to descend.
///
/// # Panics
///
/// Panics if `side` is zero.
#[must_use]
pub fn bottom_row_goals_graph(side: u32) -> (Graph, Vec<VertexId>) {
    let grid = grid_graph(side);
    let goals: Vec<VertexId> = (0..side).map(|x| VertexId::new((side - 1) * side + x)).collect();
    let graph = Graph::from_lookups(
        grid.vertex_count(),
        |u, v| grid.cost(u, v).and_then(|c| i64::try_from(c).ok()),
        |v| i64::from(side - 1 - v.raw() / side),
    )
    .expect("goal grid is valid");
    (graph, goals)
}
