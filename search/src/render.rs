//! Human-readable rendering of paths and goal surveys.

use std::fmt::Write;

use waypoint_kernel::model::{Graph, VertexId};

use crate::goals::{GoalAttempt, GoalRoute};
use crate::search::SearchResult;

/// Labels along `path`, joined by `" -> "`.
///
/// # Panics
///
/// Panics if a vertex in `path` is not in `graph`.
#[must_use]
pub fn render_path(graph: &Graph, path: &[VertexId]) -> String {
    path.iter()
        .map(|&v| graph.label(v))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Multi-line report of a goal survey and the selected route.
///
/// One block per attempt, in attempt order, then a summary line.
///
/// # Panics
///
/// Panics if `start` or any vertex in `attempts` is not in `graph`.
#[must_use]
pub fn render_report(
    graph: &Graph,
    start: VertexId,
    attempts: &[GoalAttempt],
    best: Option<&GoalRoute>,
) -> String {
    let from = graph.label(start);
    let mut out = String::new();

    for attempt in attempts {
        let to = graph.label(attempt.goal);
        let _ = writeln!(out, "Searching from {from} to {to}");
        match &attempt.result {
            SearchResult::Found { total_cost, path } => {
                let _ = writeln!(out, "Reached goal: {to}");
                let _ = writeln!(out, "Total cost: {total_cost}");
                let _ = writeln!(out, "Pops: {}", attempt.stats.pops);
                let _ = writeln!(out, "Path: {}", render_path(graph, path));
            }
            SearchResult::Unreachable => {
                let _ = writeln!(out, "Unreachable: {to}");
                let _ = writeln!(out, "Pops: {}", attempt.stats.pops);
            }
        }
        out.push('\n');
    }

    match best {
        Some(route) => {
            let _ = writeln!(
                out,
                "The cheapest path is to {} with total cost: {}",
                graph.label(route.goal),
                route.total_cost
            );
        }
        None => {
            let _ = writeln!(out, "No goal is reachable from {from}");
        }
    }
    out
}
