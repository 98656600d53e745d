//! Multi-goal orchestration: one independent search per goal, cheapest wins.
//!
//! Every goal is validated before the first search runs, so a bad goal list
//! never produces partial output. Goals do not share search state; the
//! parallel variant relies on that and on `Graph: Sync`.

use rayon::prelude::*;
use waypoint_kernel::model::{Cost, Graph, VertexId};
use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::error::SearchError;
use crate::policy::SearchPolicy;
use crate::search::{check_vertex, search_with_policy, SearchResult, SearchStats};

/// The winning goal and its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalRoute {
    pub goal: VertexId,
    pub total_cost: Cost,
    pub path: Vec<VertexId>,
}

/// Outcome of the search towards one goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalAttempt {
    pub goal: VertexId,
    pub result: SearchResult,
    pub stats: SearchStats,
}

/// Vertices whose heuristic is zero: the natural goal set of a graph.
#[must_use]
pub fn default_goals(graph: &Graph) -> Vec<VertexId> {
    graph.zero_heuristic_vertices()
}

/// Search each goal in order and keep the cheapest.
///
/// A later goal replaces the current best only when strictly cheaper, so
/// ties go to the goal listed first. Returns `Ok(None)` when no goal is
/// reachable (including an empty goal list).
///
/// # Errors
///
/// Pre-flight errors for `start` or any goal, reported before any search.
pub fn find_cheapest_goal(
    graph: &Graph,
    start: VertexId,
    goals: &[VertexId],
) -> Result<Option<GoalRoute>, SearchError> {
    let attempts = survey_goals(graph, start, goals)?;
    Ok(select_cheapest(start, attempts))
}

/// [`find_cheapest_goal`] with the per-goal searches run on the rayon pool.
///
/// Results are collected in input order before the reduction, so the answer
/// is identical to the sequential one, ties included.
///
/// # Errors
///
/// Same as [`find_cheapest_goal`].
pub fn find_cheapest_goal_parallel(
    graph: &Graph,
    start: VertexId,
    goals: &[VertexId],
) -> Result<Option<GoalRoute>, SearchError> {
    preflight(graph, start, goals)?;

    let attempts = goals
        .par_iter()
        .map(|&goal| attempt(graph, start, goal))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(select_cheapest(start, attempts))
}

/// Run every goal and return the per-goal outcomes in input order.
///
/// # Errors
///
/// Same as [`find_cheapest_goal`].
pub fn survey_goals(
    graph: &Graph,
    start: VertexId,
    goals: &[VertexId],
) -> Result<Vec<GoalAttempt>, SearchError> {
    preflight(graph, start, goals)?;
    goals
        .iter()
        .map(|&goal| attempt(graph, start, goal))
        .collect()
}

/// Content digest of a goal survey under [`HashDomain::GoalSurvey`].
///
/// Covers the start, each goal's verdict, and each goal's stats.
///
/// # Errors
///
/// Returns [`CanonError`] if serialization fails.
pub fn survey_digest(start: VertexId, attempts: &[GoalAttempt]) -> Result<ContentHash, CanonError> {
    let value = serde_json::json!({
        "attempts": attempts.iter().map(attempt_to_json).collect::<Vec<_>>(),
        "start": start.raw(),
    });
    let bytes = canonical_json_bytes(&value)?;
    Ok(canonical_hash(HashDomain::GoalSurvey, &bytes))
}

fn preflight(graph: &Graph, start: VertexId, goals: &[VertexId]) -> Result<(), SearchError> {
    check_vertex(graph, start)?;
    for &goal in goals {
        check_vertex(graph, goal)?;
        let heuristic = graph.heuristic(goal);
        if heuristic != 0 {
            return Err(SearchError::GoalHeuristicNonZero { goal, heuristic });
        }
    }
    Ok(())
}

fn attempt(graph: &Graph, start: VertexId, goal: VertexId) -> Result<GoalAttempt, SearchError> {
    let run = search_with_policy(graph, start, goal, &SearchPolicy::untraced())?;
    let stats = run.stats;
    let result = run.into_result()?;

    match &result {
        SearchResult::Found { total_cost, .. } => tracing::debug!(
            goal = %goal,
            total_cost,
            pops = stats.pops,
            "goal reached"
        ),
        SearchResult::Unreachable => tracing::debug!(
            goal = %goal,
            pops = stats.pops,
            "goal unreachable"
        ),
    }

    Ok(GoalAttempt {
        goal,
        result,
        stats,
    })
}

fn select_cheapest(start: VertexId, attempts: Vec<GoalAttempt>) -> Option<GoalRoute> {
    let mut best: Option<GoalRoute> = None;
    for attempt in attempts {
        let SearchResult::Found { total_cost, path } = attempt.result else {
            continue;
        };
        if let Some(current) = &best {
            if total_cost >= current.total_cost {
                continue;
            }
        }
        best = Some(GoalRoute {
            goal: attempt.goal,
            total_cost,
            path,
        });
    }

    match &best {
        Some(route) => tracing::info!(
            start = %start,
            goal = %route.goal,
            total_cost = route.total_cost,
            "cheapest goal selected"
        ),
        None => tracing::info!(start = %start, "no goal reachable"),
    }
    best
}

fn attempt_to_json(a: &GoalAttempt) -> serde_json::Value {
    let result = match &a.result {
        SearchResult::Found { total_cost, path } => serde_json::json!({
            "path": path.iter().map(|v| v.raw()).collect::<Vec<_>>(),
            "total_cost": total_cost,
            "type": "found",
        }),
        SearchResult::Unreachable => serde_json::json!({"type": "unreachable"}),
    };
    serde_json::json!({
        "expansions": a.stats.expansions,
        "goal": a.goal.raw(),
        "pops": a.stats.pops,
        "result": result,
    })
}
