//! Search entry point and expansion loop.
//!
//! Best-first search over a [`Graph`] ordered by `f = g + h`, with lazy
//! deletion: a vertex may sit in the frontier several times, and every pop
//! of an already-finalized vertex is discarded as stale.
//!
//! # Known limitation
//!
//! A finalized vertex is never reopened. With a consistent heuristic the
//! first pop of a vertex carries its true shortest cost, so nothing is lost.
//! With a heuristic that is admissible but not consistent, a cheaper path to
//! an already-finalized vertex can be discovered later and is ignored, so the
//! reported cost may exceed the optimum. Use [`Graph::is_consistent`] to
//! check a heuristic before relying on optimality.
//!
//! # Cost overflow
//!
//! A child whose `g` or `f` does not fit in a [`Cost`] is dropped instead of
//! pushed. Any path through it costs more than `Cost::MAX`, so a goal found
//! afterwards is still the cheapest representable one. If the frontier then
//! empties, the run ends with [`TerminationReasonV1::CostOverflow`] rather
//! than reporting the goal unreachable.

use waypoint_kernel::model::{Cost, Graph, GraphError, VertexId};
use waypoint_kernel::proof::hash::ContentHash;

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::node::{NodeId, SearchNode};
use crate::policy::SearchPolicy;
use crate::trace::{PopOutcomeV1, SearchTraceV1, TerminationReasonV1, TraceMetadata, TraceRecorder};
use crate::visited::VisitedSet;

/// Outcome of a search: a cheapest path, or proof that none exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// The goal was reached. `path` runs from start to goal inclusive.
    Found { total_cost: Cost, path: Vec<VertexId> },
    /// The frontier emptied without reaching the goal.
    Unreachable,
}

impl SearchResult {
    /// Returns `true` for [`SearchResult::Found`].
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Total path cost, if found.
    #[must_use]
    pub fn total_cost(&self) -> Option<Cost> {
        match self {
            Self::Found { total_cost, .. } => Some(*total_cost),
            Self::Unreachable => None,
        }
    }

    /// The path, if found.
    #[must_use]
    pub fn path(&self) -> Option<&[VertexId]> {
        match self {
            Self::Found { path, .. } => Some(path),
            Self::Unreachable => None,
        }
    }
}

/// Observational counters for one run. Not part of the correctness contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Frontier pops, stale ones included.
    pub pops: u64,
    /// Pops that finalized a vertex and pushed its neighbours.
    pub expansions: u64,
    /// Pops discarded because the vertex was already finalized.
    pub stale_discards: u64,
    /// Nodes created (root included).
    pub nodes_created: u64,
    /// Children dropped because their `g` or `f` overflowed.
    pub overflow_drops: u64,
    /// Largest frontier size seen.
    pub frontier_high_water: u64,
    /// Edges on the found path.
    pub path_length: Option<usize>,
}

/// Everything a run produced.
///
/// Check [`SearchRun::result`] for the verdict; the rest is evidence.
#[derive(Debug, Clone)]
pub struct SearchRun {
    pub start: VertexId,
    pub goal: VertexId,
    /// Why the loop stopped.
    pub termination: TerminationReasonV1,
    /// Node arena, indexed by `node_id`.
    pub nodes: Vec<SearchNode>,
    /// Vertices finalized before termination, with their `g`.
    pub visited: VisitedSet,
    pub stats: SearchStats,
    /// Pop-by-pop audit log.
    pub trace: SearchTraceV1,
}

impl SearchRun {
    /// The node that reached the goal, if any.
    #[must_use]
    pub fn goal_node(&self) -> Option<&SearchNode> {
        match self.termination {
            TerminationReasonV1::GoalReached { node_id } => node_at(&self.nodes, node_id),
            _ => None,
        }
    }

    /// The verdict, or `None` if the run stopped without one.
    #[must_use]
    pub fn result(&self) -> Option<SearchResult> {
        match self.termination {
            TerminationReasonV1::GoalReached { node_id } => {
                let node = node_at(&self.nodes, node_id)?;
                Some(SearchResult::Found {
                    total_cost: node.g_cost,
                    path: reconstruct_path(&self.nodes, node_id),
                })
            }
            TerminationReasonV1::FrontierExhausted => Some(SearchResult::Unreachable),
            TerminationReasonV1::ExpansionBudgetExceeded { .. }
            | TerminationReasonV1::CostOverflow { .. }
            | TerminationReasonV1::FrontierInvariantViolation => None,
        }
    }

    /// The verdict, with early stops mapped to errors.
    ///
    /// # Errors
    ///
    /// [`SearchError::ExpansionBudgetExceeded`],
    /// [`SearchError::CostOverflow`] or
    /// [`SearchError::FrontierInvariantViolation`].
    pub fn into_result(self) -> Result<SearchResult, SearchError> {
        match self.termination {
            TerminationReasonV1::ExpansionBudgetExceeded { max_expansions } => {
                Err(SearchError::ExpansionBudgetExceeded { max_expansions })
            }
            TerminationReasonV1::CostOverflow { from, to } => {
                Err(SearchError::CostOverflow { from, to })
            }
            TerminationReasonV1::FrontierInvariantViolation => {
                Err(SearchError::FrontierInvariantViolation)
            }
            _ => self
                .result()
                .ok_or(SearchError::FrontierInvariantViolation),
        }
    }
}

/// Find a minimum-cost path from `start` to `goal`.
///
/// Unbounded, no trace. See [`search_with_policy`] for the full run record.
///
/// # Errors
///
/// Pre-flight only: [`SearchError::VertexOutOfRange`] and
/// [`SearchError::GoalHeuristicNonZero`]. An unreachable goal is
/// `Ok(SearchResult::Unreachable)`.
pub fn search(graph: &Graph, start: VertexId, goal: VertexId) -> Result<SearchResult, SearchError> {
    search_with_policy(graph, start, goal, &SearchPolicy::untraced())?.into_result()
}

/// Run best-first search under `policy` and return the whole run.
///
/// Early stops (expansion budget) still return `Ok(SearchRun)` with the
/// evidence intact; inspect `termination`.
///
/// # Errors
///
/// Pre-flight only: [`SearchError::InvalidPolicy`],
/// [`SearchError::VertexOutOfRange`], [`SearchError::GoalHeuristicNonZero`].
pub fn search_with_policy(
    graph: &Graph,
    start: VertexId,
    goal: VertexId,
    policy: &SearchPolicy,
) -> Result<SearchRun, SearchError> {
    policy.validate()?;
    check_vertex(graph, start)?;
    check_vertex(graph, goal)?;
    let h_goal = graph.heuristic(goal);
    if h_goal != 0 {
        return Err(SearchError::GoalHeuristicNonZero {
            goal,
            heuristic: h_goal,
        });
    }

    let mut frontier = Frontier::new();
    let mut visited = VisitedSet::new(graph.vertex_count());
    let mut nodes: Vec<SearchNode> = Vec::new();
    let mut recorder = TraceRecorder::new(policy.record_trace);
    let mut stats = SearchStats::default();

    let root = SearchNode::root(start, graph.heuristic(start));
    nodes.push(root);
    frontier.push(root);

    let mut first_overflow: Option<(VertexId, VertexId)> = None;

    let termination = loop {
        if frontier.is_empty() {
            break match first_overflow {
                Some((from, to)) => TerminationReasonV1::CostOverflow { from, to },
                None => TerminationReasonV1::FrontierExhausted,
            };
        }

        // Only a pop that would expand is refused: stale discards and the
        // goal pop still go through once the cap is reached.
        if let Some(max_expansions) = policy.max_expansions {
            let next_expands = frontier
                .peek()
                .is_some_and(|n| n.vertex != goal && !visited.contains(n.vertex));
            if stats.expansions >= max_expansions && next_expands {
                break TerminationReasonV1::ExpansionBudgetExceeded { max_expansions };
            }
        }

        // Frontier was checked non-empty above.
        let Ok(current) = frontier.pop_min() else {
            break TerminationReasonV1::FrontierInvariantViolation;
        };
        let pop_order = stats.pops;
        stats.pops += 1;

        if let Some(finalized_g) = visited.g_cost(current.vertex) {
            tracing::trace!(
                vertex = %current.vertex,
                g = current.g_cost,
                finalized_g,
                "discarding stale frontier entry"
            );
            stats.stale_discards += 1;
            recorder.record(
                pop_order,
                &current,
                PopOutcomeV1::StaleDiscarded { finalized_g },
            );
            continue;
        }
        visited.mark(current.vertex, current.g_cost);

        if current.vertex == goal {
            recorder.record(pop_order, &current, PopOutcomeV1::GoalReached);
            break TerminationReasonV1::GoalReached {
                node_id: current.node_id,
            };
        }

        let mut children = Vec::new();
        let mut skipped_visited = 0u64;
        for &(neighbor, edge_cost) in graph.neighbors(current.vertex) {
            if visited.contains(neighbor) {
                skipped_visited += 1;
                continue;
            }
            let h_cost = graph.heuristic(neighbor);
            let Some(g_cost) = current
                .g_cost
                .checked_add(edge_cost)
                .filter(|g| g.checked_add(h_cost).is_some())
            else {
                tracing::debug!(
                    from = %current.vertex,
                    to = %neighbor,
                    g = current.g_cost,
                    edge_cost,
                    h = h_cost,
                    "dropping child: path cost overflows u64"
                );
                stats.overflow_drops += 1;
                if first_overflow.is_none() {
                    first_overflow = Some((current.vertex, neighbor));
                }
                continue;
            };
            let next_id = nodes.len() as NodeId;
            let child = SearchNode {
                node_id: next_id,
                parent_id: Some(current.node_id),
                vertex: neighbor,
                depth: current.depth.saturating_add(1),
                g_cost,
                h_cost,
                creation_order: next_id,
            };
            nodes.push(child);
            frontier.push(child);
            children.push(next_id);
        }

        tracing::trace!(
            vertex = %current.vertex,
            g = current.g_cost,
            f = current.f_cost(),
            pushed = children.len(),
            "expanded"
        );
        recorder.record(
            pop_order,
            &current,
            PopOutcomeV1::Expanded {
                expansion_order: stats.expansions,
                children,
                skipped_visited,
            },
        );
        stats.expansions += 1;
    };

    stats.nodes_created = nodes.len() as u64;
    stats.frontier_high_water = frontier.high_water();
    if let TerminationReasonV1::GoalReached { node_id } = termination {
        stats.path_length = node_at(&nodes, node_id).map(|n| n.depth as usize);
    }

    tracing::debug!(
        start = %start,
        goal = %goal,
        termination = ?termination,
        pops = stats.pops,
        stale = stats.stale_discards,
        overflow_drops = stats.overflow_drops,
        "search finished"
    );
    if let TerminationReasonV1::CostOverflow { from, to } = termination {
        tracing::warn!(
            start = %start,
            goal = %goal,
            from = %from,
            to = %to,
            dropped = stats.overflow_drops,
            "frontier exhausted after dropping overflowing paths"
        );
    }

    // The graph digest binds the trace to its input; skip the hashing when
    // nothing is being recorded.
    let graph_digest = if policy.record_trace {
        bind_graph_digest(graph.digest())
    } else {
        None
    };
    let metadata = TraceMetadata {
        graph_digest,
        start,
        goal,
        policy: policy.clone(),
        termination_reason: termination,
        stats,
    };
    let trace = recorder.finish(&nodes, metadata);

    Ok(SearchRun {
        start,
        goal,
        termination,
        nodes,
        visited,
        stats,
        trace,
    })
}

/// Reconstruct the vertex path from the root to `node_id` by walking parent
/// indices, then reversing.
///
/// Returns an empty path if `node_id` is not in the arena.
#[must_use]
pub fn reconstruct_path(nodes: &[SearchNode], node_id: NodeId) -> Vec<VertexId> {
    let mut path = Vec::new();
    let mut current = node_at(nodes, node_id);

    while let Some(node) = current {
        path.push(node.vertex);
        // Parents always precede children in the arena; anything else would
        // be a corrupted arena, so stop rather than loop.
        current = node
            .parent_id
            .filter(|&parent| parent < node.node_id)
            .and_then(|parent| node_at(nodes, parent));
    }

    path.reverse();
    path
}

/// Render a graph digest for trace metadata.
///
/// A failed digest leaves the trace unbound; that is logged, since `None`
/// otherwise only means recording was off.
fn bind_graph_digest(digest: Result<ContentHash, GraphError>) -> Option<String> {
    match digest {
        Ok(d) => Some(d.as_str().to_string()),
        Err(error) => {
            tracing::warn!(%error, "graph digest failed; trace is not bound to its input");
            None
        }
    }
}

fn node_at(nodes: &[SearchNode], node_id: NodeId) -> Option<&SearchNode> {
    usize::try_from(node_id).ok().and_then(|i| nodes.get(i))
}

pub(crate) fn check_vertex(graph: &Graph, vertex: VertexId) -> Result<(), SearchError> {
    if graph.contains(vertex) {
        Ok(())
    } else {
        Err(SearchError::VertexOutOfRange {
            vertex,
            vertex_count: graph.vertex_count(),
        })
    }
}
