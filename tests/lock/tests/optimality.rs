//! Search results against brute-force shortest paths on seeded random graphs.
//!
//! Each case is replayable from its seed. Graphs are small enough that the
//! quadratic reference runs instantly.

use lock_tests::fixtures::{
    consistent_heuristic, dijkstra_from, graph_from_edges, path_cost, random_edges,
    reachable_from,
};
use waypoint_kernel::model::VertexId;
use waypoint_search::policy::SearchPolicy;
use waypoint_search::search::{search, search_with_policy, SearchResult};
use waypoint_search::trace::PopOutcomeV1;

const SEEDS: std::ops::Range<u64> = 1..41;
const VERTICES: u32 = 12;

fn check_against_dijkstra(seed: u64, heuristic_for_goal: bool) {
    let edges = random_edges(seed, VERTICES, 20, 9);
    let start = VertexId::new(0);

    for goal in 0..VERTICES {
        let heuristic = if heuristic_for_goal {
            consistent_heuristic(VERTICES, &edges, goal)
        } else {
            vec![0; VERTICES as usize]
        };
        let g = graph_from_edges(VERTICES, &edges, &heuristic);
        assert!(g.is_consistent().is_ok(), "seed {seed} goal {goal}");

        let expected = dijkstra_from(&g, start)[goal as usize];
        let result = search(&g, start, VertexId::new(goal)).unwrap();

        match (expected, &result) {
            (Some(cost), SearchResult::Found { total_cost, path }) => {
                assert_eq!(*total_cost, cost, "seed {seed} goal {goal}");
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&VertexId::new(goal)));
                assert_eq!(path_cost(&g, path), Some(cost), "seed {seed} goal {goal}");
            }
            (None, SearchResult::Unreachable) => {}
            other => panic!("seed {seed} goal {goal}: mismatch {other:?}"),
        }
    }
}

#[test]
fn zero_heuristic_matches_dijkstra() {
    for seed in SEEDS {
        check_against_dijkstra(seed, false);
    }
}

#[test]
fn consistent_heuristic_matches_dijkstra() {
    for seed in SEEDS {
        check_against_dijkstra(seed, true);
    }
}

#[test]
fn start_equals_goal_is_one_pop() {
    for seed in SEEDS.take(5) {
        let edges = random_edges(seed, VERTICES, 30, 9);
        let g = graph_from_edges(VERTICES, &edges, &vec![0; VERTICES as usize]);
        for v in g.vertices() {
            let run = search_with_policy(&g, v, v, &SearchPolicy::default()).unwrap();
            assert_eq!(
                run.result(),
                Some(SearchResult::Found {
                    total_cost: 0,
                    path: vec![v]
                })
            );
            assert_eq!(run.stats.pops, 1);
            assert_eq!(run.stats.expansions, 0);
        }
    }
}

// A goal that cannot be reached forces a full sweep: every vertex reachable
// from the start is finalized, and nothing else is.
#[test]
fn unreachable_goal_visits_exactly_the_reachable_set() {
    let mut checked = 0;
    for seed in SEEDS {
        let mut edges = random_edges(seed, VERTICES, 15, 9);
        // Vertex VERTICES-1 becomes a sink nobody points to.
        let sink = VERTICES - 1;
        edges.retain(|&(_, to, _)| to != sink);

        let g = graph_from_edges(VERTICES, &edges, &vec![0; VERTICES as usize]);
        let start = VertexId::new(0);
        let run =
            search_with_policy(&g, start, VertexId::new(sink), &SearchPolicy::default()).unwrap();
        assert_eq!(run.result(), Some(SearchResult::Unreachable), "seed {seed}");

        let mut visited: Vec<VertexId> = run.visited.order().to_vec();
        visited.sort_unstable();
        assert_eq!(visited, reachable_from(&g, start), "seed {seed}");

        let dist = dijkstra_from(&g, start);
        for (v, g_cost) in run.visited.iter() {
            assert_eq!(Some(g_cost), dist[v.index()], "seed {seed} vertex {v}");
        }
        checked += 1;
    }
    assert_eq!(checked, 40);
}

#[test]
fn finalized_costs_never_improve_later() {
    for seed in SEEDS {
        let edges = random_edges(seed, VERTICES, 35, 9);
        let goal = VERTICES - 1;
        let heuristic = consistent_heuristic(VERTICES, &edges, goal);
        let g = graph_from_edges(VERTICES, &edges, &heuristic);
        let run = search_with_policy(
            &g,
            VertexId::new(0),
            VertexId::new(goal),
            &SearchPolicy::default(),
        )
        .unwrap();

        let mut last_f = 0;
        for pop in &run.trace.pops {
            match pop.outcome {
                PopOutcomeV1::StaleDiscarded { finalized_g } => {
                    assert!(pop.g_cost >= finalized_g, "seed {seed}: {pop:?}");
                }
                PopOutcomeV1::Expanded { .. } | PopOutcomeV1::GoalReached => {
                    assert!(pop.pop_key.f_cost >= last_f, "seed {seed}: {pop:?}");
                    last_f = pop.pop_key.f_cost;
                }
            }
        }
    }
}

#[test]
fn zero_heuristic_finalizes_in_cost_order() {
    for seed in SEEDS {
        let edges = random_edges(seed, VERTICES, 25, 9);
        let g = graph_from_edges(VERTICES, &edges, &vec![0; VERTICES as usize]);
        let run = search_with_policy(
            &g,
            VertexId::new(0),
            VertexId::new(VERTICES - 1),
            &SearchPolicy::untraced(),
        )
        .unwrap();

        let costs: Vec<u64> = run.visited.iter().map(|(_, g_cost)| g_cost).collect();
        assert!(
            costs.windows(2).all(|w| w[0] <= w[1]),
            "seed {seed}: {costs:?}"
        );
    }
}

#[test]
fn parent_chain_always_points_backwards() {
    for seed in SEEDS.take(10) {
        let edges = random_edges(seed, VERTICES, 40, 5);
        let g = graph_from_edges(VERTICES, &edges, &vec![0; VERTICES as usize]);
        let run = search_with_policy(
            &g,
            VertexId::new(0),
            VertexId::new(VERTICES - 1),
            &SearchPolicy::default(),
        )
        .unwrap();
        for (i, node) in run.nodes.iter().enumerate() {
            assert_eq!(node.node_id, i as u64);
            if let Some(parent) = node.parent_id {
                assert!(parent < node.node_id);
                let p = &run.nodes[usize::try_from(parent).unwrap()];
                assert_eq!(g.cost(p.vertex, node.vertex).map(|c| p.g_cost + c), Some(node.g_cost));
            }
        }
    }
}
