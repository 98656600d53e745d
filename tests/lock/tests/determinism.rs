//! In-process determinism: repeated runs give identical verdicts, stats and
//! trace bytes, and the graph digest depends only on graph content.

use lock_tests::fixtures::{graph_from_edges, random_edges, reference_graph, vertex, REFERENCE_ROWS};
use waypoint_kernel::model::{Graph, GraphBuilder, VertexId};
use waypoint_search::goals::{default_goals, survey_digest, survey_goals};
use waypoint_search::policy::SearchPolicy;
use waypoint_search::search::search_with_policy;

#[test]
fn repeated_runs_are_byte_identical() {
    let g = reference_graph();
    let start = vertex(&g, "A");

    for goal in default_goals(&g) {
        let first = search_with_policy(&g, start, goal, &SearchPolicy::default()).unwrap();
        let first_bytes = first.trace.to_canonical_json_bytes().unwrap();

        for _ in 0..5 {
            let again = search_with_policy(&g, start, goal, &SearchPolicy::default()).unwrap();
            assert_eq!(again.result(), first.result());
            assert_eq!(again.stats, first.stats);
            assert_eq!(again.nodes, first.nodes);
            assert_eq!(again.trace.to_canonical_json_bytes().unwrap(), first_bytes);
        }
    }
}

#[test]
fn canonical_trace_bytes_parse_back() {
    let g = reference_graph();
    let start = vertex(&g, "A");
    let graph_digest = g.digest().unwrap();

    for goal in default_goals(&g) {
        let run = search_with_policy(&g, start, goal, &SearchPolicy::default()).unwrap();
        let bytes = run.trace.to_canonical_json_bytes().unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, run.trace.to_json_value());

        let metadata = &parsed["metadata"];
        assert_eq!(metadata["graph_digest"], graph_digest.as_str());
        assert_eq!(metadata["goal"], goal.raw());
        assert_eq!(metadata["termination_reason"]["type"], "goal_reached");
        assert_eq!(metadata["stats"]["pops"], run.stats.pops);
        assert_eq!(metadata["stats"]["expansions"], run.stats.expansions);

        let pops = parsed["pops"].as_array().unwrap();
        assert_eq!(pops.len() as u64, run.stats.pops);
        assert_eq!(pops.last().unwrap()["outcome"]["type"], "goal_reached");
        assert_eq!(pops.last().unwrap()["vertex"], goal.raw());
    }
}

#[test]
fn trace_digest_binds_the_graph() {
    let g = reference_graph();
    let start = vertex(&g, "A");
    let goal = vertex(&g, "G2");
    let run = search_with_policy(&g, start, goal, &SearchPolicy::default()).unwrap();

    let graph_digest = g.digest().unwrap();
    assert_eq!(
        run.trace.metadata.graph_digest.as_deref(),
        Some(graph_digest.as_str())
    );

    // Relabelling changes the graph digest, hence the trace digest, but not
    // the route.
    let relabelled = g
        .clone()
        .with_labels(["a", "b", "c", "d", "e", "h", "j", "g1", "g2", "g3"])
        .unwrap();
    let other = search_with_policy(&relabelled, start, goal, &SearchPolicy::default()).unwrap();
    assert_eq!(other.result(), run.result());
    assert_ne!(other.trace.digest().unwrap(), run.trace.digest().unwrap());
}

#[test]
fn graph_digest_ignores_construction_path() {
    let from_matrix = Graph::from_incoming_matrix(&REFERENCE_ROWS, &[0; 10]).unwrap();

    let mut builder = GraphBuilder::new(10);
    // Insert edges in reverse so the builder sees a different order.
    for (to, row) in REFERENCE_ROWS.iter().enumerate().rev() {
        for (from, &cost) in row.iter().enumerate().rev() {
            if cost > 0 {
                builder.add_edge(
                    VertexId::from_index(from).unwrap(),
                    VertexId::from_index(to).unwrap(),
                    cost,
                );
            }
        }
    }
    let from_builder = builder.build().unwrap();

    assert_eq!(from_matrix, from_builder);
    assert_eq!(from_matrix.digest().unwrap(), from_builder.digest().unwrap());
}

#[test]
fn trace_flag_does_not_change_the_search() {
    for seed in 100..120 {
        let edges = random_edges(seed, 15, 20, 7);
        let g = graph_from_edges(15, &edges, &[0; 15]);
        let traced =
            search_with_policy(&g, VertexId::new(0), VertexId::new(14), &SearchPolicy::default())
                .unwrap();
        let untraced =
            search_with_policy(&g, VertexId::new(0), VertexId::new(14), &SearchPolicy::untraced())
                .unwrap();
        assert_eq!(traced.result(), untraced.result(), "seed {seed}");
        assert_eq!(traced.stats, untraced.stats, "seed {seed}");
        assert_eq!(traced.visited.order(), untraced.visited.order(), "seed {seed}");
    }
}

#[test]
fn survey_digest_is_stable() {
    let g = reference_graph();
    let start = vertex(&g, "A");
    let goals = default_goals(&g);
    let a = survey_digest(start, &survey_goals(&g, start, &goals).unwrap()).unwrap();
    let b = survey_digest(start, &survey_goals(&g, start, &goals).unwrap()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.algorithm(), "sha256");
    assert_eq!(a.hex_digest().len(), 64);
}
