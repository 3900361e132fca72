//! Search graph lock tests on the 24-point world: determinism, visited-set
//! deduplication, graph completeness and solver isolation.

use std::collections::BTreeSet;

use arbor_harness::config::SolverConfig;
use arbor_harness::report::SolveReport;
use arbor_harness::solver::Solver;
use arbor_harness::worlds::point24::{Point24, CLASSIC_PUZZLES};
use arbor_search::graph::{CandidateOutcome, SearchGraph, TerminationReason};
use arbor_search::policy::{SearchPolicy, Strategy};
use arbor_search::search::SearchEngine;

fn graph(strategy: Strategy, numbers: &[f64]) -> SearchGraph {
    let engine = SearchEngine::new(Point24::new(), SearchPolicy::with_strategy(strategy)).unwrap();
    engine.search(Point24::initial_state(numbers)).graph
}

#[test]
fn graph_bytes_deterministic_n10() {
    for strategy in [Strategy::BreadthFirst, Strategy::DepthFirst] {
        let first = graph(strategy, &[1.0, 2.0, 3.0, 4.0]);
        let first_bytes = first.to_canonical_json_bytes().unwrap();
        for _ in 1..10 {
            let again = graph(strategy, &[1.0, 2.0, 3.0, 4.0]);
            assert_eq!(first_bytes, again.to_canonical_json_bytes().unwrap());
            assert_eq!(first.digest().unwrap(), again.digest().unwrap());
        }
    }
}

#[test]
fn strategies_produce_distinct_graphs() {
    let bfs = graph(Strategy::BreadthFirst, &[1.0, 2.0, 3.0, 4.0]);
    let dfs = graph(Strategy::DepthFirst, &[1.0, 2.0, 3.0, 4.0]);
    assert_ne!(bfs.digest().unwrap(), dfs.digest().unwrap());
}

#[test]
fn no_two_nodes_share_a_fingerprint() {
    for strategy in [Strategy::BreadthFirst, Strategy::DepthFirst] {
        // Unsolvable input explores the whole reachable space.
        let g = graph(strategy, &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(
            g.metadata.termination_reason,
            TerminationReason::FrontierExhausted
        );
        let unique: BTreeSet<&str> = g
            .node_summaries
            .iter()
            .map(|n| n.state_fingerprint.as_str())
            .collect();
        assert_eq!(unique.len(), g.node_summaries.len());
        assert!(g.metadata.total_duplicates_suppressed > 0);
    }
}

#[test]
fn graph_is_internally_consistent() {
    for strategy in [Strategy::BreadthFirst, Strategy::DepthFirst] {
        for numbers in CLASSIC_PUZZLES {
            let g = graph(strategy, &numbers);
            let meta = &g.metadata;

            let ids: Vec<u64> = g.node_summaries.iter().map(|n| n.node_id).collect();
            assert_eq!(ids, (0..ids.len() as u64).collect::<Vec<_>>());
            assert_eq!(meta.total_expansions, g.expansions.len() as u64);
            assert_eq!(meta.root_state_fingerprint, g.node_summaries[0].state_fingerprint);

            let mut generated = 0;
            let mut duplicates = 0;
            for event in &g.expansions {
                generated += event.candidates.len() as u64;
                for c in &event.candidates {
                    match c.outcome {
                        CandidateOutcome::Enqueued { to_node } => {
                            let child = &g.node_summaries[to_node as usize];
                            assert_eq!(child.parent_id, Some(event.node_id));
                            assert_eq!(child.depth, event.depth + 1);
                            assert_eq!(child.state_fingerprint, c.state_fingerprint);
                        }
                        CandidateOutcome::DuplicateSuppressed => duplicates += 1,
                    }
                }
            }
            assert_eq!(meta.total_candidates_generated, generated);
            assert_eq!(meta.total_duplicates_suppressed, duplicates);

            if let TerminationReason::GoalReached { node_id } = meta.termination_reason {
                assert!(g.node_summaries[node_id as usize].is_goal);
                assert_eq!(g.node_summaries[node_id as usize].depth, 3);
            }
        }
    }
}

#[test]
fn depth_first_candidate_records_run_in_reverse_generation_order() {
    let g = graph(Strategy::DepthFirst, &[1.0, 2.0, 3.0, 4.0]);
    let root = &g.expansions[0];
    let indices: Vec<u64> = root.candidates.iter().map(|c| c.index).collect();
    let mut expected: Vec<u64> = (0..root.candidates.len() as u64).collect();
    expected.reverse();
    assert_eq!(indices, expected);
}

#[test]
fn breadth_first_goal_is_shallowest() {
    // [24, 1] reaches a goal at depth 1 and never needs depth 2.
    let g = graph(Strategy::BreadthFirst, &[24.0, 1.0]);
    let TerminationReason::GoalReached { node_id } = g.metadata.termination_reason else {
        panic!("expected a goal");
    };
    assert_eq!(g.node_summaries[node_id as usize].depth, 1);
    assert!(g.node_summaries.iter().all(|n| n.depth <= 1));
}

#[test]
fn solver_reuse_does_not_leak_visited_states() {
    for strategy in [Strategy::BreadthFirst, Strategy::DepthFirst] {
        let fresh = |numbers: &[f64]| {
            let run = Solver::new(&SolverConfig::with_strategy(strategy))
                .unwrap()
                .run(numbers)
                .unwrap();
            SolveReport::build(&run).unwrap().digest
        };
        let shared = Solver::new(&SolverConfig::with_strategy(strategy)).unwrap();
        for numbers in CLASSIC_PUZZLES.iter().chain(CLASSIC_PUZZLES.iter()) {
            let run = shared.run(numbers).unwrap();
            assert_eq!(SolveReport::build(&run).unwrap().digest, fresh(&numbers[..]));
        }
    }
}

#[test]
fn budget_bounds_expansions() {
    let engine = SearchEngine::new(
        Point24::new(),
        SearchPolicy {
            strategy: Strategy::BreadthFirst,
            max_expansions: Some(3),
        },
    )
    .unwrap();
    let result = engine.search(Point24::initial_state(&[1.0, 1.0, 1.0, 1.0]));
    assert!(result.goal_node.is_none());
    assert_eq!(result.graph.metadata.total_expansions, 3);
    assert_eq!(
        result.termination_reason(),
        TerminationReason::ExpansionBudgetExceeded
    );
}
