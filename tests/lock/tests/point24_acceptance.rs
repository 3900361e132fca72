//! Acceptance tests for the 24-point solver under both strategies.

use arbor_harness::config::SolverConfig;
use arbor_harness::solver::Solver;
use arbor_harness::worlds::point24::{Point24, Term, CLASSIC_PUZZLES};
use arbor_kernel::expr::parse;
use arbor_kernel::proof::replay::TARGET_TOLERANCE;
use arbor_search::contract::SearchWorld;
use arbor_search::policy::{SearchPolicy, Strategy};
use arbor_search::search::SearchEngine;

const STRATEGIES: [Strategy; 2] = [Strategy::BreadthFirst, Strategy::DepthFirst];

fn solver(strategy: Strategy) -> Solver {
    Solver::new(&SolverConfig::with_strategy(strategy)).unwrap()
}

#[test]
fn classic_battery_outcomes() {
    for strategy in STRATEGIES {
        let solver = solver(strategy);
        let outcomes: Vec<bool> = CLASSIC_PUZZLES
            .iter()
            .map(|p| solver.solve(p).unwrap().is_some())
            .collect();
        assert_eq!(
            outcomes,
            vec![true, false, true, true],
            "unexpected outcomes under {strategy}"
        );
    }
}

#[test]
fn solutions_replay_to_target_from_exactly_the_input() {
    for strategy in STRATEGIES {
        let solver = solver(strategy);
        for numbers in CLASSIC_PUZZLES {
            let Some(solution) = solver.solve(&numbers).unwrap() else {
                continue;
            };
            let verdict = solution.verify(&numbers).unwrap();
            assert!(
                verdict.is_match(),
                "{solution} failed replay under {strategy}: {verdict:?}"
            );

            // Independent evaluation of the printed text.
            let text = solution.to_string();
            let lhs = text.strip_suffix(" = 24").expect("formatted as `<expr> = 24`");
            let value = parse(lhs).unwrap().eval();
            assert!((value - 24.0).abs() <= TARGET_TOLERANCE, "{text} evaluates to {value}");
            assert_eq!(solution.depth, 3);
        }
    }
}

#[test]
fn three_three_eight_eight_needs_a_fraction() {
    let solution = solver(Strategy::BreadthFirst)
        .solve(&[3.0, 3.0, 8.0, 8.0])
        .unwrap()
        .unwrap();
    // 8 / (3 - 8 / 3) is the only way to 24.
    assert!(solution.expression.contains("8 / 3"), "{solution}");
}

#[test]
fn goal_states_hold_one_term_on_target() {
    let world = Point24::new();
    for strategy in STRATEGIES {
        let engine = SearchEngine::new(world, SearchPolicy::with_strategy(strategy)).unwrap();
        for numbers in CLASSIC_PUZZLES {
            let result = engine.search(Point24::initial_state(&numbers));
            let Some(goal) = result.goal_node else {
                continue;
            };
            let [Term { value, .. }] = goal.state.as_slice() else {
                panic!("goal state has {} terms", goal.state.len());
            };
            assert!((value - 24.0).abs() <= TARGET_TOLERANCE);
            assert!(world.is_goal(&goal.state));
            // Every ancestor has exactly one more term than its child.
            let sizes: Vec<usize> = goal.path().iter().map(|s| s.len()).collect();
            assert_eq!(sizes, vec![4, 3, 2, 1]);
        }
    }
}

#[test]
fn solve_is_deterministic_n10() {
    for strategy in STRATEGIES {
        let first: Vec<_> = CLASSIC_PUZZLES
            .iter()
            .map(|p| solver(strategy).solve(p).unwrap())
            .collect();
        for _ in 1..10 {
            let again: Vec<_> = CLASSIC_PUZZLES
                .iter()
                .map(|p| solver(strategy).solve(p).unwrap())
                .collect();
            assert_eq!(first, again, "nondeterministic under {strategy}");
        }
    }
}

#[test]
fn evaluate_is_idempotent() {
    let world = Point24::new();
    for numbers in CLASSIC_PUZZLES {
        let state = Point24::initial_state(&numbers);
        let first = world.evaluate(&state);
        for _ in 0..5 {
            assert_eq!(world.evaluate(&state).to_bits(), first.to_bits());
        }
    }
}

#[test]
fn strategy_names_resolve_case_insensitively() {
    for name in ["bfs", "BFS", "breadth-first", "Breadth_First"] {
        assert_eq!(
            Solver::with_strategy_name(name).unwrap().strategy(),
            Strategy::BreadthFirst
        );
    }
    for name in ["dfs", "Depth-First", "depth_first"] {
        assert_eq!(
            Solver::with_strategy_name(name).unwrap().strategy(),
            Strategy::DepthFirst
        );
    }
    assert!(Solver::with_strategy_name("astar").is_err());
}

#[test]
fn non_integral_and_negative_inputs_replay() {
    let solver = solver(Strategy::BreadthFirst);
    for numbers in [[0.5, 48.0], [-2.0, -12.0], [12.5, 11.5]] {
        let solution = solver.solve(&numbers).unwrap().expect("solvable");
        assert!(
            solution.verify(&numbers).unwrap().is_match(),
            "{solution} for {numbers:?}"
        );
    }
}
