//! Shared helpers for arbor benchmark suites.

use arbor_harness::worlds::point24::Point24;
use arbor_search::graph::SearchGraph;
use arbor_search::policy::{SearchPolicy, Strategy};
use arbor_search::search::SearchEngine;

/// Named puzzle inputs covering distinct search regimes.
pub const REGIMES: &[(&str, &[f64])] = &[
    // Goal needs a non-integral intermediate.
    ("fraction_goal", &[3.0, 3.0, 8.0, 8.0]),
    // No solution: the whole reachable space is explored.
    ("exhaustive", &[1.0, 1.0, 1.0, 1.0]),
    // Many solutions; the first one is found early.
    ("easy_goal", &[1.0, 2.0, 3.0, 4.0]),
    // Five numbers: a much larger space.
    ("five_numbers", &[1.0, 3.0, 4.0, 6.0, 7.0]),
];

/// Build an unbounded engine for the given strategy.
///
/// # Panics
///
/// Panics if the default policy is rejected. Benchmark setup failures are fatal.
#[must_use]
pub fn engine(strategy: Strategy) -> SearchEngine<Point24> {
    SearchEngine::new(Point24::new(), SearchPolicy::with_strategy(strategy))
        .expect("unbounded policy is valid")
}

/// Run one search and keep only its audit graph.
#[must_use]
pub fn search_graph(engine: &SearchEngine<Point24>, numbers: &[f64]) -> SearchGraph {
    engine.search(Point24::initial_state(numbers)).graph
}
