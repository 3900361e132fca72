//! Binary that solves the classic puzzle battery under both strategies and
//! prints deterministic output lines for cross-process verification.
//!
//! Usage: `solve_fixture`
//!
//! Output: key=value lines, one block per (strategy, puzzle).

use arbor_harness::config::SolverConfig;
use arbor_harness::report::SolveReport;
use arbor_harness::solver::Solver;
use arbor_harness::worlds::point24::CLASSIC_PUZZLES;
use arbor_search::policy::Strategy;

fn main() {
    for strategy in [Strategy::BreadthFirst, Strategy::DepthFirst] {
        let solver =
            Solver::new(&SolverConfig::with_strategy(strategy)).expect("default config is valid");
        for (case, numbers) in CLASSIC_PUZZLES.iter().enumerate() {
            let run = solver.run(numbers).expect("classic input is valid");
            let report = SolveReport::build(&run).expect("report builds");
            let graph_digest = run.graph.digest().expect("graph canonicalises");
            let solution = run
                .solution
                .as_ref()
                .map_or_else(|| "none".to_string(), ToString::to_string);

            println!("strategy={strategy} case={case}");
            println!("solution={solution}");
            println!("search_graph_digest={}", graph_digest.as_str());
            println!("report_digest={}", report.digest.as_str());
            println!(
                "termination_reason={}",
                run.graph.metadata.termination_reason.kind()
            );
            println!("total_expansions={}", run.graph.metadata.total_expansions);
        }
    }
}
