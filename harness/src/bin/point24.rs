//! `point24`: solve "make 24" puzzles from the command line.
//!
//! With no numbers, runs the classic battery. Logging goes to stderr and is
//! controlled by `RUST_LOG` (default `warn`, `--verbose` raises it to `debug`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use arbor_harness::config::SolverConfig;
use arbor_harness::report::SolveReport;
use arbor_harness::solver::Solver;
use arbor_harness::worlds::point24::{format_number, CLASSIC_PUZZLES};
use arbor_search::policy::Strategy;

#[derive(Parser, Debug)]
#[command(name = "point24")]
#[command(about = "Combine numbers with + - * / to reach 24 by tree search")]
struct Args {
    /// Traversal order: breadth-first (bfs) or depth-first (dfs)
    #[arg(short, long, value_name = "NAME", default_value = "breadth-first")]
    strategy: String,

    /// Stop each search after this many node expansions
    #[arg(long, value_name = "N")]
    max_expansions: Option<u64>,

    /// Target value (default 24)
    #[arg(long, value_name = "X", allow_negative_numbers = true)]
    target: Option<f64>,

    /// Write a canonical JSON solve report for the given numbers
    #[arg(long, value_name = "PATH", requires = "numbers")]
    report: Option<PathBuf>,

    /// Verbose: log search statistics
    #[arg(short, long)]
    verbose: bool,

    /// Numbers to combine; omit to run the classic battery
    #[arg(allow_negative_numbers = true)]
    numbers: Vec<f64>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .try_init();
}

fn format_input(numbers: &[f64]) -> String {
    let items: Vec<String> = numbers.iter().map(|n| format_number(*n)).collect();
    format!("[{}]", items.join(", "))
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let strategy: Strategy = args.strategy.parse()?;
    let config = SolverConfig {
        strategy: Some(strategy),
        max_expansions: args.max_expansions,
        target: args.target,
    };
    let solver = Solver::new(&config)?;

    let puzzles: Vec<Vec<f64>> = if args.numbers.is_empty() {
        CLASSIC_PUZZLES.iter().map(|p| p.to_vec()).collect()
    } else {
        vec![args.numbers.clone()]
    };

    for numbers in &puzzles {
        let run = solver.run(numbers)?;
        match &run.solution {
            Some(solution) => println!("输入: {} -> 解答: {solution}", format_input(numbers)),
            None => println!("输入: {} -> 无解", format_input(numbers)),
        }
        if let Some(path) = &args.report {
            let report = SolveReport::build(&run)?;
            report.write_to(path)?;
            eprintln!("report: {} ({})", path.display(), report.digest);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
