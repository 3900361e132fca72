//! Solver facade: numbers in, `"<expression> = 24"` out.
//!
//! # Pipeline
//!
//! ```text
//! validate input → initial state → SearchEngine::search
//!   → goal term → strip outer parens → Solution
//! ```
//!
//! The solver owns one engine and may be reused for any number of puzzles;
//! each call starts from an empty visited set.

use arbor_kernel::proof::replay::{replay_verify, ReplayError, ReplayVerdict};
use arbor_search::error::SearchError;
use arbor_search::graph::SearchGraph;
use arbor_search::policy::Strategy;
use arbor_search::search::SearchEngine;

use crate::config::SolverConfig;
use crate::worlds::point24::{format_number, Point24};

/// Failure to run a puzzle at all. "No solution" is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// No numbers were supplied.
    EmptyInput,
    /// An input number is NaN or infinite.
    NonFiniteInput { index: usize, value: f64 },
    /// The configured target is NaN or infinite.
    NonFiniteTarget { value: f64 },
    /// The solver configuration was rejected by the engine.
    Config(SearchError),
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "no input numbers"),
            Self::NonFiniteInput { index, value } => {
                write!(f, "input number at index {index} is not finite: {value}")
            }
            Self::NonFiniteTarget { value } => write!(f, "target is not finite: {value}"),
            Self::Config(e) => write!(f, "invalid solver configuration: {e}"),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SearchError> for SolveError {
    fn from(e: SearchError) -> Self {
        Self::Config(e)
    }
}

/// A found solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Fully parenthesised expression without a redundant outer pair.
    pub expression: String,
    /// The target the expression reaches.
    pub target: f64,
    /// Number of operations applied (depth of the goal node).
    pub depth: u32,
}

impl Solution {
    /// Independently re-evaluate the expression against the input numbers.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] if the expression does not parse.
    pub fn verify(&self, numbers: &[f64]) -> Result<ReplayVerdict, ReplayError> {
        replay_verify(&self.expression, numbers, self.target)
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.expression, format_number(self.target))
    }
}

/// Everything one solve produced.
#[derive(Debug, Clone)]
pub struct SolveRun {
    pub numbers: Vec<f64>,
    pub target: f64,
    pub solution: Option<Solution>,
    pub graph: SearchGraph,
}

/// 24-point solver bound to one strategy.
pub struct Solver {
    engine: SearchEngine<Point24>,
}

impl Solver {
    /// Build a solver from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::NonFiniteTarget`] for a NaN or infinite target,
    /// and [`SolveError::Config`] if the resolved policy is invalid.
    pub fn new(config: &SolverConfig) -> Result<Self, SolveError> {
        let target = config.target();
        if !target.is_finite() {
            return Err(SolveError::NonFiniteTarget { value: target });
        }
        let engine = SearchEngine::new(config.world(), config.search_policy())?;
        Ok(Self { engine })
    }

    /// Build a default solver from a strategy name such as `"dfs"`.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Config`] for unrecognised names.
    pub fn with_strategy_name(name: &str) -> Result<Self, SolveError> {
        let strategy: Strategy = name.parse()?;
        Self::new(&SolverConfig::with_strategy(strategy))
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.engine.policy().strategy
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.engine.world().target()
    }

    /// Solve one puzzle. `Ok(None)` means no combination reaches the target.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] for empty or non-finite input.
    pub fn solve(&self, numbers: &[f64]) -> Result<Option<Solution>, SolveError> {
        Ok(self.run(numbers)?.solution)
    }

    /// Solve one puzzle and keep the search audit graph.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] for empty or non-finite input.
    pub fn run(&self, numbers: &[f64]) -> Result<SolveRun, SolveError> {
        validate_input(numbers)?;

        let result = self.engine.search(Point24::initial_state(numbers));
        let solution = result.goal_node.as_ref().and_then(|node| match node.state.as_slice() {
            [term] => Some(Solution {
                expression: strip_outer_parens(&term.expr).to_string(),
                target: self.target(),
                depth: node.depth,
            }),
            _ => None,
        });

        tracing::info!(
            numbers = ?numbers,
            strategy = %self.strategy(),
            expansions = result.graph.metadata.total_expansions,
            termination = result.termination_reason().kind(),
            solved = solution.is_some(),
            "puzzle finished"
        );

        Ok(SolveRun {
            numbers: numbers.to_vec(),
            target: self.target(),
            solution,
            graph: result.graph,
        })
    }
}

fn validate_input(numbers: &[f64]) -> Result<(), SolveError> {
    if numbers.is_empty() {
        return Err(SolveError::EmptyInput);
    }
    if let Some((index, &value)) = numbers.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(SolveError::NonFiniteInput { index, value });
    }
    Ok(())
}

/// Remove one outer pair of parentheses if the first `(` closes at the end.
#[must_use]
pub fn strip_outer_parens(expr: &str) -> &str {
    let Some(inner) = expr.strip_prefix('(').and_then(|s| s.strip_suffix(')')) else {
        return expr;
    };
    let mut depth = 0usize;
    for ch in inner.chars() {
        match ch {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return expr;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    if depth == 0 {
        inner
    } else {
        expr
    }
}
