//! Solver configuration.
//!
//! Every field is an optional override; unset fields fall back to the
//! defaults below. The resolved values flow into the engine's
//! [`SearchPolicy`] and the [`Point24`] world.

use arbor_search::policy::{SearchPolicy, Strategy};

use crate::worlds::point24::{Point24, DEFAULT_TARGET};

/// Default traversal order.
pub const DEFAULT_STRATEGY: Strategy = Strategy::BreadthFirst;

/// Configuration that can override solver defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverConfig {
    /// Traversal order. `None` uses [`DEFAULT_STRATEGY`].
    pub strategy: Option<Strategy>,
    /// Expansion cap per puzzle. `None` is unbounded.
    pub max_expansions: Option<u64>,
    /// Target value. `None` uses [`DEFAULT_TARGET`].
    pub target: Option<f64>,
}

impl SolverConfig {
    /// Default configuration with the given strategy.
    #[must_use]
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy: Some(strategy),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy.unwrap_or(DEFAULT_STRATEGY)
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target.unwrap_or(DEFAULT_TARGET)
    }

    /// The engine policy these settings resolve to.
    #[must_use]
    pub fn search_policy(&self) -> SearchPolicy {
        SearchPolicy {
            strategy: self.strategy(),
            max_expansions: self.max_expansions,
        }
    }

    /// The puzzle world these settings resolve to.
    #[must_use]
    pub fn world(&self) -> Point24 {
        Point24::with_target(self.target())
    }
}
