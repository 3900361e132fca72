//! Search policy types.

use std::str::FromStr;

use crate::error::SearchError;

/// Traversal order, fixed when the engine is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// FIFO frontier. Returns a goal of minimal depth.
    #[default]
    BreadthFirst,
    /// LIFO frontier. Children are explored in generation order.
    DepthFirst,
}

impl Strategy {
    /// Canonical lowercase name (also used in the audit graph).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth-first",
            Self::DepthFirst => "depth-first",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    /// Case-insensitive. Accepts `breadth-first` / `depth-first`, their
    /// underscore spellings, and the short forms `bfs` / `dfs`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breadth-first" | "breadth_first" | "bfs" => Ok(Self::BreadthFirst),
            "depth-first" | "depth_first" | "dfs" => Ok(Self::DepthFirst),
            _ => Err(SearchError::UnknownStrategy {
                name: s.to_string(),
            }),
        }
    }
}

/// Engine configuration.
///
/// The default is an unbounded breadth-first search: the engine runs until it
/// finds a goal or exhausts the frontier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPolicy {
    /// Traversal order.
    pub strategy: Strategy,
    /// Hard cap on node expansions (`generate` calls). `None` is unbounded.
    pub max_expansions: Option<u64>,
}

impl SearchPolicy {
    /// Unbounded policy with the given strategy.
    #[must_use]
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Validate the policy before a search starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_expansions` is zero,
    /// which would forbid even expanding the root.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1 (use None for unbounded)".into(),
            });
        }
        Ok(())
    }

    pub(crate) fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "max_expansions": self.max_expansions,
            "strategy": self.strategy.as_str(),
        })
    }
}
