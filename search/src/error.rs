//! Typed search errors.
//!
//! `SearchError` represents configuration failures only. Runtime terminations
//! (frontier exhaustion, budget exhaustion, caught panics) are expressed via
//! [`crate::graph::TerminationReason`] and always come with a `SearchGraph`.

/// Typed failure for engine construction and pre-flight validation.
///
/// These errors are returned before any search step is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The strategy name is not one of the supported traversal orders.
    UnknownStrategy { name: String },
    /// A policy field holds a value the engine cannot honour.
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStrategy { name } => write!(
                f,
                "unknown search strategy {name:?} (expected \"breadth-first\" or \"depth-first\")"
            ),
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
