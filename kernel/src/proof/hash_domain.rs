//! Typed domain separators for canonical hashing.
//!
//! Every hash computation selects a domain via [`HashDomain`], so a search
//! node fingerprint can never collide with a graph or report digest over the
//! same bytes.

/// Typed domain separator for [`super::hash::canonical_hash`].
///
/// Every variant maps to a unique, null-terminated byte string used as a
/// SHA-256 prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashDomain {
    /// Search node fingerprints (visited-set deduplication).
    SearchNode,
    /// Search graph audit log digest.
    SearchGraph,
    /// Solve report digest.
    SolveReport,
}

impl HashDomain {
    /// All domain variants in declaration order.
    pub const ALL: &'static [HashDomain] = &[Self::SearchNode, Self::SearchGraph, Self::SolveReport];

    /// The raw domain-separator bytes (null-terminated).
    #[must_use]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::SearchNode => b"ARBOR::SEARCH_NODE::V1\0",
            Self::SearchGraph => b"ARBOR::SEARCH_GRAPH::V1\0",
            Self::SolveReport => b"ARBOR::SOLVE_REPORT::V1\0",
        }
    }
}

impl std::fmt::Display for HashDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::SearchNode => "SearchNode",
            Self::SearchGraph => "SearchGraph",
            Self::SolveReport => "SolveReport",
        };
        f.write_str(name)
    }
}
