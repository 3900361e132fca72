//! `SearchGraph`: expansion-event audit log.
//!
//! Every search returns one, however it terminated. The normative decision
//! surface is the ordered list of `ExpandEvent` entries; node summaries are a
//! derived index. States themselves are never recorded, only fingerprints.

use arbor_kernel::proof::canon::{canonical_json_bytes, CanonError};
use arbor_kernel::proof::hash::{canonical_hash, ContentHash};
use arbor_kernel::proof::hash_domain::HashDomain;

use crate::policy::SearchPolicy;

/// Scores are recorded as integer micro-units so the graph stays float-free.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn score_micros(score: f64) -> i64 {
    // `as` saturates; NaN maps to 0.
    (score * 1_000_000.0).round() as i64
}

/// The complete search audit trail.
#[derive(Debug, Clone)]
pub struct SearchGraph {
    /// Ordered expansion events (one per `generate` call).
    pub expansions: Vec<ExpandEvent>,
    /// One summary per created node, sorted by `node_id` ascending.
    pub node_summaries: Vec<NodeSummary>,
    /// Aggregate counters and bindings.
    pub metadata: SearchGraphMetadata,
}

/// A single frontier-pop + expansion event.
#[derive(Debug, Clone)]
pub struct ExpandEvent {
    /// Total order of expansions.
    pub expansion_order: u64,
    /// The node being expanded.
    pub node_id: u64,
    /// Hex fingerprint of the expanded node's state.
    pub state_fingerprint: String,
    pub depth: u32,
    pub score_micros: i64,
    /// Candidate decision log, in processing order.
    pub candidates: Vec<CandidateRecord>,
}

impl ExpandEvent {
    /// An expansion that enqueued nothing.
    #[must_use]
    pub fn is_dead_end(&self) -> bool {
        !self
            .candidates
            .iter()
            .any(|c| matches!(c.outcome, CandidateOutcome::Enqueued { .. }))
    }
}

/// A generated successor and what became of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    /// Position in the world's generation order.
    pub index: u64,
    /// Hex fingerprint of the candidate state.
    pub state_fingerprint: String,
    pub outcome: CandidateOutcome,
}

/// Outcome of processing a candidate during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// New fingerprint: a child node was created and pushed.
    Enqueued { to_node: u64 },
    /// Fingerprint already visited (first-seen-wins).
    DuplicateSuppressed,
}

/// Derived per-node summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    pub node_id: u64,
    pub parent_id: Option<u64>,
    pub state_fingerprint: String,
    pub depth: u32,
    pub score_micros: i64,
    pub is_goal: bool,
    /// Popped but not expanded because its score was non-positive.
    pub pruned: bool,
    /// Set once the node has been expanded.
    pub expansion_order: Option<u64>,
}

/// Aggregate metadata.
#[derive(Debug, Clone)]
pub struct SearchGraphMetadata {
    pub world_id: String,
    pub policy: SearchPolicy,
    pub root_state_fingerprint: String,

    pub total_expansions: u64,
    pub total_candidates_generated: u64,
    pub total_duplicates_suppressed: u64,
    pub total_pruned: u64,
    pub total_dead_ends: u64,
    pub frontier_high_water: u64,
    pub termination_reason: TerminationReason,
}

/// Why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A popped node satisfied the goal predicate.
    GoalReached { node_id: u64 },
    /// Frontier emptied without finding a goal. A normal outcome.
    FrontierExhausted,
    /// `max_expansions` budget was hit.
    ExpansionBudgetExceeded,
    /// A panic was caught in a world callback.
    InternalPanic { stage: PanicStage },
}

/// World callback in which a panic was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicStage {
    Generate,
    Evaluate,
    IsGoal,
    IdentityBytes,
}

impl PanicStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Evaluate => "evaluate",
            Self::IsGoal => "is_goal",
            Self::IdentityBytes => "identity_bytes",
        }
    }
}

impl TerminationReason {
    /// Stable snake_case tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
            Self::InternalPanic { .. } => "internal_panic",
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchGraph {
    /// Serialize the graph to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content digest of the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchGraph, &bytes))
    }

    /// Convert to a `serde_json::Value`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
            "node_summaries": self.node_summaries.iter().map(node_summary_to_json).collect::<Vec<_>>(),
        })
    }
}

fn expand_event_to_json(e: &ExpandEvent) -> serde_json::Value {
    serde_json::json!({
        "candidates": e.candidates.iter().map(candidate_record_to_json).collect::<Vec<_>>(),
        "dead_end": e.is_dead_end(),
        "depth": e.depth,
        "expansion_order": e.expansion_order,
        "node_id": e.node_id,
        "score_micros": e.score_micros,
        "state_fingerprint": e.state_fingerprint,
    })
}

fn candidate_record_to_json(r: &CandidateRecord) -> serde_json::Value {
    let outcome = match r.outcome {
        CandidateOutcome::Enqueued { to_node } => {
            serde_json::json!({"to_node": to_node, "type": "enqueued"})
        }
        CandidateOutcome::DuplicateSuppressed => {
            serde_json::json!({"type": "duplicate_suppressed"})
        }
    };
    serde_json::json!({
        "index": r.index,
        "outcome": outcome,
        "state_fingerprint": r.state_fingerprint,
    })
}

fn node_summary_to_json(n: &NodeSummary) -> serde_json::Value {
    serde_json::json!({
        "depth": n.depth,
        "expansion_order": n.expansion_order,
        "is_goal": n.is_goal,
        "node_id": n.node_id,
        "parent_id": n.parent_id,
        "pruned": n.pruned,
        "score_micros": n.score_micros,
        "state_fingerprint": n.state_fingerprint,
    })
}

fn metadata_to_json(m: &SearchGraphMetadata) -> serde_json::Value {
    serde_json::json!({
        "frontier_high_water": m.frontier_high_water,
        "policy": m.policy.to_json_value(),
        "root_state_fingerprint": m.root_state_fingerprint,
        "termination_reason": termination_reason_to_json(m.termination_reason),
        "total_candidates_generated": m.total_candidates_generated,
        "total_dead_ends": m.total_dead_ends,
        "total_duplicates_suppressed": m.total_duplicates_suppressed,
        "total_expansions": m.total_expansions,
        "total_pruned": m.total_pruned,
        "world_id": m.world_id,
    })
}

fn termination_reason_to_json(r: TerminationReason) -> serde_json::Value {
    match r {
        TerminationReason::GoalReached { node_id } => {
            serde_json::json!({"node_id": node_id, "type": r.kind()})
        }
        TerminationReason::InternalPanic { stage } => {
            serde_json::json!({"stage": stage.as_str(), "type": r.kind()})
        }
        TerminationReason::FrontierExhausted | TerminationReason::ExpansionBudgetExceeded => {
            serde_json::json!({"type": r.kind()})
        }
    }
}
