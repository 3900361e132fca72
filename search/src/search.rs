//! Search entry point and expansion loop.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use arbor_kernel::proof::hash::{canonical_hash, ContentHash};
use arbor_kernel::proof::hash_domain::HashDomain;

use crate::contract::SearchWorld;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::graph::{
    score_micros, CandidateOutcome, CandidateRecord, ExpandEvent, NodeSummary, PanicStage,
    SearchGraph, SearchGraphMetadata, TerminationReason,
};
use crate::node::SearchNode;
use crate::policy::{SearchPolicy, Strategy};

/// Result of a search execution.
///
/// Always contains a complete `SearchGraph` audit trail regardless of how the
/// search terminated.
#[derive(Debug)]
pub struct SearchResult<S> {
    /// The first goal node popped, with its full ancestry.
    pub goal_node: Option<Rc<SearchNode<S>>>,
    /// The complete search graph audit trail.
    pub graph: SearchGraph,
}

impl<S> SearchResult<S> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.graph.metadata.termination_reason,
            TerminationReason::GoalReached { .. }
        )
    }

    #[must_use]
    pub fn termination_reason(&self) -> TerminationReason {
        self.graph.metadata.termination_reason
    }
}

/// A reusable search engine bound to one world and one policy.
///
/// The engine holds no per-search state: every call to [`SearchEngine::search`]
/// builds its own frontier and visited set, so consecutive searches are fully
/// independent.
pub struct SearchEngine<W> {
    world: W,
    policy: SearchPolicy,
}

impl<W: SearchWorld> SearchEngine<W> {
    /// Build an engine after validating the policy.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
    pub fn new(world: W, policy: SearchPolicy) -> Result<Self, SearchError> {
        policy.validate()?;
        Ok(Self { world, policy })
    }

    /// Build an unbounded engine from a strategy name such as `"depth-first"`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownStrategy`] for unrecognised names.
    pub fn with_strategy_name(world: W, strategy: &str) -> Result<Self, SearchError> {
        let strategy: Strategy = strategy.parse()?;
        Self::new(world, SearchPolicy::with_strategy(strategy))
    }

    #[must_use]
    pub fn world(&self) -> &W {
        &self.world
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Run one search from `initial_state`.
    pub fn search(&self, initial_state: W::State) -> SearchResult<W::State> {
        run_search(initial_state, &self.world, &self.policy)
    }
}

/// Run a single search without building an engine.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] only for pre-flight validation
/// failures; no search step is taken in that case.
pub fn search<W: SearchWorld + ?Sized>(
    initial_state: W::State,
    world: &W,
    policy: &SearchPolicy,
) -> Result<SearchResult<W::State>, SearchError> {
    policy.validate()?;
    Ok(run_search(initial_state, world, policy))
}

/// Call a world method, converting a panic into the stage it happened in.
fn guarded<T>(stage: PanicStage, f: impl FnOnce() -> T) -> Result<T, PanicStage> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|_| stage)
}

fn fingerprint<W: SearchWorld + ?Sized>(
    world: &W,
    state: &W::State,
) -> Result<ContentHash, PanicStage> {
    let bytes = guarded(PanicStage::IdentityBytes, || world.identity_bytes(state))?;
    Ok(canonical_hash(HashDomain::SearchNode, &bytes))
}

/// Accumulates the audit trail while the loop runs.
#[derive(Default)]
struct Recorder {
    expansions: Vec<ExpandEvent>,
    node_summaries: Vec<NodeSummary>,
    total_candidates_generated: u64,
    total_duplicates_suppressed: u64,
    total_pruned: u64,
    total_dead_ends: u64,
}

impl Recorder {
    fn next_node_id(&self) -> u64 {
        self.node_summaries.len() as u64
    }

    fn expansion_count(&self) -> u64 {
        self.expansions.len() as u64
    }

    fn record_node<S>(&mut self, node: &SearchNode<S>) {
        self.node_summaries.push(NodeSummary {
            node_id: node.node_id,
            parent_id: node.parent_id(),
            state_fingerprint: node.state_fingerprint.hex_digest().to_string(),
            depth: node.depth,
            score_micros: score_micros(node.score),
            is_goal: false,
            pruned: false,
            expansion_order: None,
        });
    }

    #[allow(clippy::cast_possible_truncation)]
    fn summary_mut(&mut self, node_id: u64) -> &mut NodeSummary {
        // node_id is the summary index by construction.
        &mut self.node_summaries[node_id as usize]
    }

    fn record_expansion<S>(&mut self, node: &SearchNode<S>, candidates: Vec<CandidateRecord>) {
        let expansion_order = self.expansion_count();
        let event = ExpandEvent {
            expansion_order,
            node_id: node.node_id,
            state_fingerprint: node.state_fingerprint.hex_digest().to_string(),
            depth: node.depth,
            score_micros: score_micros(node.score),
            candidates,
        };
        if event.is_dead_end() {
            self.total_dead_ends += 1;
        }
        self.expansions.push(event);
        self.summary_mut(node.node_id).expansion_order = Some(expansion_order);
    }

    fn finish(
        self,
        world_id: &str,
        policy: &SearchPolicy,
        root_state_fingerprint: String,
        frontier_high_water: u64,
        termination_reason: TerminationReason,
    ) -> SearchGraph {
        let total_expansions = self.expansion_count();
        SearchGraph {
            expansions: self.expansions,
            node_summaries: self.node_summaries,
            metadata: SearchGraphMetadata {
                world_id: world_id.to_string(),
                policy: policy.clone(),
                root_state_fingerprint,
                total_expansions,
                total_candidates_generated: self.total_candidates_generated,
                total_duplicates_suppressed: self.total_duplicates_suppressed,
                total_pruned: self.total_pruned,
                total_dead_ends: self.total_dead_ends,
                frontier_high_water,
                termination_reason,
            },
        }
    }
}

/// Expand `current`: generate, dedup, score, and push its children.
///
/// The expansion event is recorded even when a callback panics part-way, so
/// the graph shows which candidates were processed before the failure.
fn expand<W: SearchWorld + ?Sized>(
    world: &W,
    current: &Rc<SearchNode<W::State>>,
    frontier: &mut Frontier<W::State>,
    recorder: &mut Recorder,
) -> Result<(), PanicStage> {
    let candidates = match guarded(PanicStage::Generate, || world.generate(&current.state)) {
        Ok(c) => c,
        Err(stage) => {
            recorder.record_expansion(&**current, Vec::new());
            return Err(stage);
        }
    };
    recorder.total_candidates_generated += candidates.len() as u64;

    let mut ordered: Vec<(usize, W::State)> = candidates.into_iter().enumerate().collect();
    // LIFO pops reverse insertion order; pushing in reverse keeps depth-first
    // exploration in generation order.
    if frontier.strategy() == Strategy::DepthFirst {
        ordered.reverse();
    }

    let mut records = Vec::with_capacity(ordered.len());
    let mut outcome = Ok(());
    for (index, state) in ordered {
        let fp = match fingerprint(world, &state) {
            Ok(fp) => fp,
            Err(stage) => {
                outcome = Err(stage);
                break;
            }
        };
        let fp_hex = fp.hex_digest().to_string();

        if !frontier.mark_visited(&fp) {
            recorder.total_duplicates_suppressed += 1;
            records.push(CandidateRecord {
                index: index as u64,
                state_fingerprint: fp_hex,
                outcome: CandidateOutcome::DuplicateSuppressed,
            });
            continue;
        }

        let score = match guarded(PanicStage::Evaluate, || world.evaluate(&state)) {
            Ok(s) => s,
            Err(stage) => {
                outcome = Err(stage);
                break;
            }
        };

        let child = SearchNode::child(current, recorder.next_node_id(), state, fp, score);
        records.push(CandidateRecord {
            index: index as u64,
            state_fingerprint: fp_hex,
            outcome: CandidateOutcome::Enqueued {
                to_node: child.node_id,
            },
        });
        recorder.record_node(&child);
        frontier.push(Rc::new(child));
    }

    tracing::trace!(
        node_id = current.node_id,
        depth = current.depth,
        candidates = records.len(),
        "expanded node"
    );
    recorder.record_expansion(&**current, records);
    outcome
}

fn run_search<W: SearchWorld + ?Sized>(
    initial_state: W::State,
    world: &W,
    policy: &SearchPolicy,
) -> SearchResult<W::State> {
    let mut frontier = Frontier::new(policy.strategy);
    let mut recorder = Recorder::default();
    let mut goal_node = None;
    let mut root_fp_hex = String::new();

    let termination_reason = 'search: {
        let root_fp = match fingerprint(world, &initial_state) {
            Ok(fp) => fp,
            Err(stage) => break 'search TerminationReason::InternalPanic { stage },
        };
        root_fp_hex = root_fp.hex_digest().to_string();
        let root_score = match guarded(PanicStage::Evaluate, || world.evaluate(&initial_state)) {
            Ok(s) => s,
            Err(stage) => break 'search TerminationReason::InternalPanic { stage },
        };

        let root = SearchNode::root(initial_state, root_fp, root_score);
        frontier.mark_visited(&root.state_fingerprint);
        recorder.record_node(&root);
        frontier.push(Rc::new(root));

        loop {
            let Some(current) = frontier.pop() else {
                break 'search TerminationReason::FrontierExhausted;
            };

            match guarded(PanicStage::IsGoal, || world.is_goal(&current.state)) {
                Ok(true) => {
                    recorder.summary_mut(current.node_id).is_goal = true;
                    let node_id = current.node_id;
                    goal_node = Some(current);
                    break 'search TerminationReason::GoalReached { node_id };
                }
                Ok(false) => {}
                Err(stage) => break 'search TerminationReason::InternalPanic { stage },
            }

            if current.is_prunable() {
                recorder.total_pruned += 1;
                recorder.summary_mut(current.node_id).pruned = true;
                continue;
            }

            if policy
                .max_expansions
                .is_some_and(|max| recorder.expansion_count() >= max)
            {
                break 'search TerminationReason::ExpansionBudgetExceeded;
            }

            if let Err(stage) = expand(world, &current, &mut frontier, &mut recorder) {
                break 'search TerminationReason::InternalPanic { stage };
            }
        }
    };

    let graph = recorder.finish(
        world.world_id(),
        policy,
        root_fp_hex,
        frontier.high_water(),
        termination_reason,
    );

    tracing::debug!(
        world_id = %graph.metadata.world_id,
        strategy = %policy.strategy,
        expansions = graph.metadata.total_expansions,
        nodes = graph.node_summaries.len(),
        duplicates = graph.metadata.total_duplicates_suppressed,
        termination = termination_reason.kind(),
        "search finished"
    );

    SearchResult { goal_node, graph }
}
