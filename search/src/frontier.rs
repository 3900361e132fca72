//! Breadth-first / depth-first frontier with a visited-state set.
//!
//! One `VecDeque` serves both strategies: nodes are always pushed at the back;
//! breadth-first pops the front (FIFO), depth-first pops the back (LIFO).
//!
//! Uses a `BTreeSet`-based visited set (not `HashSet`) for deterministic
//! iteration order.

use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

use arbor_kernel::proof::hash::ContentHash;

use crate::node::SearchNode;
use crate::policy::Strategy;

/// Frontier manager owned by exactly one search invocation.
///
/// Maintains:
/// - A `VecDeque` of nodes awaiting expansion
/// - A `BTreeSet<String>` of enqueued state fingerprint hex digests
pub struct Frontier<S> {
    strategy: Strategy,
    queue: VecDeque<Rc<SearchNode<S>>>,
    visited: BTreeSet<String>,
    high_water: u64,
}

impl<S> Frontier<S> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            queue: VecDeque::new(),
            visited: BTreeSet::new(),
            high_water: 0,
        }
    }

    /// Record a fingerprint as seen.
    ///
    /// Returns `false` if it was already visited (first-seen-wins).
    pub fn mark_visited(&mut self, fingerprint: &ContentHash) -> bool {
        self.visited.insert(fingerprint.hex_digest().to_string())
    }

    /// Check if a fingerprint has been visited.
    #[must_use]
    pub fn is_visited(&self, fingerprint: &ContentHash) -> bool {
        self.visited.contains(fingerprint.hex_digest())
    }

    /// Add a node to the frontier.
    pub fn push(&mut self, node: Rc<SearchNode<S>>) {
        self.queue.push_back(node);
        let size = self.queue.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Remove the next node in strategy order.
    #[must_use]
    pub fn pop(&mut self) -> Option<Rc<SearchNode<S>>> {
        match self.strategy {
            Strategy::BreadthFirst => self.queue.pop_front(),
            Strategy::DepthFirst => self.queue.pop_back(),
        }
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of distinct fingerprints seen.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
