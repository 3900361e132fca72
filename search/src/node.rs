//! Search node type.
//!
//! Nodes form a singly-rooted tree through shared, immutable parent links.
//! Children are never reached from their parent, so the only edge kept is
//! child → parent; a node lives exactly as long as something (the frontier,
//! a descendant, or the caller holding a result) still references it.

use std::rc::Rc;

use arbor_kernel::proof::hash::ContentHash;

/// An immutable search node.
#[derive(Debug)]
pub struct SearchNode<S> {
    /// Monotonic identifier in creation order (root = 0).
    pub node_id: u64,
    /// Parent link (`None` for the root).
    pub parent: Option<Rc<SearchNode<S>>>,
    /// The state this node holds.
    pub state: S,
    /// Canonical hash of the state's identity bytes.
    pub state_fingerprint: ContentHash,
    /// Heuristic score from the world's evaluator.
    pub score: f64,
    /// Tree depth (root = 0).
    pub depth: u32,
}

impl<S> SearchNode<S> {
    /// Build the root node (id 0, depth 0).
    #[must_use]
    pub fn root(state: S, state_fingerprint: ContentHash, score: f64) -> Self {
        Self {
            node_id: 0,
            parent: None,
            state,
            state_fingerprint,
            score,
            depth: 0,
        }
    }

    /// Build a child of `parent` one level deeper.
    #[must_use]
    pub fn child(
        parent: &Rc<Self>,
        node_id: u64,
        state: S,
        state_fingerprint: ContentHash,
        score: f64,
    ) -> Self {
        Self {
            node_id,
            parent: Some(Rc::clone(parent)),
            state,
            state_fingerprint,
            score,
            depth: parent.depth + 1,
        }
    }

    #[must_use]
    pub fn parent_id(&self) -> Option<u64> {
        self.parent.as_ref().map(|p| p.node_id)
    }

    /// Whether the pruning rule forbids expanding this node.
    ///
    /// NaN counts as non-positive.
    #[must_use]
    pub fn is_prunable(&self) -> bool {
        !(self.score > 0.0)
    }

    /// Iterate from this node up to the root (inclusive).
    pub fn ancestors(&self) -> Ancestors<'_, S> {
        Ancestors { next: Some(self) }
    }

    /// States on the path from the root to this node.
    #[must_use]
    pub fn path(&self) -> Vec<&S> {
        let mut states: Vec<&S> = self.ancestors().map(|n| &n.state).collect();
        states.reverse();
        states
    }

    /// Node ids on the path from the root to this node.
    #[must_use]
    pub fn lineage(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.ancestors().map(|n| n.node_id).collect();
        ids.reverse();
        ids
    }
}

/// Iterator over a node and its ancestors, nearest first.
pub struct Ancestors<'a, S> {
    next: Option<&'a SearchNode<S>>,
}

impl<'a, S> Iterator for Ancestors<'a, S> {
    type Item = &'a SearchNode<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}
