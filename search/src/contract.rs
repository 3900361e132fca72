//! Search world contract trait.

use std::marker::PhantomData;

/// Trait for worlds that support search.
///
/// A world supplies the three strategy behaviours the engine depends on
/// (successor generation, scoring, goal detection) plus the canonical identity
/// bytes used for visited-state deduplication. The engine never inspects a
/// state directly.
///
/// # Contract
///
/// - `generate` must terminate and be deterministic: same state → same
///   successors in the same order.
/// - `evaluate` returns a finite score; higher is more promising. Nodes scoring
///   `<= 0.0` are never expanded.
/// - `is_goal` is a pure predicate.
/// - `identity_bytes` must be equal for any two states the world considers
///   the same; the engine keeps only the first such state it enqueues.
/// - All methods must be reentrant: the engine may be reused for any number
///   of searches.
pub trait SearchWorld {
    /// The world's state representation.
    type State;

    /// Unique world identifier, recorded in the search graph.
    fn world_id(&self) -> &str;

    /// Candidate successor states, in a deterministic order.
    fn generate(&self, state: &Self::State) -> Vec<Self::State>;

    /// Heuristic score for a state.
    fn evaluate(&self, state: &Self::State) -> f64;

    /// Test whether the state satisfies the world's goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Canonical identity bytes for deduplication.
    fn identity_bytes(&self, state: &Self::State) -> Vec<u8>;
}

/// A world assembled from four plain functions.
///
/// Lets a caller plug a new domain into the engine without declaring a type:
///
/// ```
/// use arbor_search::contract::{FnWorld, SearchWorld};
///
/// let world = FnWorld::new(
///     "count_to_three",
///     |n: &u32| if *n < 3 { vec![n + 1] } else { Vec::new() },
///     |_| 1.0,
///     |n| *n == 3,
///     |n| n.to_le_bytes().to_vec(),
/// );
/// assert_eq!(world.generate(&1), vec![2]);
/// ```
pub struct FnWorld<S, G, E, P, K> {
    world_id: String,
    generate: G,
    evaluate: E,
    is_goal: P,
    identity: K,
    _state: PhantomData<fn(&S)>,
}

impl<S, G, E, P, K> FnWorld<S, G, E, P, K>
where
    G: Fn(&S) -> Vec<S>,
    E: Fn(&S) -> f64,
    P: Fn(&S) -> bool,
    K: Fn(&S) -> Vec<u8>,
{
    pub fn new(world_id: impl Into<String>, generate: G, evaluate: E, is_goal: P, identity: K) -> Self {
        Self {
            world_id: world_id.into(),
            generate,
            evaluate,
            is_goal,
            identity,
            _state: PhantomData,
        }
    }
}

impl<S, G, E, P, K> SearchWorld for FnWorld<S, G, E, P, K>
where
    G: Fn(&S) -> Vec<S>,
    E: Fn(&S) -> f64,
    P: Fn(&S) -> bool,
    K: Fn(&S) -> Vec<u8>,
{
    type State = S;

    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn generate(&self, state: &S) -> Vec<S> {
        (self.generate)(state)
    }

    fn evaluate(&self, state: &S) -> f64 {
        (self.evaluate)(state)
    }

    fn is_goal(&self, state: &S) -> bool {
        (self.is_goal)(state)
    }

    fn identity_bytes(&self, state: &S) -> Vec<u8> {
        (self.identity)(state)
    }
}

impl<W: SearchWorld + ?Sized> SearchWorld for &W {
    type State = W::State;

    fn world_id(&self) -> &str {
        (**self).world_id()
    }

    fn generate(&self, state: &Self::State) -> Vec<Self::State> {
        (**self).generate(state)
    }

    fn evaluate(&self, state: &Self::State) -> f64 {
        (**self).evaluate(state)
    }

    fn is_goal(&self, state: &Self::State) -> bool {
        (**self).is_goal(state)
    }

    fn identity_bytes(&self, state: &Self::State) -> Vec<u8> {
        (**self).identity_bytes(state)
    }
}
