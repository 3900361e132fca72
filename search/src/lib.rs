//! Arbor Search: generic breadth-first / depth-first state-space search with
//! an auditable graph artifact.
//!
//! Among workspace crates it depends only on `arbor_kernel`. It knows
//! nothing about any concrete puzzle; domains plug in through [`contract::SearchWorld`].
//!
//! # Crate dependency graph
//!
//! ```text
//! arbor_kernel  ←  arbor_search  ←  arbor_harness
//! (hashing,        (frontier,        (point24 world,
//!  canon, replay)   nodes, engine)    solver, CLI)
//! ```
//!
//! # Key types
//!
//! - [`search::SearchEngine`]: reusable engine bound to a world and policy
//! - [`node::SearchNode`]: immutable node with a shared parent link
//! - [`frontier::Frontier`]: FIFO/LIFO queue plus visited fingerprints
//! - [`graph::SearchGraph`]: expansion-event audit log
//! - [`policy::SearchPolicy`]: traversal order and expansion budget
//! - [`contract::SearchWorld`]: trait for worlds that support search

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod node;
pub mod policy;
pub mod search;
