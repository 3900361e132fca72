//! Arbor Harness: the 24-point puzzle on top of the generic search engine.
//!
//! The harness supplies the domain (the [`worlds::point24::Point24`] world),
//! a [`solver::Solver`] facade that turns numbers into a printable solution,
//! and a canonical [`report::SolveReport`] that commits a run to a digest.
//!
//! The harness does NOT implement search: traversal, deduplication and the
//! audit graph live in `arbor_search`; expression replay lives in
//! `arbor_kernel`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod report;
pub mod solver;
pub mod worlds;
