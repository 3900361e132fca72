//! Arbor Kernel: the deterministic core underneath the search engine.
//!
//! # API Surface
//!
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 content hashing
//! - [`proof::canon::canonical_json_bytes`] -- the single canonical JSON encoder
//! - [`proof::replay::replay_verify`] -- verify an arithmetic solution by
//!   re-evaluating its expression text from scratch
//!
//! # Module Dependency Direction
//!
//! `expr` ← `proof`
//!
//! One-way only. `expr` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod expr;
pub mod proof;
