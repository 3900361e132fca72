//! Concrete search worlds.

pub mod point24;
