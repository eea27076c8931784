//! Aggregate trust decision.
//!
//! Collects every verdict of a run and fails once, at the end, naming
//! every package that could not be verified.

pub mod trust;

pub use trust::*;
