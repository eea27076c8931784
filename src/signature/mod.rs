//! Signature check module.
//!
//! Turns the textual output of `git verify-commit` / `git tag -v` into
//! structured facts:
//! - Commit hash, tag name, signing key id and signer identity
//! - Whether the check is signed and whether it can be trusted

pub mod check;
pub mod patterns;

pub use check::*;
pub use patterns::*;
