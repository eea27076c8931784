//! Verification pipeline.
//!
//! Drives the checks for every installed package:
//! - Version-control detection
//! - Current commit signature check
//! - Tag signature checks when the commit alone is not trusted
//! - One verdict per package

pub mod context;
pub mod verification;

pub use context::*;
pub use verification::*;
