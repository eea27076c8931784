//! Per-package verdicts.
//!
//! Every installed package ends up as exactly one `PackageVerdict`:
//! - Git-backed packages aggregate their signature checks
//! - Anything else is an unknown format and never verified

pub mod verdict;

pub use verdict::*;
