//! Project configuration.
//!
//! Reads the package manager manifest for the two settings verification
//! depends on: the preferred install mode and the vendor directory.

pub mod manifest;

pub use manifest::*;
