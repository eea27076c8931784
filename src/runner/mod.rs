//! Signing-tool invocation.
//!
//! The verification pipeline never spawns processes itself. It asks a
//! `CheckRunner` to run one of three git commands and gets back the
//! exit code and merged output.

pub mod command;
pub mod git;

pub use command::*;
pub use git::*;
