//! Structured logging with run context.
//!
//! Provides logging macros and utilities that include the run id and,
//! once known, the package name in every log message.

pub mod structured;

pub use structured::*;
