//! Shared utilities for pesto.
//!
//! This crate provides cross-cutting concerns used by all other pesto crates:
//! the unified error type, filesystem helpers, hashing, process spawning, and
//! terminal status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;
pub mod progress;
