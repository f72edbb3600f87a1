//! Core data types for pesto.
//!
//! This crate defines the version model, manifest parsing, global
//! configuration, and the source interfaces the resolver consumes.
//!
//! This crate is intentionally free of network and process I/O.

pub mod config;
pub mod dependency;
pub mod manifest;
pub mod source;
pub mod version;
