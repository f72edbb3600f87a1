//! Dependency sources backed by git repositories and local directories.
//!
//! [`provider::GitProvider`] is the production
//! [`SourceProvider`](pesto_core::source::SourceProvider): remote URLs are
//! cloned (or refreshed) under a clone directory and read tag by tag; path
//! dependencies are read straight from disk.

pub mod git;
pub mod local;
pub mod provider;
pub mod repository;
pub mod tags;
