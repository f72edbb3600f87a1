//! Per-run caches: opened sources keyed by identity, and the set of
//! manifests that have already been expanded.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use pesto_core::source::SourceProvider;
use pesto_util::errors::PestoError;

/// Opens each remote URL and local path at most once per run and hands
/// out the same handle on later lookups.
pub struct SourceCache<P: SourceProvider> {
    provider: P,
    remotes: HashMap<String, P::Remote>,
    locals: HashMap<String, P::Local>,
}

impl<P: SourceProvider> SourceCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            remotes: HashMap::new(),
            locals: HashMap::new(),
        }
    }

    /// The handle for `url`, opening it on first use.
    pub fn remote(&mut self, url: &str) -> Result<&mut P::Remote, PestoError> {
        match self.remotes.entry(url.to_string()) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                tracing::debug!("Opening remote source {url}");
                let source = self.provider.open_remote(url)?;
                Ok(e.insert(source))
            }
        }
    }

    /// The handle for the local directory `path`, opening it on first use.
    pub fn local(&mut self, path: &str) -> Result<&mut P::Local, PestoError> {
        match self.locals.entry(path.to_string()) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                tracing::debug!("Opening local source {path}");
                let source = self.provider.open_local(path)?;
                Ok(e.insert(source))
            }
        }
    }

    /// Number of distinct sources opened so far.
    pub fn len(&self) -> usize {
        self.remotes.len() + self.locals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tracks which (source, version) manifests have been expanded so that
/// cyclic or repeated requests don't re-walk the same subtree.
#[derive(Debug, Default)]
pub struct VisitedSet {
    visited: HashSet<(String, String)>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a manifest as expanded. Returns `false` if already visited.
    pub fn visit(&mut self, source: &str, version: &str) -> bool {
        self.visited
            .insert((source.to_string(), version.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visited_tracking() {
        let mut set = VisitedSet::new();
        assert!(set.visit("https://example.com/rules_a.git", "1.2"));
        assert!(!set.visit("https://example.com/rules_a.git", "1.2"));
        assert!(set.visit("https://example.com/rules_a.git", "1.3"));
    }

    #[test]
    fn source_and_version_are_kept_apart() {
        let mut set = VisitedSet::new();
        assert!(set.visit("rules_x@1", ""));
        assert!(set.visit("rules_x", "1"));
        assert!(set.visit("rules_x", "1@"));
        assert!(set.visit("rules_x@", "1"));
    }
}
