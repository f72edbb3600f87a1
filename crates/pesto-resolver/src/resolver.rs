//! Version selection: one concrete answer per requested dependency name.

use pesto_core::dependency::Initializer;
use pesto_core::source::{RemoteSource, SourceProvider};
use pesto_core::version::{Version, VersionRange};
use pesto_util::errors::PestoError;

use crate::cache::SourceCache;
use crate::collector::{Collection, RequestedVersion};
use crate::graph::RequestGraph;

/// The selected source for a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedDependency {
    Local {
        name: String,
        path: String,
        initializer: Option<Initializer>,
    },
    Remote {
        name: String,
        url: String,
        revision: String,
        version: Version,
        initializer: Option<Initializer>,
    },
}

impl ResolvedDependency {
    pub fn name(&self) -> &str {
        match self {
            Self::Local { name, .. } | Self::Remote { name, .. } => name,
        }
    }

    pub fn initializer(&self) -> Option<&Initializer> {
        match self {
            Self::Local { initializer, .. } | Self::Remote { initializer, .. } => {
                initializer.as_ref()
            }
        }
    }

    /// `local` for path dependencies, the selected version otherwise.
    pub fn selection(&self) -> String {
        match self {
            Self::Local { .. } => "local".to_string(),
            Self::Remote { version, .. } => version.to_string(),
        }
    }
}

/// Pick a version for every collected name, preserving discovery order.
///
/// A path request overrides all remote requests for the same name. Otherwise
/// the lowest tagged version inside the intersection of every requested
/// range wins.
pub fn resolve<P: SourceProvider>(
    collection: &Collection,
    sources: &mut SourceCache<P>,
) -> Result<Vec<ResolvedDependency>, PestoError> {
    let mut resolved = Vec::with_capacity(collection.requests.len());

    for (name, requested) in &collection.requests {
        let local = requested.iter().find_map(|r| match r {
            RequestedVersion::Local {
                path, initializer, ..
            } => Some((path, initializer)),
            RequestedVersion::Remote { .. } => None,
        });
        if let Some((path, initializer)) = local {
            if requested.len() > 1 {
                tracing::debug!(
                    "{name}: path {path} overrides {} other request(s)",
                    requested.len() - 1
                );
            }
            resolved.push(ResolvedDependency::Local {
                name: name.clone(),
                path: path.clone(),
                initializer: initializer.clone(),
            });
            continue;
        }

        let remotes: Vec<(&str, &VersionRange)> = requested
            .iter()
            .filter_map(|r| match r {
                RequestedVersion::Remote { url, range, .. } => Some((url.as_str(), range)),
                RequestedVersion::Local { .. } => None,
            })
            .collect();
        let Some(&(url, first)) = remotes.first() else {
            continue;
        };
        for &(other, _) in &remotes[1..] {
            if other != url {
                tracing::warn!("{name} is requested from both {url} and {other}; using {url}");
            }
        }

        let range = VersionRange::intersect(first, remotes[1..].iter().map(|&(_, r)| r));
        let source = sources.remote(url)?;
        let Some(version) = source.versions().into_iter().find(|v| range.contains(v)) else {
            let ranges: Vec<&VersionRange> = remotes.iter().map(|&(_, r)| r).collect();
            return Err(PestoError::Resolution {
                name: name.clone(),
                range: range.to_string(),
                requested: describe_requesters(&collection.graph, name, &ranges),
            });
        };

        tracing::debug!("{name}: selected {version} from {range}");
        let revision = source.revision_for(&version)?;
        let initializer = source.manifest_at(&version)?.initializer;
        resolved.push(ResolvedDependency::Remote {
            name: name.clone(),
            url: url.to_string(),
            revision,
            version,
            initializer,
        });
    }

    Ok(resolved)
}

/// `rules_a requires [1, 2), rules_b requires [1.5, 3)` for every manifest
/// that asked for `name`. Falls back to the bare ranges when the graph has
/// no record of the requesters.
fn describe_requesters(graph: &RequestGraph, name: &str, ranges: &[&VersionRange]) -> String {
    let requesters: Vec<String> = graph
        .find(name)
        .map(|idx| {
            graph
                .dependents_of(idx)
                .into_iter()
                .map(|(from, edge)| format!("{} requires {}", graph.node(from), edge.constraint))
                .collect()
        })
        .unwrap_or_default();
    if requesters.is_empty() {
        ranges
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        requesters.join(", ")
    }
}
