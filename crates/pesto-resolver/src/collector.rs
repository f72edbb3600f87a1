//! Transitive collection of every version request reachable from the root
//! manifest.

use std::collections::VecDeque;

use indexmap::IndexMap;
use petgraph::graph::NodeIndex;

use pesto_core::dependency::{DependencyDeclaration, Initializer};
use pesto_core::manifest::Manifest;
use pesto_core::source::{LocalSource, RemoteSource, SourceProvider};
use pesto_core::version::VersionRange;
use pesto_util::errors::PestoError;

use crate::cache::{SourceCache, VisitedSet};
use crate::graph::{RequestEdge, RequestGraph};

/// One request for a dependency, as declared by some manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedVersion {
    Local {
        name: String,
        path: String,
        initializer: Option<Initializer>,
    },
    Remote {
        name: String,
        url: String,
        range: VersionRange,
    },
}

impl RequestedVersion {
    pub fn name(&self) -> &str {
        match self {
            Self::Local { name, .. } | Self::Remote { name, .. } => name,
        }
    }
}

/// Every request grouped by dependency name, in order of first discovery.
pub type CollectedRequests = IndexMap<String, Vec<RequestedVersion>>;

/// The output of a collection pass.
pub struct Collection {
    pub requests: CollectedRequests,
    pub graph: RequestGraph,
}

struct WorkItem {
    requester: NodeIndex,
    declaration: DependencyDeclaration,
}

/// Walks declarations level by level, fetching each requested manifest and
/// recording a request under the name that manifest declares.
///
/// Every request made by one level is recorded before any request made by
/// the level below it, so names are discovered nearest-first.
pub struct GraphCollector<'c, P: SourceProvider> {
    sources: &'c mut SourceCache<P>,
    requests: CollectedRequests,
    graph: RequestGraph,
    root: NodeIndex,
    expanded: VisitedSet,
}

impl<'c, P: SourceProvider> GraphCollector<'c, P> {
    pub fn new(sources: &'c mut SourceCache<P>, root_name: &str) -> Self {
        let mut graph = RequestGraph::new();
        let root = graph.add_node(root_name);
        graph.set_root(root);
        Self {
            sources,
            requests: CollectedRequests::new(),
            graph,
            root,
            expanded: VisitedSet::new(),
        }
    }

    /// Visit `declarations` (made by the root) and everything they pull in.
    ///
    /// Each manifest's own declarations are expanded once per source and
    /// version, so cycles terminate; every occurrence is still recorded.
    pub fn collect(&mut self, declarations: &[DependencyDeclaration]) -> Result<(), PestoError> {
        let mut queue: VecDeque<WorkItem> = declarations
            .iter()
            .map(|declaration| WorkItem {
                requester: self.root,
                declaration: declaration.clone(),
            })
            .collect();

        while let Some(item) = queue.pop_front() {
            let (manifest, request, edge, source, version) = match item.declaration {
                DependencyDeclaration::Local { path } => {
                    let manifest = self.sources.local(&path)?.manifest()?;
                    let request = RequestedVersion::Local {
                        name: manifest.name.clone(),
                        path: path.clone(),
                        initializer: manifest.initializer.clone(),
                    };
                    let edge = RequestEdge {
                        constraint: format!("path {path}"),
                    };
                    (manifest, request, edge, path, String::new())
                }
                DependencyDeclaration::Remote { url, range } => {
                    let manifest = self.sources.remote(&url)?.manifest_at(range.lower())?;
                    let edge = RequestEdge {
                        constraint: range.to_string(),
                    };
                    let version = range.lower().to_string();
                    let request = RequestedVersion::Remote {
                        name: manifest.name.clone(),
                        url: url.clone(),
                        range,
                    };
                    (manifest, request, edge, url, version)
                }
            };

            tracing::debug!(
                "{} requests {} {}",
                self.graph.node(item.requester),
                manifest.name,
                edge.constraint
            );

            let node = self.graph.add_node(&manifest.name);
            self.graph.add_edge(item.requester, node, edge);
            self.requests
                .entry(manifest.name.clone())
                .or_default()
                .push(request);

            if !self.expanded.visit(&source, &version) {
                tracing::trace!("{} already expanded", manifest.name);
                continue;
            }
            for declaration in manifest.dependencies {
                queue.push_back(WorkItem {
                    requester: node,
                    declaration,
                });
            }
        }

        Ok(())
    }

    pub fn into_collection(self) -> Collection {
        Collection {
            requests: self.requests,
            graph: self.graph,
        }
    }
}

/// Collect every request reachable from `root`.
pub fn collect<P: SourceProvider>(
    root: &Manifest,
    sources: &mut SourceCache<P>,
) -> Result<Collection, PestoError> {
    let mut collector = GraphCollector::new(sources, &root.name);
    collector.collect(&root.dependencies)?;
    Ok(collector.into_collection())
}
