//! Request graph: who asked for which dependency, and with what constraint.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// Edge label: the constraint the requester placed on the dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEdge {
    /// A rendered range such as `[1.2, 2)`, or `path ../rules_local`.
    pub constraint: String,
}

/// Dependency names connected by the requests that introduced them,
/// backed by petgraph. Nodes are keyed by dependency name.
pub struct RequestGraph {
    graph: DiGraph<String, RequestEdge>,
    index: HashMap<String, NodeIndex>,
    pub root: Option<NodeIndex>,
}

impl RequestGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            root: None,
        }
    }

    /// Add or retrieve the node for `name`.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Set the root node of the graph (the root manifest).
    pub fn set_root(&mut self, idx: NodeIndex) {
        self.root = Some(idx);
    }

    /// Add a request edge from `from` to `to`. Only the first request
    /// between the same pair of nodes is kept.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: RequestEdge) {
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, edge);
        }
    }

    pub fn find(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Direct dependencies of a node, in the order they were requested.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<(NodeIndex, &RequestEdge)> {
        let mut deps: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.id(), e.target(), e.weight()))
            .collect();
        deps.sort_by_key(|(id, _, _)| *id);
        deps.into_iter().map(|(_, t, w)| (t, w)).collect()
    }

    /// Reverse dependencies (who requested this node).
    pub fn dependents_of(&self, idx: NodeIndex) -> Vec<(NodeIndex, &RequestEdge)> {
        let mut deps: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| (e.id(), e.source(), e.weight()))
            .collect();
        deps.sort_by_key(|(id, _, _)| *id);
        deps.into_iter().map(|(_, s, w)| (s, w)).collect()
    }

    /// Render the request tree. `selected` maps dependency names to the
    /// version (or `local`) chosen for them; repeated subtrees are marked `(*)`.
    pub fn print_tree(
        &self,
        selected: &HashMap<String, String>,
        max_depth: Option<usize>,
    ) -> String {
        let mut output = String::new();
        let Some(root) = self.root else {
            return output;
        };

        output.push_str(&format!("{}\n", self.graph[root]));

        let mut visited = HashSet::new();
        visited.insert(root);

        let deps = self.dependencies_of(root);
        let count = deps.len();
        for (i, (child, edge)) in deps.into_iter().enumerate() {
            self.print_subtree(
                &mut output,
                child,
                edge,
                "",
                i == count - 1,
                1,
                max_depth,
                selected,
                &mut visited,
            );
        }
        output
    }

    #[allow(clippy::too_many_arguments)]
    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        edge: &RequestEdge,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
        selected: &HashMap<String, String>,
        visited: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let name = &self.graph[idx];
        let mut line = format!("{prefix}{connector}{name} {}", edge.constraint);
        if let Some(version) = selected.get(name) {
            line.push_str(&format!(" => {version}"));
        }

        if !visited.insert(idx) {
            output.push_str(&format!("{line} (*)\n"));
            return;
        }
        output.push_str(&format!("{line}\n"));

        if max_depth.is_some_and(|max| depth >= max) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let deps = self.dependencies_of(idx);
        let count = deps.len();
        for (i, (child, child_edge)) in deps.into_iter().enumerate() {
            self.print_subtree(
                output,
                child,
                child_edge,
                &child_prefix,
                i == count - 1,
                depth + 1,
                max_depth,
                selected,
                visited,
            );
        }
    }
}

impl Default for RequestGraph {
    fn default() -> Self {
        Self::new()
    }
}
