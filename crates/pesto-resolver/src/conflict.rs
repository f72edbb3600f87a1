//! Reporting on dependencies that were requested in more than one way.

use std::fmt;

use crate::collector::{CollectedRequests, RequestedVersion};
use crate::resolver::ResolvedDependency;

/// Every dependency whose requesters disagreed on what they wanted.
#[derive(Debug, Default)]
pub struct ConflictReport {
    pub conflicts: Vec<RequestConflict>,
}

/// A dependency requested with several distinct constraints, and the one
/// version that was selected for all of them.
#[derive(Debug, Clone)]
pub struct RequestConflict {
    pub name: String,
    pub requested: Vec<String>,
    pub resolved: String,
    pub reason: String,
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the collected requests against the resolution outcome.
    pub fn detect(requests: &CollectedRequests, resolved: &[ResolvedDependency]) -> Self {
        let mut report = Self::new();
        for dep in resolved {
            let Some(requested) = requests.get(dep.name()) else {
                continue;
            };
            let mut constraints: Vec<String> = Vec::new();
            for request in requested {
                let rendered = match request {
                    RequestedVersion::Local { path, .. } => format!("path {path}"),
                    RequestedVersion::Remote { range, .. } => range.to_string(),
                };
                if !constraints.contains(&rendered) {
                    constraints.push(rendered);
                }
            }
            if constraints.len() < 2 {
                continue;
            }
            let reason = match dep {
                ResolvedDependency::Local { .. } => "path dependency overrides",
                ResolvedDependency::Remote { .. } => "lowest version in intersection",
            };
            report.add(RequestConflict {
                name: dep.name().to_string(),
                requested: constraints,
                resolved: dep.selection(),
                reason: reason.to_string(),
            });
        }
        report
    }

    pub fn add(&mut self, conflict: RequestConflict) {
        self.conflicts.push(conflict);
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conflicts.is_empty() {
            return write!(f, "No version conflicts.");
        }
        writeln!(f, "Version conflicts ({}):", self.conflicts.len())?;
        for c in &self.conflicts {
            writeln!(f, "  {c}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RequestConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} ({})",
            self.name,
            self.requested.join(", "),
            self.resolved,
            self.reason
        )
    }
}
