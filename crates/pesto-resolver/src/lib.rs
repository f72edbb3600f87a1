//! Dependency resolution: level-order collection of every version request,
//! then lowest-satisfying-tag selection per dependency name.

pub mod cache;
pub mod collector;
pub mod conflict;
pub mod graph;
pub mod resolver;

pub use cache::SourceCache;
pub use collector::{collect, Collection, GraphCollector, RequestedVersion};
pub use resolver::{resolve, ResolvedDependency};
