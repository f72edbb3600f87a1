//! Interfaces to the places manifests and versions come from.
//!
//! The resolver only talks to these traits; `pesto-git` provides the
//! git- and filesystem-backed implementations.

use pesto_util::errors::PestoError;

use crate::manifest::Manifest;
use crate::version::Version;

/// A versioned remote repository, e.g. a git URL with release tags.
pub trait RemoteSource {
    /// The URL this source was opened from.
    fn url(&self) -> &str;

    /// Every tagged version, sorted ascending.
    fn versions(&self) -> Vec<Version>;

    /// The manifest as of `version`.
    fn manifest_at(&mut self, version: &Version) -> Result<Manifest, PestoError>;

    /// The opaque revision (e.g. a commit hash) that `version` points at.
    fn revision_for(&self, version: &Version) -> Result<String, PestoError>;
}

/// A dependency living in a directory on disk.
pub trait LocalSource {
    /// The path as declared in the root manifest.
    fn path(&self) -> &str;

    fn manifest(&mut self) -> Result<Manifest, PestoError>;
}

/// Opens sources by URL or path. Implementations need not cache; the
/// resolver opens each URL or path at most once per run.
pub trait SourceProvider {
    type Remote: RemoteSource;
    type Local: LocalSource;

    fn open_remote(&self, url: &str) -> Result<Self::Remote, PestoError>;

    fn open_local(&self, path: &str) -> Result<Self::Local, PestoError>;
}
