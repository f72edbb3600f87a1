use serde::{Deserialize, Serialize};

use pesto_util::errors::PestoError;

use crate::version::{Version, VersionRange};

/// A dependency declared in a `pesto.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyDeclaration {
    /// A directory on disk; only allowed in the root manifest.
    Local { path: String },
    /// A git repository constrained to a range of tagged versions.
    Remote { url: String, range: VersionRange },
}

/// A macro a dependency asks to have loaded and called after its rules are loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initializer {
    /// Label of the `.bzl` file defining the macro.
    pub path: String,
    /// Name of the macro to call.
    pub method: String,
}

/// How a remote dependency constrains its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    From(Version),
    UpToNextMajor(Version),
    UpToNextMinor(Version),
    Exact(Version),
}

impl VersionConstraint {
    pub fn to_range(&self) -> Result<VersionRange, PestoError> {
        match self {
            Self::From(v) => VersionRange::from_version(v.clone()),
            Self::UpToNextMajor(v) => VersionRange::up_to_next_major(v.clone()),
            Self::UpToNextMinor(v) => VersionRange::up_to_next_minor(v.clone()),
            Self::Exact(v) => Ok(VersionRange::exact(v.clone())),
        }
    }
}
