use serde::Deserialize;
use std::path::Path;

use pesto_util::errors::PestoError;

use crate::dependency::{DependencyDeclaration, Initializer, VersionConstraint};
use crate::version::Version;

/// File name of a manifest inside a dependency's checkout or directory.
pub const MANIFEST_FILE: &str = "pesto.json";

/// Where a manifest sits in the graph. Only the root may declare path dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestRole {
    Root,
    Dependency,
}

/// The parsed representation of a `pesto.json` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: String,
    pub dependencies: Vec<DependencyDeclaration>,
    pub initializer: Option<Initializer>,
}

#[derive(Deserialize)]
struct RawManifest {
    name: String,
    #[serde(default)]
    deps: Vec<RawDependency>,
    #[serde(default)]
    initializer: Option<Initializer>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDependency {
    Remote(RawRemoteDependency),
    Local { path: String },
    Other(serde_json::Value),
}

#[derive(Deserialize)]
struct RawRemoteDependency {
    url: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    up_to_next_major: Option<String>,
    #[serde(default)]
    up_to_next_minor: Option<String>,
    #[serde(default)]
    exact: Option<String>,
}

impl RawRemoteDependency {
    fn constraint(&self) -> Result<VersionConstraint, PestoError> {
        let parse = |text: &str| {
            Version::parse(text).map_err(|e| PestoError::ManifestParse {
                message: format!("dependency `{}`: {e}", self.url),
            })
        };

        if let Some(ref v) = self.from {
            Ok(VersionConstraint::From(parse(v)?))
        } else if let Some(ref v) = self.up_to_next_major {
            Ok(VersionConstraint::UpToNextMajor(parse(v)?))
        } else if let Some(ref v) = self.up_to_next_minor {
            Ok(VersionConstraint::UpToNextMinor(parse(v)?))
        } else if let Some(ref v) = self.exact {
            Ok(VersionConstraint::Exact(parse(v)?))
        } else {
            Err(PestoError::VersionParse {
                message: format!("couldn't find any version declaration for `{}`", self.url),
            })
        }
    }
}

impl Manifest {
    /// Load and parse a `pesto.json` file from the given path.
    pub fn from_path(path: &Path, role: ManifestRole) -> Result<Self, PestoError> {
        let content = std::fs::read_to_string(path).map_err(|e| PestoError::ManifestParse {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse(&content, role)
    }

    /// Parse a `pesto.json` from a string.
    pub fn parse(content: &str, role: ManifestRole) -> Result<Self, PestoError> {
        let raw: RawManifest =
            serde_json::from_str(content).map_err(|e| PestoError::ManifestParse {
                message: format!("Failed to parse {MANIFEST_FILE}: {e}"),
            })?;

        let mut dependencies = Vec::with_capacity(raw.deps.len());
        for dep in raw.deps {
            match dep {
                RawDependency::Remote(remote) => {
                    let range = remote.constraint()?.to_range()?;
                    dependencies.push(DependencyDeclaration::Remote {
                        url: remote.url,
                        range,
                    });
                }
                RawDependency::Local { path } => {
                    if role != ManifestRole::Root {
                        return Err(PestoError::LocalDependencyNotAllowed {
                            manifest: raw.name,
                            path,
                        });
                    }
                    dependencies.push(DependencyDeclaration::Local { path });
                }
                RawDependency::Other(value) => {
                    let keyed = value
                        .as_object()
                        .is_some_and(|o| o.contains_key("url") || o.contains_key("path"));
                    if keyed {
                        return Err(PestoError::ManifestParse {
                            message: format!("malformed dependency in `{}`: {value}", raw.name),
                        });
                    }
                    tracing::warn!("Dependency type {value} not supported in `{}`", raw.name);
                }
            }
        }

        Ok(Self {
            name: raw.name,
            dependencies,
            initializer: raw.initializer,
        })
    }
}
