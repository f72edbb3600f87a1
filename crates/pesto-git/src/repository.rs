//! A remote dependency cloned into a local working copy.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use pesto_core::manifest::{Manifest, ManifestRole, MANIFEST_FILE};
use pesto_core::source::RemoteSource;
use pesto_core::version::Version;
use pesto_util::errors::PestoError;
use pesto_util::hash::short_digest;
use pesto_util::progress;

use crate::git::Git;
use crate::tags;

/// A git repository whose tags are the dependency's released versions.
#[derive(Debug)]
pub struct GitRepository {
    url: String,
    dir: PathBuf,
    git: Git,
    revisions: BTreeMap<Version, String>,
    manifests: HashMap<Version, Manifest>,
}

impl GitRepository {
    /// Clone `url` under `clone_root` (or refresh an existing clone) and
    /// read its tags.
    pub fn open(git: &Git, url: &str, clone_root: &Path) -> Result<Self, PestoError> {
        let dir = clone_root.join(checkout_dir_name(url));
        if dir.exists() {
            progress::status("Updating", url);
            git.fetch_tags(&dir)?;
        } else {
            let pb = progress::spinner(&format!("Cloning {url}"));
            let cloned = git.clone_repo(url, &dir);
            pb.finish_and_clear();
            cloned?;
            progress::status("Cloned", url);
        }

        let revisions = tags::parse_show_ref(&git.show_ref_tags(&dir)?);
        tracing::debug!("{url}: {} tagged versions", revisions.len());

        Ok(Self {
            url: url.to_string(),
            dir,
            git: git.clone(),
            revisions,
            manifests: HashMap::new(),
        })
    }

}

impl RemoteSource for GitRepository {
    fn url(&self) -> &str {
        &self.url
    }

    fn versions(&self) -> Vec<Version> {
        self.revisions.keys().cloned().collect()
    }

    fn manifest_at(&mut self, version: &Version) -> Result<Manifest, PestoError> {
        if let Some(manifest) = self.manifests.get(version) {
            return Ok(manifest.clone());
        }

        let revision = self.revision_for(version)?;
        self.git.checkout(&self.dir, &revision)?;
        let manifest = Manifest::from_path(&self.dir.join(MANIFEST_FILE), ManifestRole::Dependency)?;
        tracing::debug!("{}@{version}: manifest `{}`", self.url, manifest.name);

        self.manifests.insert(version.clone(), manifest.clone());
        Ok(manifest)
    }

    fn revision_for(&self, version: &Version) -> Result<String, PestoError> {
        self.revisions
            .get(version)
            .cloned()
            .ok_or_else(|| PestoError::SourceFetch {
                message: format!("{} has no tag for version {version}", self.url),
            })
    }
}

/// Directory name used for the clone of `url`: its last path segment plus a
/// digest of the whole URL, so two remotes sharing a basename never share a
/// working copy.
pub fn checkout_dir_name(url: &str) -> String {
    format!("{}-{}", checkout_name(url), short_digest(url, 12))
}

/// The last path segment of `url`, without a `.git` suffix.
pub fn checkout_name(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let name = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed)
        .trim_end_matches(".git");
    if name.is_empty() {
        "repo".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_names() {
        assert_eq!(checkout_name("https://github.com/org/rules_foo"), "rules_foo");
        assert_eq!(checkout_name("https://github.com/org/rules_foo.git"), "rules_foo");
        assert_eq!(checkout_name("https://github.com/org/rules_foo/"), "rules_foo");
        assert_eq!(checkout_name("git@github.com:rules_bar.git"), "rules_bar");
        assert_eq!(checkout_name("/srv/git/rules_baz"), "rules_baz");
        assert_eq!(checkout_name(""), "repo");
    }

    #[test]
    fn checkout_dirs_differ_per_url() {
        let first = checkout_dir_name("https://a.example.com/org1/rules_foo");
        let second = checkout_dir_name("https://b.example.com/org2/rules_foo");
        assert!(first.starts_with("rules_foo-"));
        assert!(second.starts_with("rules_foo-"));
        assert_ne!(first, second);
        assert_eq!(first.len(), "rules_foo-".len() + 12);
    }
}
