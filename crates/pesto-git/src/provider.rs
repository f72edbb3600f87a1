use std::path::PathBuf;

use pesto_core::config::GitConfig;
use pesto_core::source::SourceProvider;
use pesto_util::errors::PestoError;
use pesto_util::fs::{ensure_dir, expand_home};

use crate::git::Git;
use crate::local::LocalDirectory;
use crate::repository::GitRepository;

/// Opens remote dependencies as git clones and path dependencies as directories.
#[derive(Debug, Clone)]
pub struct GitProvider {
    git: Git,
    clone_root: PathBuf,
    base_dir: PathBuf,
}

impl GitProvider {
    /// `clone_root` holds one clone per remote URL; relative path
    /// dependencies are looked up from `base_dir` (the root manifest's directory).
    pub fn new(git: Git, clone_root: impl Into<PathBuf>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            git,
            clone_root: clone_root.into(),
            base_dir: base_dir.into(),
        }
    }

    pub fn from_config(config: &GitConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self::new(
            Git::new(config.program.clone()),
            expand_home(&config.clone_dir),
            base_dir,
        )
    }
}

impl SourceProvider for GitProvider {
    type Remote = GitRepository;
    type Local = LocalDirectory;

    fn open_remote(&self, url: &str) -> Result<GitRepository, PestoError> {
        ensure_dir(&self.clone_root)?;
        GitRepository::open(&self.git, url, &self.clone_root)
    }

    fn open_local(&self, path: &str) -> Result<LocalDirectory, PestoError> {
        LocalDirectory::open(path, &self.base_dir)
    }
}
