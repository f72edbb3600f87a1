//! A dependency read directly from a directory on disk.

use std::path::{Path, PathBuf};

use pesto_core::manifest::{Manifest, ManifestRole, MANIFEST_FILE};
use pesto_core::source::LocalSource;
use pesto_util::errors::PestoError;

#[derive(Debug)]
pub struct LocalDirectory {
    declared: String,
    dir: PathBuf,
    manifest: Option<Manifest>,
}

impl LocalDirectory {
    /// Open the directory `declared`, relative paths being taken from `base_dir`.
    pub fn open(declared: &str, base_dir: &Path) -> Result<Self, PestoError> {
        let dir = base_dir.join(declared);
        if !dir.is_dir() {
            return Err(PestoError::SourceFetch {
                message: format!(
                    "local dependency `{declared}` not found at {}",
                    dir.display()
                ),
            });
        }
        Ok(Self {
            declared: declared.to_string(),
            dir,
            manifest: None,
        })
    }
}

impl LocalSource for LocalDirectory {
    fn path(&self) -> &str {
        &self.declared
    }

    fn manifest(&mut self) -> Result<Manifest, PestoError> {
        if let Some(ref manifest) = self.manifest {
            return Ok(manifest.clone());
        }
        let manifest =
            Manifest::from_path(&self.dir.join(MANIFEST_FILE), ManifestRole::Dependency)?;
        self.manifest = Some(manifest.clone());
        Ok(manifest)
    }
}
