//! Handler for `pesto <MANIFEST>`.

use std::path::{Path, PathBuf};

use miette::Result;

use pesto_ops::ops_resolve::{self, ResolveOptions};
use pesto_util::errors::PestoError;

pub fn exec(
    manifest: &Path,
    out_dir: Option<PathBuf>,
    clone_dir: Option<PathBuf>,
    dry_run: bool,
    tree: bool,
    verbose: bool,
) -> Result<()> {
    if !manifest.is_file() {
        return Err(PestoError::ManifestParse {
            message: format!("No manifest found at {}", manifest.display()),
        }
        .into());
    }

    let opts = ResolveOptions {
        out_dir,
        clone_dir,
        dry_run,
        tree,
        verbose,
    };
    ops_resolve::resolve(manifest, &opts)
}
