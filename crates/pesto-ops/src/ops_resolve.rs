//! Operation: resolve a root manifest and generate `load.bzl` / `init.bzl`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pesto_core::config::GlobalConfig;
use pesto_core::manifest::{Manifest, ManifestRole};
use pesto_git::provider::GitProvider;
use pesto_resolver::conflict::ConflictReport;
use pesto_resolver::{collect, resolve as resolve_requests, SourceCache};
use pesto_util::errors::PestoError;
use pesto_util::fs::write_file;
use pesto_util::progress::{status, status_info};

use crate::emit::{render_init_file, render_load_file};

/// Options for `pesto <MANIFEST>`.
#[derive(Debug, Default)]
pub struct ResolveOptions {
    /// Directory the generated files are written to (default: current directory).
    pub out_dir: Option<PathBuf>,
    /// Overrides `[git] clone-dir` from the global config.
    pub clone_dir: Option<PathBuf>,
    /// Print the generated files instead of writing them.
    pub dry_run: bool,
    /// Print the request tree with the selected versions.
    pub tree: bool,
    pub verbose: bool,
}

/// Resolve every dependency reachable from `manifest_path` and emit the
/// generated Starlark files.
pub fn resolve(manifest_path: &Path, opts: &ResolveOptions) -> miette::Result<()> {
    let config = GlobalConfig::load()?;
    resolve_with_config(manifest_path, &config, opts)
}

pub fn resolve_with_config(
    manifest_path: &Path,
    config: &GlobalConfig,
    opts: &ResolveOptions,
) -> miette::Result<()> {
    let root = Manifest::from_path(manifest_path, ManifestRole::Root)?;

    let base_dir = manifest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut git_config = config.git.clone();
    if let Some(ref dir) = opts.clone_dir {
        git_config.clone_dir = dir.display().to_string();
    }
    let mut sources = SourceCache::new(GitProvider::from_config(&git_config, base_dir));

    status("Collecting", &format!("dependencies of {}", root.name));
    let collection = collect(&root, &mut sources)?;
    tracing::debug!(
        "{} names requested from {} source(s)",
        collection.requests.len(),
        sources.len()
    );
    let resolved = resolve_requests(&collection, &mut sources)?;

    for dep in &resolved {
        tracing::debug!("{} => {}", dep.name(), dep.selection());
    }

    let conflicts = ConflictReport::detect(&collection.requests, &resolved);
    if opts.verbose && !conflicts.is_empty() {
        eprintln!("{conflicts}");
    }

    if opts.tree {
        let selected: HashMap<String, String> = resolved
            .iter()
            .map(|d| (d.name().to_string(), d.selection()))
            .collect();
        print!("{}", collection.graph.print_tree(&selected, None));
    }

    let load = render_load_file(&resolved);
    let init = render_init_file(&resolved);

    if opts.dry_run {
        println!("# --- {} ---", config.output.load_file);
        print!("{load}");
        println!("# --- {} ---", config.output.init_file);
        print!("{init}");
    } else {
        let out_dir = opts.out_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        for (file, contents) in [
            (&config.output.load_file, &load),
            (&config.output.init_file, &init),
        ] {
            let path = out_dir.join(file);
            write_file(&path, contents).map_err(PestoError::Io)?;
            status_info("Writing", &path.display().to_string());
        }
    }

    status(
        "Resolved",
        &format!(
            "{} dependenc{}",
            resolved.len(),
            if resolved.len() == 1 { "y" } else { "ies" }
        ),
    );
    Ok(())
}
