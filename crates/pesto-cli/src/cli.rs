//! CLI argument definitions for pesto.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "pesto",
    version,
    about = "Resolve Bazel external repositories declared in pesto.json",
    long_about = "Pesto walks the dependencies declared in a root pesto.json, picks one \
                  version of every dependency, and generates load.bzl and init.bzl for \
                  your WORKSPACE."
)]
pub struct Cli {
    /// Path to the root pesto.json
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Directory to write the generated files to [default: current directory]
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Directory holding git clones of remote dependencies
    #[arg(long, value_name = "DIR")]
    pub clone_dir: Option<PathBuf>,

    /// Print the generated files instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the dependency tree with the selected versions
    #[arg(long)]
    pub tree: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_options() {
        let cli = Cli::try_parse_from([
            "pesto",
            "deps/pesto.json",
            "-o",
            "third_party",
            "--clone-dir",
            "/tmp/clones",
            "--dry-run",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.manifest, PathBuf::from("deps/pesto.json"));
        assert_eq!(cli.out_dir, Some(PathBuf::from("third_party")));
        assert_eq!(cli.clone_dir, Some(PathBuf::from("/tmp/clones")));
        assert!(cli.dry_run);
        assert!(!cli.tree);
        assert!(cli.verbose);
    }

    #[test]
    fn manifest_is_required() {
        assert!(Cli::try_parse_from(["pesto"]).is_err());
    }
}
