//! Command dispatch and handler modules.

mod resolve;

use miette::Result;

use crate::cli::Cli;

/// Route a parsed CLI invocation to the command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    resolve::exec(
        &cli.manifest,
        cli.out_dir,
        cli.clone_dir,
        cli.dry_run,
        cli.tree,
        cli.verbose,
    )
}
