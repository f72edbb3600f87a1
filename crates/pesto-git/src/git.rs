//! Thin wrappers over the `git` subcommands pesto needs.

use std::path::Path;

use pesto_util::errors::PestoError;
use pesto_util::process::CommandBuilder;

/// The git executable and the handful of commands run against a clone.
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
}

impl Default for Git {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Git {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn in_dir(&self, dir: &Path) -> CommandBuilder {
        CommandBuilder::new(&self.program)
            .arg("-C")
            .arg(dir.display().to_string())
    }

    /// `git clone <url> <dest>`
    pub fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), PestoError> {
        CommandBuilder::new(&self.program)
            .args(["clone", "--quiet", url])
            .arg(dest.display().to_string())
            .exec_checked()?;
        Ok(())
    }

    /// Refresh every tag from `origin`, moving any that were re-pointed upstream.
    pub fn fetch_tags(&self, dir: &Path) -> Result<(), PestoError> {
        self.in_dir(dir)
            .args(["fetch", "--quiet", "--tags", "--force", "origin"])
            .exec_checked()?;
        Ok(())
    }

    /// Raw `git show-ref --tags -d` output.
    ///
    /// A repository without tags makes `show-ref` exit with status 1 and no
    /// output; that is reported as an empty listing, not an error.
    pub fn show_ref_tags(&self, dir: &Path) -> Result<String, PestoError> {
        let cmd = self.in_dir(dir).args(["show-ref", "--tags", "-d"]);
        let output = cmd.exec().map_err(|e| PestoError::SourceFetch {
            message: format!("failed to run `{}`: {e}", cmd.display()),
        })?;
        if output.status.code() == Some(1) && output.stdout.is_empty() {
            return Ok(String::new());
        }
        if !output.status.success() {
            return Err(PestoError::SourceFetch {
                message: format!(
                    "`{}` exited with {}: {}",
                    cmd.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// `git checkout <revision>` (detaches HEAD).
    pub fn checkout(&self, dir: &Path, revision: &str) -> Result<(), PestoError> {
        self.in_dir(dir)
            .args(["checkout", "--quiet", revision])
            .exec_checked()?;
        Ok(())
    }
}
