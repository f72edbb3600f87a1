use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Output};

use crate::errors::PestoError;

/// Builder for constructing and executing external processes.
///
/// Provides a fluent API for setting program, arguments, environment variables, and working directory.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    cwd: Option<String>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: HashMap::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the working directory for the child process.
    pub fn cwd(mut self, dir: impl Into<String>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The command line as it would be typed in a shell, for messages.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Execute the command and return its output.
    pub fn exec(&self) -> Result<Output, PestoError> {
        tracing::debug!("Running {}", self.display());
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(Path::new(dir));
        }
        cmd.output().map_err(PestoError::from)
    }

    /// Execute the command, treating a non-zero exit status as a
    /// [`PestoError::SourceFetch`] that carries the process's stderr.
    pub fn exec_checked(&self) -> Result<Output, PestoError> {
        let output = self.exec().map_err(|e| PestoError::SourceFetch {
            message: format!("failed to run `{}`: {e}", self.display()),
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PestoError::SourceFetch {
                message: format!(
                    "`{}` exited with {}: {}",
                    self.display(),
                    output.status,
                    stderr.trim()
                ),
            });
        }
        Ok(output)
    }
}
