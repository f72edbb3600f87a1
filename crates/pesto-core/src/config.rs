use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use pesto_util::errors::PestoError;

/// Global user configuration loaded from `~/.pesto/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Git settings from `[git]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_git_program")]
    pub program: String,
    /// Directory holding one clone per remote dependency.
    #[serde(default = "default_clone_dir", rename = "clone-dir")]
    pub clone_dir: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: default_git_program(),
            clone_dir: default_clone_dir(),
        }
    }
}

fn default_git_program() -> String {
    "git".to_string()
}

fn default_clone_dir() -> String {
    ".".to_string()
}

/// Generated file names from `[output]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_load_file", rename = "load-file")]
    pub load_file: String,
    #[serde(default = "default_init_file", rename = "init-file")]
    pub init_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            load_file: default_load_file(),
            init_file: default_init_file(),
        }
    }
}

fn default_load_file() -> String {
    "load.bzl".to_string()
}

fn default_init_file() -> String {
    "init.bzl".to_string()
}

impl GlobalConfig {
    /// Load the global configuration from `~/.pesto/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> Result<Self, PestoError> {
        Self::load_from(&Self::default_path())
    }

    /// Load the configuration from `path`, or return defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, PestoError> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| PestoError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        toml::from_str(&content).map_err(|e| PestoError::Config {
            message: format!("Failed to parse {}: {e}", path.display()),
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the pesto data directory: `$PESTO_HOME`, else `~/.pesto/`.
pub fn dirs_path() -> PathBuf {
    if let Ok(dir) = std::env::var("PESTO_HOME") {
        return PathBuf::from(dir);
    }
    pesto_util::fs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pesto")
}
