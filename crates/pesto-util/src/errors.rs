use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all pesto operations.
#[derive(Debug, Error, Diagnostic)]
pub enum PestoError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. pesto.json).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your pesto.json for syntax errors"))]
    ManifestParse { message: String },

    /// A path dependency was declared outside the root manifest.
    #[error("Local dependency `{path}` is not allowed in manifest `{manifest}`")]
    #[diagnostic(help("Path dependencies may only be declared in the root manifest"))]
    LocalDependencyNotAllowed { manifest: String, path: String },

    /// A version string or version constraint could not be understood.
    #[error("Version error: {message}")]
    #[diagnostic(help(
        "Declare the version with one of `from`, `up_to_next_major`, `up_to_next_minor` or `exact`"
    ))]
    VersionParse { message: String },

    /// A git or filesystem source could not be read.
    #[error("Source error: {message}")]
    SourceFetch { message: String },

    /// No available version satisfies every requester of a dependency.
    #[error("Dependency resolution failed: no available version of `{name}` satisfies {range}")]
    #[diagnostic(help("Requested by: {requested}"))]
    Resolution {
        name: String,
        range: String,
        requested: String,
    },

    /// Invalid global configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },
}
