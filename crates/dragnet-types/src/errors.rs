//! Error types for Dragnet operations.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Dragnet operations.
///
/// Covers the full failure taxonomy of the provisioning lifecycle, from
/// missing collaborator tools to file-granular I/O problems. Most scanning
/// operations accumulate these rather than aborting on the first; the one
/// exception is [`DragnetError::ConfigSource`], which is fatal to the
/// Prepare/Init phase.
#[derive(Error, Debug)]
pub enum DragnetError {
    /// A required external tool binary is missing or unusable
    #[error("Tool not available: {0}")]
    ToolUnavailable(String),

    /// An external tool is installed but not authenticated
    #[error("Tool not authenticated: {0}")]
    ToolUnauthenticated(String),

    /// An external command ran but exited nonzero
    #[error("Command '{program}' failed (exit code {code:?})")]
    CommandFailed {
        /// Program that was invoked
        program: String,
        /// Exit code, if the process terminated normally
        code: Option<i32>,
    },

    /// Open/read/write failure for a single path
    #[error("File error for {}: {source}", path.display())]
    File {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The active variable-source file cannot be opened or parsed.
    ///
    /// Unlike file-granular errors, this aborts the Prepare/Init phase.
    #[error("Configuration source error: {0}")]
    ConfigSource(String),

    /// Environment materialization error
    #[error("Environment error: {0}")]
    Environment(String),

    /// Secret provisioning error
    #[error("Secret error: {0}")]
    Secret(String),

    /// Remote content fetch error
    #[error("Download error: {0}")]
    Download(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DragnetError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DragnetError::File {
            path: path.into(),
            source,
        }
    }
}

/// A specialized Result type for Dragnet operations.
pub type Result<T> = std::result::Result<T, DragnetError>;
