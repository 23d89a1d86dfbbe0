//! Error types for artifact discovery and option-cache maintenance.
//!
//! Completion itself never surfaces these: the cache degrades to stale or
//! empty suggestions. They reach the user only through the maintenance
//! subcommands.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while locating, probing, or caching.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The configured artifact pattern is not a valid regex.
    #[error("invalid artifact pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// No artifact matched in any search directory.
    #[error("no Detect artifact found in {searched}")]
    ArtifactNotFound { searched: String },

    /// The help program could not be started.
    #[error("failed to run '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The help program ran past the configured timeout and was killed.
    #[error("help invocation timed out after {secs}s")]
    HelpTimeout { secs: u64 },

    /// The help program exited unsuccessfully and printed nothing usable.
    #[error("help invocation failed: {0}")]
    HelpFailed(String),

    /// Help output contained no option names.
    #[error("no options found in help output of '{}'", artifact.display())]
    NoOptions { artifact: PathBuf },
}

/// Convenience alias for results with [`DiscoveryError`].
pub type Result<T> = std::result::Result<T, DiscoveryError>;
