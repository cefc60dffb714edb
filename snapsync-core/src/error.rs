//! Error types for snapsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from root resolution and configuration loading.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The project root does not exist or is not a directory.
    #[error("project root not found or not a directory: {path}")]
    MissingProjectRoot { path: PathBuf },

    /// I/O failure with the offending path attached.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An explicitly requested config file is absent.
    #[error("config not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Config parsed but a value is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Unrecognised service name for the launch table.
    #[error("unknown service '{0}'; expected: bot, admin")]
    UnknownService(String),
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
