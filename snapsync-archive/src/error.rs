//! Error types for snapsync-archive.

use std::path::PathBuf;

use thiserror::Error;

use snapsync_core::CoreError;

/// All errors that can arise while producing an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The project root is absent; nothing was written.
    #[error("project root not found or not a directory: {path}")]
    MissingProjectRoot { path: PathBuf },

    /// Creating the backup directory or writing the archive failed.
    /// No partial archive is left under the final name.
    #[error("failed to write archive {path}: {source}")]
    ArchiveWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An allow-list entry points outside the project root.
    #[error("include entry '{entry}' must be a relative path inside the project root")]
    InvalidEntry { entry: String },
}

impl ArchiveError {
    /// Stable label for status lines and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ArchiveError::MissingProjectRoot { .. } => "missing_project_root",
            ArchiveError::ArchiveWriteFailure { .. } => "archive_write_failure",
            ArchiveError::InvalidEntry { .. } => "invalid_entry",
        }
    }
}

impl From<CoreError> for ArchiveError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::MissingProjectRoot { path } => ArchiveError::MissingProjectRoot { path },
            CoreError::Io { path, source } => ArchiveError::ArchiveWriteFailure { path, source },
            other => ArchiveError::ArchiveWriteFailure {
                path: PathBuf::new(),
                source: std::io::Error::new(std::io::ErrorKind::Other, other.to_string()),
            },
        }
    }
}

/// Convenience constructor for [`ArchiveError::ArchiveWriteFailure`].
pub(crate) fn write_err(path: impl Into<PathBuf>, source: std::io::Error) -> ArchiveError {
    ArchiveError::ArchiveWriteFailure {
        path: path.into(),
        source,
    }
}
