//! Error types for snapsync-vcs.

use std::path::PathBuf;

use thiserror::Error;

use snapsync_core::CoreError;

use crate::client::{ClientError, CommitId};

/// All errors that can arise from a sync run. Each variant names the step
/// that failed so the operator knows what to retry.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("project root not found or not a directory: {path}")]
    MissingProjectRoot { path: PathBuf },

    #[error("not a git work tree: {path}")]
    NotAVersionControlRoot { path: PathBuf },

    /// Pattern resolution or `git add` failed. Nothing was committed.
    #[error("staging failed: {detail}")]
    StagingFailure { detail: String },

    /// `git commit` failed. Staged changes are left in the index.
    #[error("commit failed (changes left staged): {detail}")]
    CommitFailure { detail: String },

    /// The local commit exists but the remote did not accept it. Retry the
    /// push only.
    #[error("commit {commit} created locally but push to {remote}/{branch} failed: {detail}")]
    PushFailure {
        commit: CommitId,
        remote: String,
        branch: String,
        detail: String,
    },

    /// The `git` binary could not be started at all.
    #[error("cannot run git: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Stable label for status lines and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::MissingProjectRoot { .. } => "missing_project_root",
            SyncError::NotAVersionControlRoot { .. } => "not_a_version_control_root",
            SyncError::StagingFailure { .. } => "staging_failure",
            SyncError::CommitFailure { .. } => "commit_failure",
            SyncError::PushFailure { .. } => "push_failure",
            SyncError::Spawn { .. } => "spawn_failure",
        }
    }

    /// Map a client error into the step-specific variant built by `phase`.
    pub(crate) fn from_client(err: ClientError, phase: impl FnOnce(String) -> SyncError) -> Self {
        match err {
            ClientError::Spawn { source, .. } => SyncError::Spawn { source },
            failed => phase(failed.to_string()),
        }
    }
}

impl From<CoreError> for SyncError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::MissingProjectRoot { path } => SyncError::MissingProjectRoot { path },
            other => SyncError::StagingFailure {
                detail: other.to_string(),
            },
        }
    }
}
