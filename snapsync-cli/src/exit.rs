//! Map command results onto process exit codes.
//!
//! | code | meaning                    |
//! |------|----------------------------|
//! | 0    | success                    |
//! | 1    | usage / config / other     |
//! | 2    | project root missing       |
//! | 3    | not a git work tree        |
//! | 4    | archive write failed       |
//! | 5    | staging failed             |
//! | 6    | commit failed              |
//! | 7    | push failed                |

use std::process::ExitCode;

use colored::Colorize;
use snapsync_archive::ArchiveError;
use snapsync_core::CoreError;
use snapsync_vcs::SyncError;

/// Print a failure line to stderr and convert to an exit code.
pub fn finish(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (kind, code) = classify(&err);
            eprintln!("{} [{kind}] {err:#}", "✗".red().bold());
            ExitCode::from(code)
        }
    }
}

/// Stable label and exit code for an error chain.
pub fn classify(err: &anyhow::Error) -> (&'static str, u8) {
    if let Some(e) = err.downcast_ref::<ArchiveError>() {
        let code = match e {
            ArchiveError::MissingProjectRoot { .. } => 2,
            ArchiveError::ArchiveWriteFailure { .. } => 4,
            ArchiveError::InvalidEntry { .. } => 1,
        };
        return (e.kind(), code);
    }
    if let Some(e) = err.downcast_ref::<SyncError>() {
        let code = match e {
            SyncError::MissingProjectRoot { .. } => 2,
            SyncError::NotAVersionControlRoot { .. } => 3,
            SyncError::StagingFailure { .. } => 5,
            SyncError::CommitFailure { .. } => 6,
            SyncError::PushFailure { .. } => 7,
            SyncError::Spawn { .. } => 1,
        };
        return (e.kind(), code);
    }
    if let Some(CoreError::MissingProjectRoot { .. }) = err.downcast_ref::<CoreError>() {
        return ("missing_project_root", 2);
    }
    if err.downcast_ref::<CoreError>().is_some() {
        return ("config_error", 1);
    }
    ("error", 1)
}
