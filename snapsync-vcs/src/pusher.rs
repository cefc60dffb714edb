//! `run_sync` — stage, diff, commit, push.
//!
//! Steps run strictly in order and each one gates the next:
//!
//! 1. root still exists and is inside a work tree
//! 2. resolve the allow-list and stage it
//! 3. no allow-listed path differs from `HEAD` → [`SyncOutcome::NothingToCommit`], stop
//! 4. commit those paths only, with a timestamped message
//! 5. push `HEAD` to `<remote>/<branch>`

use std::path::Path;

use snapsync_core::{CodeConfig, ProjectRoot, Stamp};
use tracing::{debug, info};

use crate::client::{CommitId, GitCli, VcsClient};
use crate::error::SyncError;
use crate::patterns;

/// Everything the Sync-Pusher needs; built from [`CodeConfig`] plus CLI overrides.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub root: ProjectRoot,
    pub remote: String,
    pub branch: String,
    pub include: Vec<String>,
}

impl SyncRequest {
    pub fn from_config(root: ProjectRoot, code: &CodeConfig) -> Self {
        Self {
            root,
            remote: code.remote.clone(),
            branch: code.branch.clone(),
            include: code.include.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No allow-listed path differs from `HEAD`; no commit, remote not contacted.
    NothingToCommit,
    /// One new commit, accepted by the remote.
    Pushed(CommitId),
}

/// Resolve `root_path` and sync it with the system `git`.
pub fn sync(
    root_path: &Path,
    remote: &str,
    branch: &str,
    include: &[String],
) -> Result<SyncOutcome, SyncError> {
    let root = ProjectRoot::resolve(root_path)?;
    let client = GitCli::new(root.path());
    let req = SyncRequest {
        root,
        remote: remote.to_string(),
        branch: branch.to_string(),
        include: include.to_vec(),
    };
    run_sync(&req, &client)
}

pub fn run_sync<C: VcsClient>(req: &SyncRequest, client: &C) -> Result<SyncOutcome, SyncError> {
    run_sync_at(req, client, Stamp::now())
}

pub fn run_sync_at<C: VcsClient>(
    req: &SyncRequest,
    client: &C,
    stamp: Stamp,
) -> Result<SyncOutcome, SyncError> {
    if !req.root.exists() {
        return Err(SyncError::MissingProjectRoot {
            path: req.root.path().to_path_buf(),
        });
    }
    let is_tree = client
        .is_work_tree()
        .map_err(|e| SyncError::from_client(e, |detail| SyncError::StagingFailure { detail }))?;
    if !is_tree {
        return Err(SyncError::NotAVersionControlRoot {
            path: req.root.path().to_path_buf(),
        });
    }

    let paths = patterns::resolve(req.root.path(), &req.include)?;
    if paths.is_empty() {
        info!("allow-list matched nothing in {}", req.root);
        return Ok(SyncOutcome::NothingToCommit);
    }
    debug!("staging {} path(s)", paths.len());
    client
        .stage(&paths)
        .map_err(|e| SyncError::from_client(e, |detail| SyncError::StagingFailure { detail }))?;

    let changed = client
        .staged_paths(&paths)
        .map_err(|e| SyncError::from_client(e, |detail| SyncError::StagingFailure { detail }))?;
    if changed.is_empty() {
        info!("nothing to commit in {}", req.root);
        return Ok(SyncOutcome::NothingToCommit);
    }

    let commit = client
        .commit(&stamp.commit_message(), &changed)
        .map_err(|e| SyncError::from_client(e, |detail| SyncError::CommitFailure { detail }))?;
    info!("committed {}", commit.short());

    client.push(&req.remote, &req.branch).map_err(|e| {
        SyncError::from_client(e, |detail| SyncError::PushFailure {
            commit: commit.clone(),
            remote: req.remote.clone(),
            branch: req.branch.clone(),
            detail,
        })
    })?;
    info!("pushed {} to {}/{}", commit.short(), req.remote, req.branch);
    Ok(SyncOutcome::Pushed(commit))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
