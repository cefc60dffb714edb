//! # snapsync-vcs
//!
//! Stage an allow-list of source paths, commit when the index differs from
//! `HEAD`, push to a fixed remote branch.
//!
//! [`run_sync`] drives any [`VcsClient`]; [`GitCli`] is the implementation
//! backed by the system `git` binary.

pub mod client;
pub mod error;
pub mod patterns;
pub mod pusher;

pub use client::{ClientError, CommitId, GitCli, VcsClient};
pub use error::SyncError;
pub use pusher::{run_sync, run_sync_at, sync, SyncOutcome, SyncRequest};
