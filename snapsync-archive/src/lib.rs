//! # snapsync-archive
//!
//! Timestamped `.tar.gz` snapshots of a project's mutable state.
//!
//! Call [`run_backup`] with an [`ArchiveRequest`] to write one archive under
//! the project's backup directory. Allow-list entries that are absent on disk
//! are skipped and reported, never treated as errors.

pub mod backup;
pub mod error;
pub mod writer;

pub use backup::{
    archive_file_name, backup, run_backup, run_backup_at, ArchiveReport, ArchiveRequest,
    ARCHIVE_EXTENSION,
};
pub use error::ArchiveError;
