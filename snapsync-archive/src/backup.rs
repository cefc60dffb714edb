//! `run_backup` — one timestamped archive per invocation.

use std::path::{Path, PathBuf};

use snapsync_core::root::is_contained_relative;
use snapsync_core::{DataConfig, ProjectRoot, Stamp};

use crate::error::{write_err, ArchiveError};
use crate::writer;

pub const ARCHIVE_EXTENSION: &str = "tar.gz";

/// Everything the Archiver needs; built from [`DataConfig`] plus CLI overrides.
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    pub root: ProjectRoot,
    pub backup_dir: String,
    pub prefix: String,
    pub include: Vec<String>,
}

impl ArchiveRequest {
    pub fn from_config(root: ProjectRoot, data: &DataConfig) -> Self {
        Self {
            root,
            backup_dir: data.backup_dir.clone(),
            prefix: data.prefix.clone(),
            include: data.include.clone(),
        }
    }

    /// `<root>/<backup_dir>`
    pub fn backup_dir_path(&self) -> PathBuf {
        self.root.join(&self.backup_dir)
    }
}

/// Outcome of a successful backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    /// Absolute path of the new archive.
    pub path: PathBuf,
    /// Allow-list entries present on disk and archived.
    pub included: Vec<String>,
    /// Allow-list entries absent on disk (or inside the backup dir).
    pub skipped: Vec<String>,
    pub bytes: u64,
    pub sha256: String,
}

/// `<prefix>-<YYYYMMDD-HHMM>.tar.gz`
pub fn archive_file_name(prefix: &str, stamp: &Stamp) -> String {
    format!("{prefix}-{}.{ARCHIVE_EXTENSION}", stamp.archive_suffix())
}

/// Resolve `root_path` and archive `include` into `<root>/<backup_dir>` with
/// the default `backup` prefix.
pub fn backup(
    root_path: &Path,
    backup_dir: &str,
    include: &[String],
) -> Result<ArchiveReport, ArchiveError> {
    let root = ProjectRoot::resolve(root_path)?;
    run_backup(&ArchiveRequest {
        root,
        backup_dir: backup_dir.to_string(),
        prefix: DataConfig::default().prefix,
        include: include.to_vec(),
    })
}

/// Write one archive stamped with the current local time.
pub fn run_backup(req: &ArchiveRequest) -> Result<ArchiveReport, ArchiveError> {
    run_backup_at(req, Stamp::now())
}

/// Write one archive stamped with `stamp`.
///
/// Steps are strictly sequential: root check → entry validation → backup dir
/// creation → archive write. A failure at any step leaves no archive behind.
pub fn run_backup_at(req: &ArchiveRequest, stamp: Stamp) -> Result<ArchiveReport, ArchiveError> {
    if !req.root.exists() {
        return Err(ArchiveError::MissingProjectRoot {
            path: req.root.path().to_path_buf(),
        });
    }

    if let Some(bad) = req.include.iter().find(|e| !is_contained_relative(e)) {
        return Err(ArchiveError::InvalidEntry { entry: bad.clone() });
    }
    if !is_contained_relative(&req.backup_dir) {
        return Err(ArchiveError::InvalidEntry {
            entry: req.backup_dir.clone(),
        });
    }

    let backup_dir = req.backup_dir_path();
    let (included, skipped) = partition_entries(req.root.path(), &req.include, &backup_dir);
    for entry in &skipped {
        tracing::debug!("skipping absent entry: {entry}");
    }
    if included.is_empty() {
        tracing::warn!(
            "none of the include entries exist under {}; writing an empty archive",
            req.root
        );
    }

    std::fs::create_dir_all(&backup_dir).map_err(|e| write_err(&backup_dir, e))?;

    let path = backup_dir.join(archive_file_name(&req.prefix, &stamp));
    if path.exists() {
        tracing::info!("replacing archive from the same minute: {}", path.display());
    }
    let written = writer::write_archive(req.root.path(), &included, &backup_dir, &path)?;

    tracing::info!(
        bytes = written.bytes,
        sha256 = %written.sha256,
        "wrote archive: {}",
        path.display()
    );
    Ok(ArchiveReport {
        path,
        included,
        skipped,
        bytes: written.bytes,
        sha256: written.sha256,
    })
}

/// Split the allow-list into entries present on disk and entries to skip.
///
/// Absence is checked without following symlinks, so a dangling link is still
/// archived as a link. Entries at or below the backup dir are skipped.
fn partition_entries(
    root: &Path,
    include: &[String],
    backup_dir: &Path,
) -> (Vec<String>, Vec<String>) {
    let mut included = Vec::new();
    let mut skipped = Vec::new();
    for entry in include {
        if included.contains(entry) || skipped.contains(entry) {
            continue;
        }
        let abs = root.join(entry);
        if abs.starts_with(backup_dir) || std::fs::symlink_metadata(&abs).is_err() {
            skipped.push(entry.clone());
        } else {
            included.push(entry.clone());
        }
    }
    (included, skipped)
}
