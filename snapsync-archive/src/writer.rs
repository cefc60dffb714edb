//! Atomic `.tar.gz` writer.
//!
//! ## `write_archive` protocol
//!
//! 1. Create a uniquely named `.<name>.*.snapsync.tmp` beside the final path.
//! 2. Stream each entry into a gzip-compressed tar, root-relative names.
//! 3. Finish the gzip trailer and `fsync`.
//! 4. Hash the finished tmp file (SHA-256).
//! 5. Persist (rename) to the final path, replacing an existing file.
//!
//! Any failure drops the tmp file, which deletes it; the final name is only
//! ever bound to a complete archive. Concurrent writers never share a tmp file.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::error::{write_err, ArchiveError};

pub const TMP_SUFFIX: &str = ".snapsync.tmp";

/// Size and digest of a completed archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArchive {
    pub bytes: u64,
    pub sha256: String,
}

/// Write `entries` (root-relative) into a gzip tar at `final_path`.
///
/// Anything under `exclude` is left out, so the backup directory never
/// archives itself.
pub(crate) fn write_archive(
    root: &Path,
    entries: &[String],
    exclude: &Path,
    final_path: &Path,
) -> Result<WrittenArchive, ArchiveError> {
    let dir = final_path.parent().unwrap_or_else(|| Path::new("."));
    let name = final_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{name}."))
        .suffix(TMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| write_err(dir, e))?;

    let written = fill_tmp(&mut tmp, root, entries, exclude)?;
    tmp.persist(final_path)
        .map_err(|e| write_err(final_path, e.error))?;
    Ok(written)
}

fn fill_tmp(
    tmp: &mut NamedTempFile,
    root: &Path,
    entries: &[String],
    exclude: &Path,
) -> Result<WrittenArchive, ArchiveError> {
    let tmp_path = tmp.path().to_path_buf();
    let io = |e: std::io::Error| write_err(&tmp_path, e);

    {
        let encoder = GzEncoder::new(BufWriter::new(tmp.as_file_mut()), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder.follow_symlinks(false);

        for entry in entries {
            append_entry(&mut builder, root, entry, exclude).map_err(io)?;
        }

        let encoder = builder.into_inner().map_err(io)?;
        let mut buffered = encoder.finish().map_err(io)?;
        buffered.flush().map_err(io)?;
    }
    tmp.as_file().sync_all().map_err(io)?;

    let file = tmp.as_file_mut();
    file.seek(SeekFrom::Start(0)).map_err(io)?;
    digest(file).map_err(io)
}

fn append_entry<W: Write>(
    builder: &mut tar::Builder<W>,
    root: &Path,
    entry: &str,
    exclude: &Path,
) -> std::io::Result<()> {
    let walker = WalkDir::new(root.join(entry))
        .follow_links(false)
        .sort_by_file_name();
    for item in walker {
        let item = item.map_err(std::io::Error::from)?;
        let abs = item.path();
        if abs.starts_with(exclude) {
            continue;
        }
        let rel = abs
            .strip_prefix(root)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        // `.` as an entry walks the root itself, which has no name.
        if rel.as_os_str().is_empty() {
            continue;
        }
        tracing::trace!("adding {}", rel.display());
        builder.append_path_with_name(abs, rel)?;
    }
    Ok(())
}

fn digest(file: &mut File) -> std::io::Result<WrittenArchive> {
    let mut hasher = Sha256::new();
    let bytes = std::io::copy(file, &mut hasher)?;
    Ok(WrittenArchive {
        bytes,
        sha256: hex::encode(hasher.finalize()),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
