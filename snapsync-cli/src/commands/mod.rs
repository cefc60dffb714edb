pub mod code;
pub mod data;
pub mod launch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use snapsync_core::{config, ProjectRoot, SnapConfig};

/// Resolve the root, then load `--config` or `<root>/snapsync.yaml`.
pub(crate) fn load_root_and_config(
    root: &Path,
    config_file: Option<&PathBuf>,
) -> Result<(ProjectRoot, SnapConfig)> {
    let root = ProjectRoot::resolve(root)?;
    let cfg = match config_file {
        Some(path) => config::load_file(path),
        None => config::load_at(root.path()),
    }
    .context("failed to load configuration")?;
    Ok((root, cfg))
}
