//! `backup-data` — snapshot mutable state into a timestamped archive.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use snapsync_archive::{run_backup, ArchiveReport, ArchiveRequest};

/// Archive the project's data directories into `<root>/<backup-dir>`.
#[derive(Parser, Debug)]
#[command(name = "backup-data", version, long_about = None)]
pub struct DataArgs {
    /// Project root directory.
    #[arg(long)]
    pub root: PathBuf,

    /// Backup directory name under the root (default: backups).
    #[arg(long)]
    pub backup_dir: Option<String>,

    /// Archive file-name prefix (default: backup).
    #[arg(long)]
    pub prefix: Option<String>,

    /// Root-relative path to include; repeat to replace the default allow-list.
    #[arg(long = "include", value_name = "PATH")]
    pub include: Vec<String>,

    /// Config file (default: <root>/snapsync.yaml if present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the report as JSON instead of the bare archive path.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Debug, Serialize)]
struct DataJson<'a> {
    path: String,
    included: &'a [String],
    skipped: &'a [String],
    bytes: u64,
    sha256: &'a str,
}

impl DataArgs {
    pub fn run(self) -> Result<()> {
        let (root, cfg) = super::load_root_and_config(&self.root, self.config.as_ref())?;

        let mut data = cfg.data;
        if let Some(dir) = self.backup_dir {
            data.backup_dir = dir;
        }
        if let Some(prefix) = self.prefix {
            data.prefix = prefix;
        }
        if !self.include.is_empty() {
            data.include = self.include;
        }
        data.validate()?;

        let report = run_backup(&ArchiveRequest::from_config(root, &data))?;
        print_report(&report, self.json)
    }
}

fn print_report(report: &ArchiveReport, json: bool) -> Result<()> {
    if json {
        let out = DataJson {
            path: report.path.display().to_string(),
            included: &report.included,
            skipped: &report.skipped,
            bytes: report.bytes,
            sha256: &report.sha256,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", report.path.display());
    }
    Ok(())
}
