//! `backup-code` — commit allow-listed source changes and push them.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use snapsync_vcs::{run_sync, GitCli, SyncOutcome, SyncRequest};

/// Stage the source allow-list, commit if anything changed, push.
#[derive(Parser, Debug)]
#[command(name = "backup-code", version, long_about = None)]
pub struct CodeArgs {
    /// Project root (a git work tree).
    #[arg(long)]
    pub root: PathBuf,

    /// Remote to push to (default: origin).
    #[arg(long)]
    pub remote: Option<String>,

    /// Remote branch to push to (default: main).
    #[arg(long)]
    pub branch: Option<String>,

    /// Glob pattern to stage; repeat to replace the default allow-list.
    #[arg(long = "include", value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Config file (default: <root>/snapsync.yaml if present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the outcome as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum CodeJson<'a> {
    NothingToCommit,
    Pushed {
        commit: &'a str,
        remote: &'a str,
        branch: &'a str,
    },
}

impl CodeArgs {
    pub fn run(self) -> Result<()> {
        let (root, cfg) = super::load_root_and_config(&self.root, self.config.as_ref())?;

        let mut code = cfg.code;
        if let Some(remote) = self.remote {
            code.remote = remote;
        }
        if let Some(branch) = self.branch {
            code.branch = branch;
        }
        if !self.include.is_empty() {
            code.include = self.include;
        }
        code.validate()?;

        let req = SyncRequest::from_config(root, &code);
        let client = GitCli::new(req.root.path());
        let outcome = run_sync(&req, &client)?;
        print_outcome(&req, &outcome, self.json)
    }
}

fn print_outcome(req: &SyncRequest, outcome: &SyncOutcome, json: bool) -> Result<()> {
    if json {
        let out = match outcome {
            SyncOutcome::NothingToCommit => CodeJson::NothingToCommit,
            SyncOutcome::Pushed(commit) => CodeJson::Pushed {
                commit: &commit.0,
                remote: &req.remote,
                branch: &req.branch,
            },
        };
        println!("{}", serde_json::to_string(&out)?);
        return Ok(());
    }
    match outcome {
        SyncOutcome::NothingToCommit => println!("{} nothing to commit", "✓".green()),
        SyncOutcome::Pushed(commit) => println!(
            "{} pushed {} to {}/{}",
            "✓".green(),
            commit.short(),
            req.remote,
            req.branch
        ),
    }
    Ok(())
}
