//! `launch-service` — start the bot or the admin panel from the project root.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use clap::Parser;

use snapsync_core::Service;

/// Start one of the project's services, chosen by `--service` or `$SERVICE`.
#[derive(Parser, Debug)]
#[command(name = "launch-service", version, long_about = None)]
pub struct LaunchArgs {
    /// Project root containing the service entry points.
    #[arg(long)]
    pub root: PathBuf,

    /// bot | admin (default: $SERVICE, then bot).
    #[arg(long)]
    pub service: Option<String>,

    /// Config file (default: <root>/snapsync.yaml if present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the command instead of running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging on stderr.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl LaunchArgs {
    pub fn run(self) -> Result<()> {
        let (root, cfg) = super::load_root_and_config(&self.root, self.config.as_ref())?;
        let service = Service::from_env_or(self.service.as_deref())?;
        let cmd = service.command(&cfg.launch.python, root.path());

        if self.dry_run {
            println!("{}", render(&cmd));
            return Ok(());
        }
        tracing::info!("launching {service}: {}", render(&cmd));
        launch(cmd).with_context(|| format!("failed to launch {service}"))
    }
}

fn render(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace this process with the service.
#[cfg(unix)]
fn launch(mut cmd: Command) -> Result<()> {
    use std::os::unix::process::CommandExt;
    // `exec` only returns on failure.
    Err(cmd.exec().into())
}

/// Run the service and forward its exit status.
#[cfg(not(unix))]
fn launch(mut cmd: Command) -> Result<()> {
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("service exited with {status}");
    }
    Ok(())
}
