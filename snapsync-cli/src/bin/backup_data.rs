//! `backup-data` — archive `data`, `db`, `models`, `logs` and `.env` under a project root.

use std::process::ExitCode;

use clap::Parser;
use snapsync_cli::commands::data::DataArgs;

fn main() -> ExitCode {
    let args = DataArgs::parse();
    snapsync_cli::logging::init(args.verbose);
    snapsync_cli::finish(args.run())
}
