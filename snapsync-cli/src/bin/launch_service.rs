use std::process::ExitCode;

use clap::Parser;
use snapsync_cli::commands::launch::LaunchArgs;

fn main() -> ExitCode {
    let args = LaunchArgs::parse();
    snapsync_cli::logging::init(args.verbose);
    snapsync_cli::finish(args.run())
}
