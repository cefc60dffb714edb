use std::process::ExitCode;

use clap::Parser;
use snapsync_cli::commands::code::CodeArgs;

fn main() -> ExitCode {
    let args = CodeArgs::parse();
    snapsync_cli::logging::init(args.verbose);
    snapsync_cli::finish(args.run())
}
