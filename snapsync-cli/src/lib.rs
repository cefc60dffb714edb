//! Snapsync command-line entry points.
//!
//! # Usage
//!
//! ```text
//! backup-data    --root <path> [--backup-dir <name>] [--prefix <p>] [--include <path>]... [--json]
//! backup-code    --root <path> [--remote <name>] [--branch <name>] [--include <pattern>]... [--json]
//! launch-service --root <path> [--service bot|admin]
//! ```
//!
//! Every binary also takes `--config <file>` and `-v/--verbose`.

pub mod commands;
pub mod exit;
pub mod logging;

pub use exit::finish;
