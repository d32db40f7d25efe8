//! Command-line interface definition.
//!
//! Defines the complete CLI structure using clap v4's derive macros. clap
//! handles usage errors itself and exits with code 2, which is exactly the
//! tool-error code, so no translation layer is needed for bad flags or a
//! missing file list.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// smolder - headless browser smoke tests for generated HTML
#[derive(Parser, Debug)]
#[command(
    name = "smolder",
    version,
    about = "Open HTML files in headless Chrome and report runtime errors",
    long_about = "smolder opens each given HTML file in a headless Chrome, watches for\n\
                  script errors, console diagnostics and failed resource loads, and prints\n\
                  a JSON report to stdout.\n\n\
                  Exit codes: 0 = all files pass, 1 = any file fails, 2 = tool error"
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only output JSON, suppress progress on stderr
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate HTML files in a headless browser
    Validate(ValidateArgs),
}

/// Arguments for `smolder validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// HTML files to validate
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Time to keep each page open after load, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    pub wait: u64,

    /// Use a specific Chrome/Chromium binary
    #[arg(long, value_name = "PATH")]
    pub chrome_path: Option<PathBuf>,
}
