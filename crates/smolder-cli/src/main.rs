//! smolder - headless browser smoke tests for generated HTML.
//!
//! This is the main entry point. It parses arguments, initializes logging
//! and colors, dispatches the command, and turns the outcome into the
//! process exit code: 0 all pass, 1 any fail, 2 tool error.

use clap::Parser;
use smolder_cli::{cli, commands, logger, ui};

#[tokio::main]
async fn main() {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let code = match args.command {
        cli::Command::Validate(validate_args) => {
            match commands::validate_execute(validate_args, args.quiet).await {
                Ok(code) => code,
                Err(err) => {
                    ui::report_error(&err);
                    err.exit_code()
                }
            }
        }
    };

    std::process::exit(code);
}
