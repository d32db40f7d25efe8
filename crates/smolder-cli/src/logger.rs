//! Logging setup for the smolder CLI.
//!
//! Structured logging goes through the `tracing` ecosystem. Log lines share
//! stderr with the progress stream, so the default level stays at warn;
//! routine flow is logged at debug and only shows up with `--verbose` or an
//! explicit `RUST_LOG`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Call once, before any logging happens. Precedence:
/// 1. `--verbose`: debug level for smolder crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG` environment variable
/// 4. Default: warnings and up
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("smolder=debug,smolder_cli=debug,smolder_browser=debug,smolder_harness=debug")
    } else if quiet {
        EnvFilter::new("smolder=error,smolder_cli=error,smolder_browser=error,smolder_harness=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("smolder=warn,smolder_cli=warn,smolder_browser=warn,smolder_harness=warn")
        })
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so these
    // only exercise filter construction.

    #[test]
    fn verbose_filter_parses() {
        let _ = EnvFilter::new(
            "smolder=debug,smolder_cli=debug,smolder_browser=debug,smolder_harness=debug",
        );
    }

    #[test]
    fn quiet_filter_parses() {
        let _ = EnvFilter::new(
            "smolder=error,smolder_cli=error,smolder_browser=error,smolder_harness=error",
        );
    }
}
