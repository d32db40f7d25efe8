//! Terminal output for the progress and summary stream.
//!
//! Everything here writes to stderr; stdout belongs exclusively to the JSON
//! report. Colors honor `NO_COLOR` / `FORCE_COLOR` and the `--no-color`
//! flag, falling back to terminal detection via the console crate.

use crate::error::CliError;
use owo_colors::OwoColorize;
use smolder_harness::{FileResult, ProgressSink, Report};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static COLOR_ENABLED: AtomicBool = AtomicBool::new(false);

/// Decides and stores whether output should be colored.
///
/// Call once, early. `NO_COLOR` wins over `FORCE_COLOR`; without either,
/// colors are used only on an attended terminal.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    COLOR_ENABLED.store(enabled, Ordering::Relaxed);
}

fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

fn colors_enabled() -> bool {
    COLOR_ENABLED.load(Ordering::Relaxed)
}

/// Print an error message to stderr, with any remediation guidance.
pub fn report_error(err: &CliError) {
    if colors_enabled() {
        eprintln!("{} {}", "✗".red().bold(), err.to_string().red());
    } else {
        eprintln!("✗ {err}");
    }
    if let Some(hint) = err.remediation() {
        eprintln!("\n{hint}");
    }
}

/// The tag printed when a file finishes validation.
fn status_tag(result: &FileResult) -> String {
    if result.passed() {
        "PASS".to_string()
    } else {
        format!("FAIL ({} error(s))", result.error_count)
    }
}

/// Line completing a file's progress entry.
fn finish_line(result: &FileResult) -> String {
    format!("{}  [{}ms]", status_tag(result), result.load_time_ms)
}

/// The final one-line run summary.
fn summary_line(report: &Report) -> String {
    format!(
        "{} passed, {} failed out of {} file(s)",
        report.passed_count(),
        report.failed_count(),
        report.len()
    )
}

/// Progress sink that streams per-file lines to stderr.
///
/// Start and finish are printed separately so the file name is visible while
/// its page is open; the finish fragment completes the same line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn file_started(&mut self, file: &str) {
        eprint!("  validating: {file} ... ");
        let _ = std::io::stderr().flush();
    }

    fn file_finished(&mut self, result: &FileResult) {
        if colors_enabled() {
            if result.passed() {
                eprintln!("{}  [{}ms]", "PASS".green().bold(), result.load_time_ms);
            } else {
                eprintln!(
                    "{}  [{}ms]",
                    format!("FAIL ({} error(s))", result.error_count).red().bold(),
                    result.load_time_ms
                );
            }
        } else {
            eprintln!("{}", finish_line(result));
        }
    }
}

/// Print the run summary to stderr.
pub fn print_summary(report: &Report) {
    let line = summary_line(report);
    if colors_enabled() {
        if report.all_passed() {
            eprintln!("\n  {}", line.green());
        } else {
            eprintln!("\n  {}", line.red());
        }
    } else {
        eprintln!("\n  {line}");
    }
}
