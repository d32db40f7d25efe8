//! Whole-run sequencing and session ownership.
//!
//! The runner owns the one browser session: launch, strictly sequential
//! validation of every input file, release. Because pages never overlap, a
//! slow or hanging document can't leak listeners or findings into another
//! file's result, and progress output stays in input order.

use crate::report::{ProgressSink, Report};
use crate::validator::{display_name, validate};
use smolder_browser::{BrowserSession, Result, SessionConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Options for a validation run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// How long each page stays open after DOMContentLoaded.
    pub settle: Duration,
    /// Chrome/Chromium executable override.
    pub executable: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(2000),
            executable: None,
        }
    }
}

/// Validates every file, one at a time, against a single browser session.
///
/// Files are processed in the order given and the report keeps that order.
/// Only a launch failure is an `Err`; everything that happens after the
/// engine is up is recorded as data in the report. The session is released
/// on every path out of this function: explicitly on the way out here, by
/// the process handle's Drop if this future is dropped mid-run.
///
/// # Errors
///
/// Returns an error only when the browser engine fails to launch.
pub async fn run(
    files: &[PathBuf],
    options: &RunOptions,
    progress: &mut dyn ProgressSink,
) -> Result<Report> {
    let mut config = SessionConfig::new();
    if let Some(executable) = &options.executable {
        config = config.with_executable(executable);
    }
    let session = BrowserSession::launch(config).await?;

    debug!("validating {} file(s)", files.len());
    let mut report = Report::with_capacity(files.len());
    for path in files {
        progress.file_started(&display_name(path));
        let result = validate(&session, path, options.settle).await;
        progress.file_finished(&result);
        report.push(result);
    }

    // A close failure must not discard the finished report; the process
    // handle still kills Chrome on drop.
    if let Err(err) = session.close().await {
        warn!("browser did not close cleanly: {err}");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FileResult;

    #[test]
    fn default_settle_is_two_seconds() {
        let options = RunOptions::default();
        assert_eq!(options.settle, Duration::from_millis(2000));
        assert!(options.executable.is_none());
    }

    /// A sink that records callback order, standing in for the stderr stream.
    #[derive(Default)]
    struct RecordingSink {
        events: Vec<String>,
    }

    impl ProgressSink for RecordingSink {
        fn file_started(&mut self, file: &str) {
            self.events.push(format!("start {file}"));
        }

        fn file_finished(&mut self, result: &FileResult) {
            self.events.push(format!("finish {}", result.file));
        }
    }

    #[test]
    fn progress_sink_receives_both_phases() {
        let mut sink = RecordingSink::default();
        sink.file_started("a.html");
        let result = FileResult::new(
            "a.html".to_string(),
            PathBuf::from("/tmp/a.html"),
            Vec::new(),
            Vec::new(),
            5,
        );
        sink.file_finished(&result);

        assert_eq!(sink.events, ["start a.html", "finish a.html"]);
    }
}
