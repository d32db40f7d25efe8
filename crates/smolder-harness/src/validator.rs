//! The per-file validation sequence.
//!
//! One file moves through: open page → navigate → settle → teardown →
//! classify. The sequence is infallible by construction; anything that goes
//! wrong while the browser works on this file becomes a `navigation_error`
//! finding in this file's result, never an abort of the run.

use crate::report::FileResult;
use smolder_browser::{BrowserSession, Finding, FindingKind};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::debug;

/// Validates a single file and always produces its result.
///
/// `load_time_ms` spans from just before the page is opened to just after it
/// is torn down. The settle wait runs only after a successful navigation;
/// a failed navigation goes straight to teardown and is recorded as a
/// finding like everything else.
pub async fn validate(session: &BrowserSession, path: &Path, settle: Duration) -> FileResult {
    let file = display_name(path);
    debug!("validating {file}");

    let url = file_url(path);
    let started = Instant::now();
    let mut navigation_failure = None;

    let (mut errors, warnings) = match session.new_page().await {
        Ok(page) => {
            match page.navigate(&url).await {
                Ok(()) => page.settle(settle).await,
                Err(err) => navigation_failure = Some(err),
            }
            // Teardown runs on every path and keeps whatever was observed
            // before a failure.
            page.close().await
        }
        Err(err) => {
            navigation_failure = Some(err);
            (Vec::new(), Vec::new())
        }
    };

    let load_time_ms = started.elapsed().as_millis() as u64;

    if let Some(err) = navigation_failure {
        errors.push(Finding::new(FindingKind::NavigationError, err.to_string()));
    }

    FileResult::new(file, path.to_path_buf(), errors, warnings, load_time_ms)
}

/// Base name used in progress output and the `file` field.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// file:// URL for an absolute path.
fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}
