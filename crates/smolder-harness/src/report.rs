//! The result and report contract.
//!
//! [`FileResult`] is the per-file record consumers parse; its field order is
//! the serialization order, and the redundant counts are part of the
//! contract for consumers that don't want to count. [`Report`] is the whole
//! run, one result per input file, in input order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smolder_browser::Finding;
use std::path::PathBuf;

/// Pass/fail outcome for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No error-severity findings
    Pass,
    /// At least one error-severity finding
    Fail,
}

/// Outcome for one validated file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    /// Display name (base name of the input path)
    pub file: String,
    /// Fully resolved absolute path
    pub path: PathBuf,
    /// Derived: `Fail` iff `errors` is non-empty
    pub status: Status,
    /// Error-severity findings, in arrival order
    pub errors: Vec<Finding>,
    /// Advisory findings, in arrival order
    pub warnings: Vec<Finding>,
    /// Always `errors.len()`
    pub error_count: usize,
    /// Always `warnings.len()`
    pub warning_count: usize,
    /// Wall-clock page-open to teardown, in milliseconds
    pub load_time_ms: u64,
    /// When validation of this file finished
    pub validated_at: DateTime<Utc>,
}

impl FileResult {
    /// Builds a result, deriving status and counts from the findings.
    #[must_use]
    pub fn new(
        file: String,
        path: PathBuf,
        errors: Vec<Finding>,
        warnings: Vec<Finding>,
        load_time_ms: u64,
    ) -> Self {
        let status = if errors.is_empty() {
            Status::Pass
        } else {
            Status::Fail
        };
        Self {
            file,
            path,
            status,
            error_count: errors.len(),
            warning_count: warnings.len(),
            errors,
            warnings,
            load_time_ms,
            validated_at: Utc::now(),
        }
    }

    /// True when the file produced no error-severity findings.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }
}

/// The full run: one result per input file, in input order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    results: Vec<FileResult>,
}

impl Report {
    /// Creates an empty report with room for `capacity` results.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity),
        }
    }

    /// Appends the next file's result.
    pub fn push(&mut self, result: FileResult) {
        self.results.push(result);
    }

    /// The results, in input order.
    #[must_use]
    pub fn results(&self) -> &[FileResult] {
        &self.results
    }

    /// Number of validated files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when no files were validated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of passing files.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    /// Number of failing files.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.len() - self.passed_count()
    }

    /// The run's overall verdict: true only when every file passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(FileResult::passed)
    }

    /// Serializes the report as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.results)
    }
}

/// Receives per-file progress while a run is in flight.
///
/// The runner calls `file_started` right before a file's validation begins
/// and `file_finished` as soon as its result exists. Both default to doing
/// nothing, so a silent run just uses [`SilentSink`].
pub trait ProgressSink {
    /// A file's validation is about to start.
    fn file_started(&mut self, _file: &str) {}

    /// A file's validation finished with this result.
    fn file_finished(&mut self, _result: &FileResult) {}
}

/// A progress sink that reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl ProgressSink for SilentSink {}

#[cfg(test)]
mod tests {
    use super::*;
    use smolder_browser::{Finding, FindingKind};

    fn result_with(errors: Vec<Finding>, warnings: Vec<Finding>) -> FileResult {
        FileResult::new(
            "page.html".to_string(),
            PathBuf::from("/tmp/page.html"),
            errors,
            warnings,
            42,
        )
    }

    #[test]
    fn status_follows_errors_only() {
        let passing = result_with(
            Vec::new(),
            vec![Finding::new(FindingKind::ConsoleWarning, "advisory")],
        );
        assert_eq!(passing.status, Status::Pass);
        assert!(passing.passed());

        let failing = result_with(
            vec![Finding::new(FindingKind::UncaughtException, "boom")],
            Vec::new(),
        );
        assert_eq!(failing.status, Status::Fail);
        assert!(!failing.passed());
    }

    #[test]
    fn counts_match_sequence_lengths() {
        let result = result_with(
            vec![
                Finding::new(FindingKind::ConsoleError, "e1"),
                Finding::new(FindingKind::NavigationError, "e2"),
            ],
            vec![Finding::new(FindingKind::ResourceFailed, "w1")],
        );
        assert_eq!(result.error_count, result.errors.len());
        assert_eq!(result.warning_count, result.warnings.len());
        assert_eq!(result.error_count, 2);
        assert_eq!(result.warning_count, 1);
    }

    #[test]
    fn advisory_findings_never_fail_a_file() {
        let result = result_with(
            Vec::new(),
            vec![
                Finding::new(FindingKind::ResourceFailed, "net::ERR_FILE_NOT_FOUND: x.png"),
                Finding::new(FindingKind::ConsoleWarning, "deprecation"),
            ],
        );
        assert_eq!(result.status, Status::Pass);
    }

    #[test]
    fn report_verdict_and_counts() {
        let mut report = Report::with_capacity(3);
        report.push(result_with(Vec::new(), Vec::new()));
        report.push(result_with(
            vec![Finding::new(FindingKind::ConsoleError, "bad")],
            Vec::new(),
        ));
        report.push(result_with(Vec::new(), Vec::new()));

        assert_eq!(report.len(), 3);
        assert_eq!(report.passed_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.all_passed());
    }

    #[test]
    fn empty_report_passes() {
        let report = Report::default();
        assert!(report.all_passed());
        assert_eq!(report.passed_count(), 0);
        assert_eq!(report.failed_count(), 0);
    }

    #[test]
    fn report_serializes_as_bare_array_with_contract_fields() {
        let mut report = Report::with_capacity(1);
        report.push(result_with(
            vec![Finding::new(FindingKind::UncaughtException, "boom").with_line(3)],
            Vec::new(),
        ));

        let value: serde_json::Value =
            serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        let entry = &value.as_array().unwrap()[0];

        assert_eq!(entry["file"], "page.html");
        assert_eq!(entry["path"], "/tmp/page.html");
        assert_eq!(entry["status"], "fail");
        assert_eq!(entry["error_count"], 1);
        assert_eq!(entry["warning_count"], 0);
        assert_eq!(entry["load_time_ms"], 42);
        assert_eq!(entry["errors"][0]["kind"], "uncaught_exception");
        assert_eq!(entry["errors"][0]["line"], 3);
        // RFC 3339 timestamp
        let validated_at = entry["validated_at"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(validated_at).is_ok());
    }

    #[test]
    fn results_keep_input_order() {
        let mut report = Report::default();
        for name in ["a.html", "b.html", "c.html"] {
            let mut result = result_with(Vec::new(), Vec::new());
            result.file = name.to_string();
            report.push(result);
        }
        let names: Vec<_> = report.results().iter().map(|r| r.file.as_str()).collect();
        assert_eq!(names, ["a.html", "b.html", "c.html"]);
    }
}
