//! Classified runtime observations.
//!
//! A [`Finding`] is one event captured while a document was open in the
//! browser: a console diagnostic, an uncaught exception, a failed resource
//! load, or a navigation failure. Findings are immutable once created and
//! keep event-arrival order inside a file's buckets.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static LINE_COLUMN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r":(\d+):\d+").expect("line:column pattern is valid")
});

/// What kind of runtime event a finding records.
///
/// The kind alone decides whether a finding fails a file: script-execution
/// problems are errors, while missing resources and console warnings are
/// advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// `console.error()` output
    ConsoleError,
    /// `console.warn()` output
    ConsoleWarning,
    /// An exception that reached the top of the page's execution context
    UncaughtException,
    /// A resource request (image, script, font, ...) that failed to load
    ResourceFailed,
    /// The navigation itself failed or timed out
    NavigationError,
}

impl FindingKind {
    /// Returns true if findings of this kind fail the file.
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(
            self,
            FindingKind::ConsoleError
                | FindingKind::UncaughtException
                | FindingKind::NavigationError
        )
    }

    /// Returns true for kinds that are recorded but never fail a file.
    #[must_use]
    pub fn is_advisory(self) -> bool {
        !self.is_error()
    }
}

/// One classified observation captured while a file was open in the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Event classification
    pub kind: FindingKind,
    /// Human-readable message
    pub text: String,
    /// Source line, when one could be scraped from a stack trace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Finding {
    /// Creates a finding with no source line.
    #[must_use]
    pub fn new(kind: FindingKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            line: None,
        }
    }

    /// Attaches a source line number.
    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

/// Scrapes a source line number out of free-form stack-trace text.
///
/// Takes the first `:<line>:<column>` occurrence and returns its line part.
/// Extraction is best-effort: no match means the field stays absent, never
/// an error.
#[must_use]
pub fn extract_line(stack: &str) -> Option<u32> {
    LINE_COLUMN
        .captures(stack)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
