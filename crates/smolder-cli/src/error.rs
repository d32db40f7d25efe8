//! CLI error handling and exit-code mapping.
//!
//! Only two classes of failure abort the process before a report exists:
//! bad input (usage) and a broken environment (the engine cannot start).
//! Both map to exit code 2. Validation outcomes are not errors; they map to
//! exit codes 0 and 1 from the report itself.

use smolder_browser::BrowserError;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
pub mod exit {
    /// Every file passed.
    pub const ALL_PASSED: i32 = 0;
    /// At least one file failed validation.
    pub const VALIDATION_FAILED: i32 = 1;
    /// Usage or environment error; no report was produced.
    pub const TOOL_ERROR: i32 = 2;
}

/// Remediation shown when Chrome can't find its shared libraries, a common
/// state in minimal containers. The package list mirrors Chrome's own
/// dependency set on Debian/Ubuntu.
const SHARED_LIBRARY_HINT: &str = "\
Missing system libraries. Install them with:
  sudo apt-get install -y ca-certificates fonts-liberation libasound2 \\
    libatk-bridge2.0-0 libatk1.0-0 libcairo2 libcups2 libdbus-1-3 \\
    libexpat1 libfontconfig1 libgbm1 libglib2.0-0 libgtk-3-0 libnspr4 \\
    libnss3 libpango-1.0-0 libpangocairo-1.0-0 libx11-6 libx11-xcb1 \\
    libxcb1 libxcomposite1 libxcursor1 libxdamage1 libxext6 libxfixes3 \\
    libxi6 libxrandr2 libxrender1 libxss1 libxtst6

Or use --chrome-path to point to an existing Chrome installation.";

/// A specialized Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Top-level CLI error type.
///
/// Every variant is a tool error (exit 2); per-file problems never reach
/// this type.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file doesn't exist
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The browser engine failed to launch or crashed
    #[error("{0}")]
    Browser(#[from] BrowserError),

    /// Report serialization failed
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// The exit code this error maps to.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        exit::TOOL_ERROR
    }

    /// Environment-specific guidance worth appending to the error message.
    ///
    /// The substring check on "shared libraries" is how a missing-dependency
    /// launch failure is recognized in the engine's own failure text.
    #[must_use]
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            CliError::Browser(BrowserError::LaunchFailed { reason, .. })
                if reason.contains("shared libraries") =>
            {
                Some(SHARED_LIBRARY_HINT)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_variants_exit_two() {
        let err = CliError::FileNotFound(PathBuf::from("/tmp/gone.html"));
        assert_eq!(err.exit_code(), exit::TOOL_ERROR);

        let err = CliError::Browser(BrowserError::AlreadyClosed);
        assert_eq!(err.exit_code(), exit::TOOL_ERROR);
    }

    #[test]
    fn shared_library_failures_get_remediation() {
        let err = CliError::Browser(BrowserError::LaunchFailed {
            reason: "error while loading shared libraries: libnss3.so: cannot open".into(),
            source: None,
        });
        let hint = err.remediation().expect("hint expected");
        assert!(hint.contains("apt-get install"));
        assert!(hint.contains("--chrome-path"));
    }

    #[test]
    fn other_launch_failures_get_no_remediation() {
        let err = CliError::Browser(BrowserError::LaunchFailed {
            reason: "No such file or directory".into(),
            source: None,
        });
        assert!(err.remediation().is_none());

        let err = CliError::FileNotFound(PathBuf::from("x.html"));
        assert!(err.remediation().is_none());
    }

    #[test]
    fn file_not_found_names_the_path() {
        let err = CliError::FileNotFound(PathBuf::from("/tmp/gone.html"));
        assert_eq!(err.to_string(), "file not found: /tmp/gone.html");
    }
}
