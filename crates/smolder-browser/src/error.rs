//! Error types for browser lifecycle and observation operations.
//!
//! Failures are split by phase: launching the engine, establishing the CDP
//! connection, navigating a page, and executing scripts. Launch failures keep
//! the engine's own failure text so callers can inspect it (for example to
//! recognize a missing-shared-library environment).

use std::time::Duration;
use thiserror::Error;

/// The main error type for all browser operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to launch the browser process.
    ///
    /// The `reason` carries the engine's failure text verbatim; callers match
    /// on it to produce environment-specific guidance.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Failure text from the engine or launch configuration
        reason: String,
        /// Underlying error, when one exists
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to establish or use the Chrome DevTools Protocol connection.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL was rejected by the engine.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load
        url: String,
        /// Reason reported by the engine
        reason: String,
    },

    /// Navigation did not reach DOMContentLoaded within the deadline.
    #[error("navigation to '{url}' timed out after {timeout:?}")]
    NavigationTimeout {
        /// The URL that was being loaded
        url: String,
        /// The fixed navigation deadline
        timeout: Duration,
    },

    /// JavaScript execution in the page context failed.
    #[error("JavaScript execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// An operation was attempted on a closed browser session.
    #[error("browser session is already closed")]
    AlreadyClosed,

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// Generic I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;
