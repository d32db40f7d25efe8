//! # smolder-browser
//!
//! Headless Chrome lifecycle and runtime-error observation, built on
//! chromiumoxide.
//!
//! This crate owns the browser side of smolder: launching one Chrome process
//! per run, opening pages with event capture already wired up, and turning
//! CDP events into classified [`Finding`]s.
//!
//! ## Architecture
//!
//! - **BrowserSession**: manages the Chrome process lifecycle
//! - **ObservedPage**: one tab plus its observer; navigation and teardown
//! - **PageObserver** / **FindingBuffer**: reactive event capture into
//!   per-page buckets
//! - **Finding**: one classified observation (kind, text, optional line)
//!
//! ## Resource Safety
//!
//! The session is released exactly once: explicitly via `close()`, with
//! chromiumoxide's process-kill-on-Drop as the backstop for panics and early
//! returns. Pages are torn down per document; their observers never outlive
//! them.
//!
//! ## Testing Strategy
//!
//! Unit tests cover classification and buffering without a browser.
//! Integration tests under `tests/` need Chrome installed and are marked
//! `#[ignore]`; run them with `cargo test -- --ignored`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod finding;
pub mod observer;
pub mod page;
pub mod session;

// Re-export main types for convenience
pub use error::{BrowserError, Result};
pub use finding::{Finding, FindingKind};
pub use observer::{FindingBuffer, PageObserver};
pub use page::{ObservedPage, NAVIGATION_TIMEOUT};
pub use session::{BrowserSession, SessionConfig};
