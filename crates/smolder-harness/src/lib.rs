//! # smolder-harness
//!
//! Per-file validation sequencing and report aggregation.
//!
//! This crate turns the browser primitives from `smolder-browser` into the
//! smoke-test contract: each input file becomes exactly one [`FileResult`],
//! the whole run becomes one [`Report`], and nothing a document does at
//! runtime can abort the run. Runtime failures are the data being collected,
//! not control flow.
//!
//! ## Architecture
//!
//! - **validator**: the per-file sequence (open → navigate → settle →
//!   teardown → classify), infallible per file
//! - **runner**: one browser session per run, strictly sequential files,
//!   guaranteed release
//! - **report**: the serializable result/report contract plus the
//!   [`ProgressSink`] seam for live progress output

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod report;
pub mod runner;
pub mod validator;

pub use report::{FileResult, ProgressSink, Report, SilentSink, Status};
pub use runner::{run, RunOptions};
pub use validator::validate;
