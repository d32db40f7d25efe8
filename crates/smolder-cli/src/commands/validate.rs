//! Validate command implementation.
//!
//! Resolves the input paths, runs the whole file set through one browser
//! session, prints the JSON report to stdout and maps the verdict to an
//! exit code. Per-file problems are inside the report; only unusable input
//! or a dead environment comes back as an error.

use crate::cli::ValidateArgs;
use crate::error::{exit, CliError, Result};
use crate::ui;
use smolder_harness::{run, RunOptions, SilentSink};
use std::time::Duration;
use tracing::debug;

/// Execute the validate command, returning the process exit code.
///
/// # Errors
///
/// Returns an error when an input file doesn't exist, the browser fails to
/// launch, or the report can't be serialized. All of them are tool errors;
/// validation failures are a successful return with exit code 1.
pub async fn execute(args: ValidateArgs, quiet: bool) -> Result<i32> {
    // Resolve and check every path before touching the browser, so a typo in
    // the last argument doesn't waste a full run.
    let mut files = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let resolved = std::fs::canonicalize(file)
            .map_err(|_| CliError::FileNotFound(file.clone()))?;
        files.push(resolved);
    }

    debug!("resolved {} input file(s)", files.len());

    let options = RunOptions {
        settle: Duration::from_millis(args.wait),
        executable: args.chrome_path,
    };

    let report = if quiet {
        run(&files, &options, &mut SilentSink).await?
    } else {
        run(&files, &options, &mut ui::ConsoleProgress).await?
    };

    println!("{}", report.to_json_pretty()?);

    if !quiet {
        ui::print_summary(&report);
    }

    Ok(if report.all_passed() {
        exit::ALL_PASSED
    } else {
        exit::VALIDATION_FAILED
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn missing_file_fails_before_any_browser_work() {
        let args = ValidateArgs {
            files: vec![PathBuf::from("/definitely/not/here.html")],
            wait: 2000,
            chrome_path: None,
        };

        let err = execute(args, true).await.unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
        assert_eq!(err.exit_code(), exit::TOOL_ERROR);
    }

    #[tokio::test]
    async fn first_missing_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let exists = dir.path().join("ok.html");
        std::fs::write(&exists, "<html></html>").unwrap();

        let args = ValidateArgs {
            files: vec![PathBuf::from("/gone/a.html"), exists],
            wait: 0,
            chrome_path: None,
        };

        let err = execute(args, true).await.unwrap_err();
        match err {
            CliError::FileNotFound(path) => {
                assert_eq!(path, PathBuf::from("/gone/a.html"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }
}
