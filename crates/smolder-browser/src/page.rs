//! A single observed page: navigation, settling, teardown.
//!
//! [`ObservedPage`] pairs a browser tab with its [`PageObserver`] so that
//! event capture is wired up before any navigation happens. Pages are opened
//! fresh per document and never reused; teardown detaches the observer, then
//! closes the tab.

use crate::error::{BrowserError, Result};
use crate::finding::Finding;
use crate::observer::PageObserver;
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::page::Page as ChromePage;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Fixed upper bound on reaching DOMContentLoaded.
///
/// Not configurable: a document that cannot produce a DOM in ten seconds is
/// a failed document, and a hanging load must not stall the rest of the run.
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_millis(10_000);

/// How often the document ready state is polled during navigation.
const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A browser tab with event observation attached.
#[derive(Debug)]
pub struct ObservedPage {
    inner: ChromePage,
    observer: PageObserver,
}

impl ObservedPage {
    /// Wraps a freshly created tab and attaches a fresh observer.
    ///
    /// Called by `BrowserSession::new_page`; the observer must be listening
    /// before navigation so no early event is missed.
    pub(crate) async fn new(page: ChromePage) -> Result<Self> {
        let mut observer = PageObserver::new();
        observer.attach(&page).await?;
        Ok(Self {
            inner: page,
            observer,
        })
    }

    /// Navigates to `url` and waits for DOMContentLoaded, bounded by
    /// [`NAVIGATION_TIMEOUT`].
    ///
    /// Waits only for the DOM, not for subresource completion: slow or
    /// missing assets surface through the observer as findings, they are not
    /// navigation failures.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` when the engine rejects the navigation and
    /// `NavigationTimeout` when the deadline passes first.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        tokio::time::timeout(NAVIGATION_TIMEOUT, self.navigate_inner(url))
            .await
            .map_err(|_| BrowserError::NavigationTimeout {
                url: url.to_string(),
                timeout: NAVIGATION_TIMEOUT,
            })?
    }

    async fn navigate_inner(&self, url: &str) -> Result<()> {
        debug!("navigating to {url}");

        let response = self
            .inner
            .execute(NavigateParams::from(url))
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        if let Some(reason) = &response.result.error_text {
            return Err(BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: reason.clone(),
            });
        }

        // "interactive" is DOMContentLoaded; "complete" means we arrived late
        // and the page is already fully loaded.
        loop {
            match self.ready_state().await {
                Ok(state) if state == "interactive" || state == "complete" => return Ok(()),
                // Not ready yet, or a transient evaluation failure while the
                // document is being swapped in; keep polling until the deadline.
                Ok(_) | Err(_) => sleep(READY_POLL_INTERVAL).await,
            }
        }
    }

    async fn ready_state(&self) -> Result<String> {
        let result = self
            .inner
            .evaluate("document.readyState")
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;
        Ok(result
            .value()
            .and_then(|value| value.as_str())
            .unwrap_or_default()
            .to_string())
    }

    /// Keeps the page open so deferred scripts, timers and animations get a
    /// chance to run and surface late errors.
    ///
    /// Always runs to completion; early findings never cut the wait short,
    /// late errors are the detection target.
    pub async fn settle(&self, wait: Duration) {
        sleep(wait).await;
    }

    /// Tears the page down and returns the final `(errors, warnings)`.
    ///
    /// Infallible so teardown can run on every exit path: the observer is
    /// detached first, then the tab is closed best-effort. Findings survive
    /// a failed close; an unclosable tab goes down with the browser.
    pub async fn close(self) -> (Vec<Finding>, Vec<Finding>) {
        let Self {
            inner,
            mut observer,
        } = self;

        observer.detach().await;
        let findings = observer.buffer().collect();

        if let Err(err) = inner.close().await {
            warn!("failed to close page: {err}");
        }

        findings
    }
}
