//! Page-scoped event observation and classification.
//!
//! A [`PageObserver`] subscribes to the four CDP event channels that carry
//! runtime-failure signals (console API calls, thrown exceptions, request
//! starts, failed loads) and appends classified [`Finding`]s into an owned
//! [`FindingBuffer`]. One observer watches exactly one page; nothing is
//! shared across files.
//!
//! # Design Rationale
//!
//! The buffer is an `Arc<Mutex<..>>` rather than a channel: findings are
//! appended by reactive listener tasks and read back exactly once after the
//! page is torn down, ordering must be arrival order, and the workload is
//! tiny. Request URLs are tracked in the same buffer because CDP's
//! `Network.loadingFailed` event carries only a request id, not the URL.

use crate::error::{BrowserError, Result};
use crate::finding::{extract_line, Finding, FindingKind};
use chromiumoxide::cdp::browser_protocol::network::{
    self, EventLoadingFailed, EventRequestWillBeSent,
};
use chromiumoxide::cdp::js_protocol::runtime::{
    ConsoleApiCalledType, EventConsoleApiCalled, EventExceptionThrown,
};
use chromiumoxide::page::Page as ChromePage;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Default)]
struct BufferState {
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
    /// Request id -> requested URL, for resolving failed loads
    requests: HashMap<String, String>,
}

/// Thread-safe accumulator for one page's findings.
///
/// Cheaply cloneable; clones share the same underlying buckets. Appends come
/// from the CDP listener tasks, reads happen once after teardown.
#[derive(Debug, Clone, Default)]
pub struct FindingBuffer {
    state: Arc<Mutex<BufferState>>,
}

impl FindingBuffer {
    /// Creates a new, empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finding, routed into the error or warning bucket by kind.
    ///
    /// If the mutex is poisoned the finding is dropped; a panic in a listener
    /// task has already failed the run more loudly than a lost message.
    pub fn push(&self, finding: Finding) {
        if let Ok(mut state) = self.state.lock() {
            if finding.kind.is_error() {
                state.errors.push(finding);
            } else {
                state.warnings.push(finding);
            }
        }
    }

    /// Remembers the URL a request id refers to.
    pub(crate) fn record_request(&self, id: String, url: String) {
        if let Ok(mut state) = self.state.lock() {
            state.requests.insert(id, url);
        }
    }

    /// Looks up the URL for a request id seen earlier.
    pub(crate) fn request_url(&self, id: &str) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.requests.get(id).cloned())
    }

    /// Number of error-severity findings so far.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.state
            .lock()
            .map(|state| state.errors.len())
            .unwrap_or(0)
    }

    /// Number of advisory findings so far.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.state
            .lock()
            .map(|state| state.warnings.len())
            .unwrap_or(0)
    }

    /// Returns the final `(errors, warnings)` sequences in arrival order.
    #[must_use]
    pub fn collect(&self) -> (Vec<Finding>, Vec<Finding>) {
        match self.state.lock() {
            Ok(state) => (state.errors.clone(), state.warnings.clone()),
            Err(poisoned) => {
                let state = poisoned.into_inner();
                (state.errors.clone(), state.warnings.clone())
            }
        }
    }
}

/// Watches a single page and accumulates classified findings.
///
/// State machine per page: created idle, `attach` registers the four event
/// subscriptions, `detach` tears them down; the buffer is read with
/// [`FindingBuffer::collect`] only after the page itself is gone.
#[derive(Debug, Default)]
pub struct PageObserver {
    buffer: FindingBuffer,
    tasks: Vec<JoinHandle<()>>,
}

impl PageObserver {
    /// Creates an idle observer with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the shared finding buffer.
    #[must_use]
    pub fn buffer(&self) -> &FindingBuffer {
        &self.buffer
    }

    /// Subscribes to the four event channels on `page`.
    ///
    /// Each subscription runs as its own task, appending into the shared
    /// buffer as events arrive. Listening is purely reactive; nothing here
    /// blocks the validation sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the network domain cannot be enabled or a CDP
    /// subscription cannot be registered.
    pub async fn attach(&mut self, page: &ChromePage) -> Result<()> {
        // Network events are not delivered until the domain is enabled.
        page.execute(network::EnableParams::default())
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        let mut console_events = page
            .event_listener::<EventConsoleApiCalled>()
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
        let buffer = self.buffer.clone();
        self.tasks.push(tokio::spawn(async move {
            while let Some(event) = console_events.next().await {
                if let Some(finding) = console_finding(&event) {
                    buffer.push(finding);
                }
            }
        }));

        let mut exception_events = page
            .event_listener::<EventExceptionThrown>()
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
        let buffer = self.buffer.clone();
        self.tasks.push(tokio::spawn(async move {
            while let Some(event) = exception_events.next().await {
                buffer.push(exception_finding(&event));
            }
        }));

        let mut request_events = page
            .event_listener::<EventRequestWillBeSent>()
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
        let buffer = self.buffer.clone();
        self.tasks.push(tokio::spawn(async move {
            while let Some(event) = request_events.next().await {
                buffer.record_request(
                    event.request_id.inner().clone(),
                    event.request.url.clone(),
                );
            }
        }));

        let mut failed_events = page
            .event_listener::<EventLoadingFailed>()
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
        let buffer = self.buffer.clone();
        self.tasks.push(tokio::spawn(async move {
            while let Some(event) = failed_events.next().await {
                let url = buffer
                    .request_url(event.request_id.inner())
                    .unwrap_or_default();
                buffer.push(Finding::new(
                    FindingKind::ResourceFailed,
                    resource_failure_text(&event.error_text, &url),
                ));
            }
        }));

        debug!("observer attached ({} subscriptions)", self.tasks.len());
        Ok(())
    }

    /// Cancels the event subscriptions and waits for the tasks to finish.
    ///
    /// Runs before the page closes so the buffer is final when it is read;
    /// nothing can append after this returns.
    pub async fn detach(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
            let _ = task.await;
        }
        debug!("observer detached");
    }
}

/// Classifies a console API call, or ignores it.
fn console_finding(event: &EventConsoleApiCalled) -> Option<Finding> {
    let kind = console_kind(&event.r#type)?;
    let text = event
        .args
        .iter()
        .map(|arg| render_console_arg(arg.value.as_ref(), arg.description.as_deref()))
        .collect::<Vec<_>>()
        .join(" ");
    Some(Finding::new(kind, text))
}

/// Only `console.error` and `console.warn` are findings; logs, infos and
/// debug output are not failure signals.
fn console_kind(r#type: &ConsoleApiCalledType) -> Option<FindingKind> {
    match r#type {
        ConsoleApiCalledType::Error => Some(FindingKind::ConsoleError),
        ConsoleApiCalledType::Warning => Some(FindingKind::ConsoleWarning),
        _ => None,
    }
}

/// Renders one console argument: string values verbatim, other primitives
/// via their JSON form, objects via the CDP description when one exists.
fn render_console_arg(value: Option<&serde_json::Value>, description: Option<&str>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(value) => value.to_string(),
        None => description.unwrap_or("<object>").to_string(),
    }
}

/// Builds an `uncaught_exception` finding from a thrown-exception event.
fn exception_finding(event: &EventExceptionThrown) -> Finding {
    let details = &event.exception_details;
    let description = details
        .exception
        .as_ref()
        .and_then(|exc| exc.description.as_deref());
    let thrown_value = details
        .exception
        .as_ref()
        .and_then(|exc| exc.value.as_ref())
        .and_then(|value| value.as_str());
    classify_exception(description, thrown_value, &details.text)
}

/// The message is the first line of the exception description (which is how
/// the engine renders `Error.name: Error.message`); the source line comes
/// from the first `:line:column` pair in the description's stack text.
/// `throw "some string"` has no description, only a primitive value.
fn classify_exception(
    description: Option<&str>,
    thrown_value: Option<&str>,
    detail_text: &str,
) -> Finding {
    let text = if let Some(description) = description {
        description.lines().next().unwrap_or_default().to_string()
    } else if let Some(thrown) = thrown_value {
        thrown.to_string()
    } else {
        detail_text.to_string()
    };

    let mut finding = Finding::new(FindingKind::UncaughtException, text);
    if let Some(line) = description.and_then(extract_line) {
        finding = finding.with_line(line);
    }
    finding
}

/// Message format for a failed resource load.
fn resource_failure_text(error_text: &str, url: &str) -> String {
    format!("{error_text}: {url}")
}
