//! Browser lifecycle management and process control.
//!
//! [`BrowserSession`] owns the one Chrome process shared by a whole
//! validation run. It launches headless, hands out observed pages, and is
//! closed exactly once: explicitly by the run, or by the process handle's
//! Drop if the run died before getting there.

use crate::error::{BrowserError, Result};
use crate::page::ObservedPage;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Configuration for launching the browser engine.
///
/// The harness always runs headless with the sandbox disabled; the only real
/// knob is which binary to run.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Chrome/Chromium executable override (None = auto-detect).
    pub executable: Option<PathBuf>,
}

impl SessionConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a specific Chrome/Chromium binary.
    #[must_use]
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    fn to_browser_config(&self) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder()
            .arg("--headless")
            // The sandbox needs user namespaces, which containers and CI
            // runners frequently lack. The documents under test are local
            // artifacts, not hostile web content.
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            // Prevents /dev/shm exhaustion in containerized environments
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu");

        // A unique user data directory avoids ProcessSingleton conflicts
        // when several runs share a machine.
        let profile_dir =
            std::env::temp_dir().join(format!("smolder-{}", uuid::Uuid::new_v4()));
        config = config.arg(format!("--user-data-dir={}", profile_dir.display()));

        if let Some(path) = &self.executable {
            config = config.chrome_executable(path.clone());
        }

        config.build().map_err(|e| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

/// The one browser process shared by a validation run.
pub struct BrowserSession {
    inner: Arc<Mutex<Option<Browser>>>,
}

impl BrowserSession {
    /// Launches a headless Chrome process and connects over CDP.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` carrying the engine's failure text when Chrome
    /// is missing, not executable, or dies during startup.
    pub async fn launch(config: SessionConfig) -> Result<Self> {
        debug!("launching browser with config: {config:?}");

        let browser_config = config.to_browser_config()?;

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| BrowserError::LaunchFailed {
                    reason: e.to_string(),
                    source: Some(Box::new(e)),
                })?;

        // Drive the CDP message loop; chromiumoxide delivers no events
        // without it.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("browser handler error: {e}");
                }
            }
        });

        debug!("browser launched");

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
        })
    }

    /// Opens a fresh tab with a fresh observer attached.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` after `close()`, or a connection error if the
    /// tab cannot be created.
    pub async fn new_page(&self) -> Result<ObservedPage> {
        let guard = self.inner.lock().await;
        let browser = guard.as_ref().ok_or(BrowserError::AlreadyClosed)?;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        ObservedPage::new(page).await
    }

    /// Closes the browser and kills the Chrome process. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser refuses to shut down gracefully; the
    /// process is still killed when the handle drops.
    pub async fn close(&self) -> Result<()> {
        let mut guard = self.inner.lock().await;

        if let Some(mut browser) = guard.take() {
            debug!("closing browser");
            browser
                .close()
                .await
                .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
        }

        Ok(())
    }

    /// Returns true once the session has been closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Drop is synchronous, so a graceful close is impossible here;
        // chromiumoxide's Browser Drop kills the process instead.
        if let Ok(guard) = self.inner.try_lock() {
            if guard.is_some() {
                warn!("browser session dropped without close; Chrome process will be killed");
            }
        }
    }
}
