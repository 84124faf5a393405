use crate::error::{BrowserError, Result};
use crate::session::PageSession;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::stream::StreamExt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Launch settings for the shared browser process.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
        }
    }
}

/// A running browser process plus its event drain task.
struct Engine {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl Engine {
    async fn launch(options: &LaunchOptions) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(options.window_width, options.window_height)
            .arg("--disable-gpu");

        if !options.headless {
            builder = builder.with_head();
        }

        let config = builder.build().map_err(BrowserError::LaunchFailed)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        // Drain CDP events for the lifetime of the process
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        info!("browser process launched");

        Ok(Self {
            browser,
            handler_task,
        })
    }
}

/// Shared handle to a single lazily-launched browser process.
///
/// The browser starts on the first [`SessionPool::acquire`] (or
/// [`SessionPool::ensure_launched`]) call, never at construction, so the
/// service comes up even on hosts where Chromium is broken until a scrape
/// actually needs it.
#[derive(Clone)]
pub struct SessionPool {
    options: LaunchOptions,
    slot: Arc<Mutex<Option<Engine>>>,
}

impl SessionPool {
    /// Create a pool without launching anything.
    #[must_use]
    pub fn new(options: LaunchOptions) -> Self {
        Self {
            options,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Launch the browser process if it is not already running.
    pub async fn ensure_launched(&self) -> Result<()> {
        let mut slot = self.slot.lock().await;

        if slot.is_none() {
            *slot = Some(Engine::launch(&self.options).await?);
        }

        Ok(())
    }

    /// Check out a fresh page session, launching the browser on first use.
    pub async fn acquire(&self) -> Result<PageSession> {
        self.ensure_launched().await?;

        let slot = self.slot.lock().await;
        let engine = slot
            .as_ref()
            .ok_or_else(|| BrowserError::ChromiumError("browser is shutting down".to_string()))?;

        let page = engine
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        Ok(PageSession::new(page))
    }

    /// Whether the browser process is currently running.
    pub async fn is_running(&self) -> bool {
        self.slot.lock().await.is_some()
    }

    /// Stop the browser process if it is running.
    ///
    /// Safe to call more than once; later calls are no-ops.
    pub async fn shutdown(&self) {
        let engine = self.slot.lock().await.take();

        if let Some(mut engine) = engine {
            if let Err(err) = engine.browser.close().await {
                warn!(%err, "browser did not close cleanly");
            }
            let _ = engine.browser.wait().await;
            engine.handler_task.abort();
            info!("browser process stopped");
        }
    }
}
