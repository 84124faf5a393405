use crate::error::{BrowserError, Result};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::Page;
use std::time::Duration;
use tracing::debug;

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A page checked out from the session pool.
///
/// The page closes when the session is dropped, but prefer the explicit
/// [`PageSession::close`] so the close finishes before the next session
/// starts.
pub struct PageSession {
    page: Option<Page>,
    runtime: tokio::runtime::Handle,
}

impl PageSession {
    pub(crate) fn new(page: Page) -> Self {
        Self {
            page: Some(page),
            runtime: tokio::runtime::Handle::current(),
        }
    }

    fn page(&self) -> Result<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| BrowserError::ChromiumError("page already closed".to_string()))
    }

    /// Present `user_agent` as this page's client identification.
    pub async fn set_user_agent(&self, user_agent: &str) -> Result<()> {
        self.page()?
            .set_user_agent(SetUserAgentOverrideParams::new(user_agent))
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    /// Navigate to `url`, giving the page up to `timeout` to settle.
    ///
    /// Heavy boards routinely blow the load deadline while still rendering
    /// usable results, so running out of time is not an error; extraction
    /// continues with whatever is in the DOM.
    pub async fn navigate(&self, url: &str, timeout: Duration) -> Result<()> {
        let page = self.page()?;

        let settle = async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        };

        match tokio::time::timeout(timeout, settle).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(BrowserError::NavigationError(err.to_string())),
            Err(_) => {
                debug!(url, "navigation did not settle in time, continuing");
                Ok(())
            }
        }
    }

    /// Wait for `selector` to appear in the DOM.
    pub async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let page = self.page()?;
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(BrowserError::Timeout(format!(
                    "selector {selector} did not appear"
                )));
            }
            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    /// Full HTML of the current document.
    pub async fn content(&self) -> Result<String> {
        self.page()?
            .content()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }

    /// Visible text of the current document body.
    pub async fn visible_text(&self) -> Result<String> {
        self.page()?
            .evaluate("document.body ? document.body.innerText : ''")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?
            .into_value()
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }

    /// Value of `attribute` on the first element matching `selector`.
    pub async fn first_attribute(
        &self,
        selector: &str,
        attribute: &str,
    ) -> Result<Option<String>> {
        let element = self
            .page()?
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;

        element
            .attribute(attribute)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }

    /// Close the page, consuming the session.
    pub async fn close(mut self) {
        if let Some(page) = self.page.take() {
            if let Err(err) = page.close().await {
                debug!(%err, "failed to close page");
            }
        }
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        // Error paths skip the explicit close; finish it in the background.
        if let Some(page) = self.page.take() {
            self.runtime.spawn(async move {
                let _ = page.close().await;
            });
        }
    }
}
