//! Contact discovery for scraped jobs.
//!
//! Finds a company's career page through a web search and pulls a contact
//! email off that page. Lookups are best-effort: any failure degrades to
//! "nothing found" and the pipeline carries on without the extra fields.

use crate::error::Result;
use async_trait::async_trait;
use jobscout_browser::SessionPool;
use jobscout_core::EnrichmentConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;
use urlencoding::encode;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

/// Address parts that suggest a hiring contact rather than a generic inbox.
const HIRING_KEYWORDS: [&str; 5] = ["hr", "careers", "recruitment", "jobs", "talent"];

/// Capability of discovering contact details for a company.
#[async_trait]
pub trait Enricher: Send + Sync {
    /// Find the company's career page, if one can be discovered.
    async fn find_career_page(&self, company: &str) -> Result<Option<String>>;

    /// Find a hiring contact email on the given page, if one can be
    /// discovered. A `None` page short-circuits to `None`.
    async fn find_hr_email(&self, career_page_url: Option<&str>) -> Result<Option<String>>;
}

/// Browser-backed [`Enricher`] that searches the public web.
pub struct WebEnricher {
    pool: SessionPool,
    config: EnrichmentConfig,
    user_agent: Option<String>,
    last_search: Mutex<Option<Instant>>,
}

impl WebEnricher {
    /// Create an enricher over the shared session pool.
    #[must_use]
    pub fn new(pool: SessionPool, config: EnrichmentConfig) -> Self {
        Self {
            pool,
            config,
            user_agent: None,
            last_search: Mutex::new(None),
        }
    }

    /// Set the client identification string presented to visited sites.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Space out consecutive searches so the search engine sees a human
    /// pace rather than a burst.
    async fn pace(&self) {
        let mut last = self.last_search.lock().await;

        if let Some(previous) = *last {
            let min_interval = Duration::from_millis(self.config.min_search_interval_ms);
            let elapsed = previous.elapsed();
            if elapsed < min_interval {
                tokio::time::sleep(min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }

    fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.config.search_timeout_secs)
    }

    async fn search_career_page(&self, company: &str) -> jobscout_browser::Result<Option<String>> {
        let query = format!("{company} careers");
        let url = self
            .config
            .search_url_template
            .replace("{query}", &encode(&query));

        let session = self.pool.acquire().await?;

        let first_result = async {
            if let Some(user_agent) = &self.user_agent {
                session.set_user_agent(user_agent).await?;
            }
            session.navigate(&url, self.search_timeout()).await?;
            session
                .first_attribute(&self.config.organic_result_selector, "href")
                .await
        }
        .await;

        session.close().await;

        // Search engines sometimes hand back tracking stubs; only a real
        // absolute link counts as a hit.
        Ok(first_result?.filter(|href| href.starts_with("http")))
    }

    async fn scan_page_for_email(&self, url: &str) -> jobscout_browser::Result<Option<String>> {
        let session = self.pool.acquire().await?;

        let text = async {
            if let Some(user_agent) = &self.user_agent {
                session.set_user_agent(user_agent).await?;
            }
            session.navigate(url, self.search_timeout()).await?;
            session.visible_text().await
        }
        .await;

        session.close().await;

        Ok(pick_hr_email(&extract_emails(&text?)))
    }
}

#[async_trait]
impl Enricher for WebEnricher {
    async fn find_career_page(&self, company: &str) -> Result<Option<String>> {
        self.pace().await;

        match self.search_career_page(company).await {
            Ok(link) => {
                debug!(company, found = link.is_some(), "career page search done");
                Ok(link)
            }
            Err(err) => {
                debug!(company, %err, "career page search failed");
                Ok(None)
            }
        }
    }

    async fn find_hr_email(&self, career_page_url: Option<&str>) -> Result<Option<String>> {
        let Some(url) = career_page_url else {
            return Ok(None);
        };

        match self.scan_page_for_email(url).await {
            Ok(email) => Ok(email),
            Err(err) => {
                debug!(url, %err, "email scan failed");
                Ok(None)
            }
        }
    }
}

/// All email-shaped strings in `text`, deduplicated in order of appearance.
#[must_use]
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut emails = Vec::new();

    for found in EMAIL_REGEX.find_iter(text) {
        let email = found.as_str().to_string();
        if !emails.contains(&email) {
            emails.push(email);
        }
    }

    emails
}

/// Pick the most contact-worthy address: one whose local part or domain
/// mentions a hiring keyword, otherwise the first one found.
#[must_use]
pub fn pick_hr_email(emails: &[String]) -> Option<String> {
    let preferred = emails.iter().find(|email| {
        let lower = email.to_lowercase();
        let Some((local, domain)) = lower.split_once('@') else {
            return false;
        };

        HIRING_KEYWORDS
            .iter()
            .any(|keyword| local.contains(keyword) || domain.contains(keyword))
    });

    preferred.or_else(|| emails.first()).cloned()
}
