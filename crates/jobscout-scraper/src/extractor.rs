//! Generic job extraction driven by per-source definitions.
//!
//! One algorithm serves every supported board: check out a page session,
//! present the configured client identity, navigate to the built search
//! URL, wait for the results container, and project the DOM into job
//! records. Which URL, which selectors, and which fields are mandatory all
//! come from the source definition.

use crate::error::{Result, ScrapeError};
use crate::parser::{JobParser, RawJob};
use crate::url_builder::{build_search_url, origin_of};
use async_trait::async_trait;
use jobscout_browser::{PageSession, SessionPool};
use jobscout_core::{JobRecord, JobStatus, Source};
use jobscout_sources::{SourceDefinition, SourceRegistry};
use std::time::Duration;
use tracing::{debug, info};

/// One search request as seen by an extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Search keywords, already validated as non-empty
    pub keywords: String,
    /// Search location
    pub location: String,
    /// Result page offset passed to the board's pagination
    pub page_offset: usize,
}

/// Capability of producing job records from a listing source.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Warm up shared machinery before a run.
    ///
    /// Called once per request before any events are streamed, so a broken
    /// browser install surfaces as a plain error response instead of a dead
    /// stream.
    async fn prepare(&self) -> Result<()> {
        Ok(())
    }

    /// Extract up to `limit` job records from `source`.
    async fn extract(
        &self,
        source: Source,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<JobRecord>>;
}

/// Browser-backed [`Extractor`] over the source registry.
pub struct JobExtractor {
    pool: SessionPool,
    registry: SourceRegistry,
    user_agent: Option<String>,
    navigation_timeout: Duration,
    results_timeout: Duration,
}

impl JobExtractor {
    /// Create an extractor with default timeouts.
    #[must_use]
    pub fn new(pool: SessionPool, registry: SourceRegistry) -> Self {
        Self {
            pool,
            registry,
            user_agent: None,
            navigation_timeout: Duration::from_secs(30),
            results_timeout: Duration::from_secs(10),
        }
    }

    /// Set the client identification string presented to scraped boards.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set how long a results page gets to settle after navigation.
    #[must_use]
    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Set how long to wait for a board's results container.
    #[must_use]
    pub fn with_results_timeout(mut self, timeout: Duration) -> Self {
        self.results_timeout = timeout;
        self
    }

    async fn fetch_raw(
        &self,
        session: &PageSession,
        definition: &SourceDefinition,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<RawJob>> {
        if let Some(user_agent) = &self.user_agent {
            session.set_user_agent(user_agent).await?;
        }

        let url = build_search_url(
            &definition.search_url,
            &query.keywords,
            &query.location,
            query.page_offset,
        );
        debug!(source = %definition.source, %url, "navigating to search results");

        session.navigate(&url, self.navigation_timeout).await?;

        session
            .wait_for_selector(&definition.selectors.results_ready, self.results_timeout)
            .await
            .map_err(|_| ScrapeError::ResultsTimeout {
                source: definition.source,
                timeout_secs: self.results_timeout.as_secs(),
            })?;

        let html = session.content().await?;

        let parser = JobParser::new(
            definition.source,
            &definition.selectors,
            definition.link_required,
            origin_of(&url),
        );

        let mut jobs = parser.parse(&html)?;
        jobs.truncate(limit);
        Ok(jobs)
    }

    fn to_records(source: Source, raw: Vec<RawJob>) -> Vec<JobRecord> {
        let discovered_at = chrono::Utc::now().timestamp_millis();

        raw.into_iter()
            .enumerate()
            .map(|(index, job)| JobRecord {
                id: format!("{}-{}-{}", source.tag(), discovered_at, index),
                title: job.title,
                company: job.company,
                location: job.location,
                job_url: job.url.unwrap_or_default(),
                posted_date: job.posted_date,
                source,
                status: JobStatus::Scraped,
                experience: job.experience,
                career_page_url: None,
                hr_email: None,
            })
            .collect()
    }
}

#[async_trait]
impl Extractor for JobExtractor {
    async fn prepare(&self) -> Result<()> {
        self.pool.ensure_launched().await?;
        Ok(())
    }

    async fn extract(
        &self,
        source: Source,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<JobRecord>> {
        let definition = self.registry.get(source)?;
        let session = self.pool.acquire().await?;

        let raw = self.fetch_raw(&session, &definition, query, limit).await;

        // The page goes back no matter how the fetch went.
        session.close().await;

        let raw = raw?;
        info!(%source, count = raw.len(), "extracted job cards");

        Ok(Self::to_records(source, raw))
    }
}
