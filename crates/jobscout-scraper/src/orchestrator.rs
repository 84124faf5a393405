//! Scrape pipeline orchestration.
//!
//! The orchestrator walks one request through its stages: dispatch each
//! requested source in caller order, merge and cap the results, enrich the
//! head of the list, and stream progress events into a channel. The
//! receiving side dropping the channel cancels the run.

use crate::enrichment::Enricher;
use crate::error::{Result, ScrapeError};
use crate::extractor::{Extractor, SearchQuery};
use jobscout_core::{JobRecord, JobStatus, ProgressEvent, ScrapePlan};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Percent reported when the first source starts.
const DISPATCH_BASE: u8 = 10;

/// Percent span the dispatch stage spreads across the sources.
const DISPATCH_SPAN: u8 = 50;

/// Percent reported when enrichment starts.
const ENRICH_PERCENT: u8 = 70;

/// Coordinates a scrape run end to end.
pub struct ScrapeOrchestrator {
    /// Produces job records per source
    extractor: Arc<dyn Extractor>,
    /// Discovers contact details for the head of the list
    enricher: Arc<dyn Enricher>,
    /// How many jobs from the front of the merged list get enriched
    enrichment_limit: usize,
}

impl ScrapeOrchestrator {
    /// Create an orchestrator with the default enrichment limit.
    #[must_use]
    pub fn new(extractor: Arc<dyn Extractor>, enricher: Arc<dyn Enricher>) -> Self {
        Self {
            extractor,
            enricher,
            enrichment_limit: 5,
        }
    }

    /// Set how many jobs from the front of the merged list get enriched.
    ///
    /// Enrichment runs sequentially against external sites, so this limit
    /// is what keeps response times bounded; raise it with care.
    #[must_use]
    pub fn with_enrichment_limit(mut self, limit: usize) -> Self {
        self.enrichment_limit = limit;
        self
    }

    /// Run the pipeline for `plan`, streaming events into `tx`.
    ///
    /// Emits a non-decreasing sequence of progress percents and finishes
    /// with exactly one completion event carrying the full result list. A
    /// dropped receiver ends the run early without an error.
    pub async fn run(&self, plan: ScrapePlan, tx: mpsc::Sender<ProgressEvent>) -> Result<()> {
        let run_id = uuid::Uuid::new_v4();
        info!(
            %run_id,
            keywords = %plan.keywords,
            location = %plan.location,
            sources = plan.sources.len(),
            max_results = plan.max_results,
            "starting scrape run"
        );

        let query = SearchQuery {
            keywords: plan.keywords.clone(),
            location: plan.location.clone(),
            page_offset: 0,
        };

        let per_source_cap = plan.per_source_cap();
        let source_count = plan.sources.len();
        let mut jobs: Vec<JobRecord> = Vec::new();

        for (index, &source) in plan.sources.iter().enumerate() {
            let event = ProgressEvent::progress(
                format!("Scraping {}...", source.display_name()),
                dispatch_percent(index, source_count),
            );
            if !Self::emit(&tx, event).await {
                return Ok(());
            }

            match self.extractor.extract(source, &query, per_source_cap).await {
                Ok(batch) => {
                    debug!(%source, count = batch.len(), "source finished");
                    jobs.extend(batch);
                }
                Err(err) => {
                    // One broken board must not sink the whole run.
                    warn!(%source, %err, "source failed, continuing with others");
                }
            }
        }

        jobs.truncate(plan.max_results);

        let event = ProgressEvent::progress("Finding career pages...", ENRICH_PERCENT);
        if !Self::emit(&tx, event).await {
            return Ok(());
        }

        let enrich_count = jobs.len().min(self.enrichment_limit);
        for job in jobs.iter_mut().take(enrich_count) {
            self.enrich_job(job).await;
        }

        if !Self::emit(&tx, ProgressEvent::progress("Scraping completed", 100)).await {
            return Ok(());
        }

        info!(%run_id, total = jobs.len(), enriched = enrich_count, "scrape run finished");
        Self::emit(&tx, ProgressEvent::complete(jobs)).await;

        Ok(())
    }

    /// Enrich one job in place. A failed lookup leaves the job as scraped,
    /// keeping whatever fields were assigned before the failure.
    async fn enrich_job(&self, job: &mut JobRecord) {
        let outcome = async {
            let career_page = self.enricher.find_career_page(&job.company).await?;
            job.career_page_url = career_page.clone();

            job.hr_email = self.enricher.find_hr_email(career_page.as_deref()).await?;

            Ok::<(), ScrapeError>(())
        }
        .await;

        match outcome {
            Ok(()) => job.status = JobStatus::Enriched,
            Err(err) => {
                debug!(company = %job.company, %err, "enrichment failed, job stays scraped");
            }
        }
    }

    /// Send one event, reporting whether the receiver is still listening.
    async fn emit(tx: &mpsc::Sender<ProgressEvent>, event: ProgressEvent) -> bool {
        if tx.send(event).await.is_err() {
            debug!("event receiver dropped, cancelling run");
            return false;
        }
        true
    }
}

/// Percent for source `index` of `count`, spacing the dispatch stage
/// evenly between `DISPATCH_BASE` and `DISPATCH_BASE + DISPATCH_SPAN`.
#[allow(clippy::cast_possible_truncation)]
fn dispatch_percent(index: usize, count: usize) -> u8 {
    DISPATCH_BASE + (index * usize::from(DISPATCH_SPAN) / count.max(1)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jobscout_core::Source;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(source: Source, index: usize) -> JobRecord {
        JobRecord {
            id: format!("{}-1700000000000-{index}", source.tag()),
            title: format!("Role {index}"),
            company: format!("{}-co-{index}", source.tag()),
            location: Some("Bengaluru".to_string()),
            job_url: format!("https://example.com/{}/{index}", source.tag()),
            posted_date: None,
            source,
            status: JobStatus::Scraped,
            experience: None,
            career_page_url: None,
            hr_email: None,
        }
    }

    fn plan(sources: Vec<Source>, max_results: usize) -> ScrapePlan {
        ScrapePlan {
            keywords: "rust developer".to_string(),
            location: "India".to_string(),
            sources,
            max_results,
        }
    }

    /// Produces `per_source` records per source; `failing` sources error.
    struct StubExtractor {
        per_source: usize,
        honor_limit: bool,
        failing: Option<Source>,
    }

    impl StubExtractor {
        fn returning(per_source: usize) -> Self {
            Self {
                per_source,
                honor_limit: true,
                failing: None,
            }
        }
    }

    #[async_trait]
    impl Extractor for StubExtractor {
        async fn extract(
            &self,
            source: Source,
            _query: &SearchQuery,
            limit: usize,
        ) -> Result<Vec<JobRecord>> {
            if self.failing == Some(source) {
                return Err(ScrapeError::ResultsTimeout {
                    source,
                    timeout_secs: 10,
                });
            }

            let count = if self.honor_limit {
                self.per_source.min(limit)
            } else {
                self.per_source
            };

            Ok((0..count).map(|i| record(source, i)).collect())
        }
    }

    /// Resolves every company; optionally errors for one of them.
    struct StubEnricher {
        career_page_calls: AtomicUsize,
        fail_for: Option<String>,
    }

    impl StubEnricher {
        fn new() -> Self {
            Self {
                career_page_calls: AtomicUsize::new(0),
                fail_for: None,
            }
        }

        fn failing_for(company: &str) -> Self {
            Self {
                career_page_calls: AtomicUsize::new(0),
                fail_for: Some(company.to_string()),
            }
        }
    }

    #[async_trait]
    impl Enricher for StubEnricher {
        async fn find_career_page(&self, company: &str) -> Result<Option<String>> {
            self.career_page_calls.fetch_add(1, Ordering::SeqCst);

            if self.fail_for.as_deref() == Some(company) {
                return Err(ScrapeError::Enrichment("search engine unreachable".to_string()));
            }

            Ok(Some(format!("https://{company}.example.com/careers")))
        }

        async fn find_hr_email(&self, career_page_url: Option<&str>) -> Result<Option<String>> {
            Ok(career_page_url.map(|_| "hr@example.com".to_string()))
        }
    }

    async fn run_and_collect(
        orchestrator: &ScrapeOrchestrator,
        plan: ScrapePlan,
    ) -> Vec<ProgressEvent> {
        let (tx, mut rx) = mpsc::channel(64);
        orchestrator.run(plan, tx).await.expect("run succeeds");

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    fn completed_jobs(events: &[ProgressEvent]) -> Vec<JobRecord> {
        events
            .iter()
            .find_map(|event| match event {
                ProgressEvent::Complete { jobs } => Some(jobs.clone()),
                ProgressEvent::Progress { .. } => None,
            })
            .expect("stream carries a complete event")
    }

    #[tokio::test]
    async fn test_merge_preserves_caller_order() {
        let orchestrator = ScrapeOrchestrator::new(
            Arc::new(StubExtractor::returning(12)),
            Arc::new(StubEnricher::new()),
        );

        let events = run_and_collect(
            &orchestrator,
            plan(vec![Source::Naukri, Source::Linkedin], 10),
        )
        .await;
        let jobs = completed_jobs(&events);

        assert_eq!(jobs.len(), 10);
        assert!(jobs[..5].iter().all(|j| j.source == Source::Naukri));
        assert!(jobs[5..].iter().all(|j| j.source == Source::Linkedin));
    }

    #[tokio::test]
    async fn test_truncates_over_cap_batches() {
        // Extractor ignores its limit; the merge cap still holds.
        let extractor = StubExtractor {
            per_source: 12,
            honor_limit: false,
            failing: None,
        };
        let orchestrator =
            ScrapeOrchestrator::new(Arc::new(extractor), Arc::new(StubEnricher::new()));

        let events = run_and_collect(&orchestrator, plan(vec![Source::Linkedin], 10)).await;

        assert_eq!(completed_jobs(&events).len(), 10);
    }

    #[tokio::test]
    async fn test_failing_source_is_isolated() {
        let extractor = StubExtractor {
            per_source: 6,
            honor_limit: true,
            failing: Some(Source::Naukri),
        };
        let orchestrator =
            ScrapeOrchestrator::new(Arc::new(extractor), Arc::new(StubEnricher::new()));

        let events = run_and_collect(
            &orchestrator,
            plan(vec![Source::Linkedin, Source::Naukri], 20),
        )
        .await;
        let jobs = completed_jobs(&events);

        assert_eq!(jobs.len(), 6);
        assert!(jobs.iter().all(|j| j.source == Source::Linkedin));

        // The failed source still ran through the full event sequence
        let completes = events
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Complete { .. }))
            .count();
        assert_eq!(completes, 1);
    }

    #[tokio::test]
    async fn test_enrichment_covers_only_the_head() {
        let enricher = Arc::new(StubEnricher::new());
        let orchestrator = ScrapeOrchestrator::new(
            Arc::new(StubExtractor::returning(8)),
            Arc::clone(&enricher) as Arc<dyn Enricher>,
        );

        let events = run_and_collect(&orchestrator, plan(vec![Source::Linkedin], 8)).await;
        let jobs = completed_jobs(&events);

        assert_eq!(jobs.len(), 8);
        for job in &jobs[..5] {
            assert_eq!(job.status, JobStatus::Enriched);
            assert!(job.career_page_url.is_some());
            assert_eq!(job.hr_email.as_deref(), Some("hr@example.com"));
        }
        for job in &jobs[5..] {
            assert_eq!(job.status, JobStatus::Scraped);
            assert_eq!(job.career_page_url, None);
            assert_eq!(job.hr_email, None);
        }

        assert_eq!(enricher.career_page_calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_enrichment_limit_is_tunable() {
        let enricher = Arc::new(StubEnricher::new());
        let orchestrator = ScrapeOrchestrator::new(
            Arc::new(StubExtractor::returning(8)),
            Arc::clone(&enricher) as Arc<dyn Enricher>,
        )
        .with_enrichment_limit(2);

        let events = run_and_collect(&orchestrator, plan(vec![Source::Linkedin], 8)).await;
        let jobs = completed_jobs(&events);

        assert!(jobs[..2].iter().all(|j| j.status == JobStatus::Enriched));
        assert!(jobs[2..].iter().all(|j| j.status == JobStatus::Scraped));
        assert_eq!(enricher.career_page_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_enrichment_failure_leaves_job_scraped() {
        // First job's company errors during lookup; the rest enrich fine.
        let enricher = StubEnricher::failing_for("linkedin-co-0");
        let orchestrator = ScrapeOrchestrator::new(
            Arc::new(StubExtractor::returning(6)),
            Arc::new(enricher),
        );

        let events = run_and_collect(&orchestrator, plan(vec![Source::Linkedin], 6)).await;
        let jobs = completed_jobs(&events);

        assert_eq!(jobs[0].status, JobStatus::Scraped);
        assert_eq!(jobs[0].career_page_url, None);
        assert_eq!(jobs[0].hr_email, None);

        for job in &jobs[1..5] {
            assert_eq!(job.status, JobStatus::Enriched);
        }
    }

    #[tokio::test]
    async fn test_event_stream_shape() {
        let orchestrator = ScrapeOrchestrator::new(
            Arc::new(StubExtractor::returning(3)),
            Arc::new(StubEnricher::new()),
        );

        let events = run_and_collect(
            &orchestrator,
            plan(vec![Source::Linkedin, Source::Naukri], 10),
        )
        .await;

        // Two dispatch events, one enrichment event, one final progress,
        // one complete.
        assert_eq!(events.len(), 5);

        let percents: Vec<u8> = events
            .iter()
            .filter_map(|event| match event {
                ProgressEvent::Progress { progress, .. } => Some(*progress),
                ProgressEvent::Complete { .. } => None,
            })
            .collect();
        assert_eq!(percents, vec![10, 35, 70, 100]);
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));

        let messages: Vec<&str> = events
            .iter()
            .filter_map(|event| match event {
                ProgressEvent::Progress { message, .. } => Some(message.as_str()),
                ProgressEvent::Complete { .. } => None,
            })
            .collect();
        assert_eq!(
            messages,
            vec![
                "Scraping LinkedIn...",
                "Scraping Naukri...",
                "Finding career pages...",
                "Scraping completed"
            ]
        );

        // Terminal event comes last, exactly once
        assert!(matches!(events.last(), Some(ProgressEvent::Complete { .. })));
    }

    #[tokio::test]
    async fn test_dropped_receiver_cancels_cleanly() {
        let orchestrator = ScrapeOrchestrator::new(
            Arc::new(StubExtractor::returning(3)),
            Arc::new(StubEnricher::new()),
        );

        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let result = orchestrator
            .run(plan(vec![Source::Linkedin], 10), tx)
            .await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_dispatch_percent_spacing() {
        assert_eq!(dispatch_percent(0, 1), 10);
        assert_eq!(dispatch_percent(0, 2), 10);
        assert_eq!(dispatch_percent(1, 2), 35);
        assert_eq!(dispatch_percent(0, 4), 10);
        assert_eq!(dispatch_percent(3, 4), 47);
    }
}
