//! Application state shared across route handlers.

use jobscout_browser::{LaunchOptions, SessionPool};
use jobscout_core::AppConfig;
use jobscout_scraper::{Enricher, Extractor, JobExtractor, WebEnricher};
use jobscout_sources::SourceRegistry;
use std::sync::Arc;
use std::time::Duration;

/// Global application state, cloned into every handler.
///
/// The pool owns the one shared browser process; the extractor and
/// enricher hold clones of it and create page sessions per task. Nothing
/// here launches the browser up front, that happens lazily on the first
/// scrape request.
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration for this process
    pub config: Arc<AppConfig>,
    /// Shared browser process handle, shut down from `main` on exit
    pub pool: SessionPool,
    /// Job extraction pipeline stage
    pub extractor: Arc<dyn Extractor>,
    /// Contact discovery pipeline stage
    pub enricher: Arc<dyn Enricher>,
}

impl AppState {
    /// Wire up the full pipeline from configuration.
    pub fn new(config: AppConfig) -> Self {
        let pool = SessionPool::new(LaunchOptions {
            headless: config.browser.headless,
            window_width: config.browser.window_width,
            window_height: config.browser.window_height,
        });

        let registry = SourceRegistry::builtin();
        tracing::info!(sources = registry.count(), "source registry loaded");

        let extractor = JobExtractor::new(pool.clone(), registry)
            .with_user_agent(config.browser.user_agent.clone())
            .with_navigation_timeout(Duration::from_secs(config.browser.navigation_timeout_secs))
            .with_results_timeout(Duration::from_secs(config.scrape.results_timeout_secs));

        let enricher = WebEnricher::new(pool.clone(), config.enrichment.clone())
            .with_user_agent(config.browser.user_agent.clone());

        Self {
            config: Arc::new(config),
            pool,
            extractor: Arc::new(extractor),
            enricher: Arc::new(enricher),
        }
    }

    /// Build state around preconstructed pipeline stages.
    ///
    /// Lets tests swap in stub extractors and enrichers while keeping the
    /// routing and streaming layers real.
    pub fn with_pipeline(
        config: AppConfig,
        extractor: Arc<dyn Extractor>,
        enricher: Arc<dyn Enricher>,
    ) -> Self {
        let pool = SessionPool::new(LaunchOptions {
            headless: config.browser.headless,
            window_width: config.browser.window_width,
            window_height: config.browser.window_height,
        });

        Self {
            config: Arc::new(config),
            pool,
            extractor,
            enricher,
        }
    }
}
