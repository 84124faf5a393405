//! JobScout Scraper - Job extraction and enrichment pipeline.
//!
//! This crate provides the scraping infrastructure for aggregating job
//! postings from JavaScript-heavy boards. It coordinates browser automation,
//! DOM projection into job records, contact enrichment, and incremental
//! progress reporting over an event channel.
//!
//! # Features
//!
//! - One generic extraction algorithm driven by per-source definitions
//! - Per-source failure isolation: a board that breaks or times out
//!   contributes zero results without failing the run
//! - Career page and contact email discovery for the head of the result list
//! - Progress events with a guaranteed terminal completion event
//!
//! # Example
//!
//! ```rust,ignore
//! use jobscout_scraper::ScrapeOrchestrator;
//! use std::sync::Arc;
//!
//! let orchestrator = ScrapeOrchestrator::new(
//!     Arc::new(extractor),
//!     Arc::new(enricher),
//! );
//!
//! let (tx, mut rx) = tokio::sync::mpsc::channel(16);
//! orchestrator.run(plan, tx).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod enrichment;
pub mod error;
pub mod extractor;
pub mod orchestrator;
#[allow(missing_docs)]
pub mod parser;
#[allow(missing_docs)]
pub mod url_builder;

// Re-export commonly used types
pub use enrichment::{Enricher, WebEnricher};
pub use error::{Result, ScrapeError};
pub use extractor::{Extractor, JobExtractor, SearchQuery};
pub use orchestrator::ScrapeOrchestrator;
pub use parser::{JobParser, RawJob};
pub use url_builder::build_search_url;
