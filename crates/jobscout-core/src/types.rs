//! Shared types used across the JobScout service.
//!
//! This module defines the wire-level data model: the supported listing
//! sources, job records, the scrape request and its validated form, and the
//! progress events streamed back to the caller.

use crate::error::JobScoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// External job listing sources supported by the extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// LinkedIn public jobs search
    Linkedin,
    /// Naukri.com
    Naukri,
    /// Indeed
    Indeed,
    /// TimesJobs
    Timesjobs,
}

impl Source {
    /// Get the lowercase wire tag for this source.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Linkedin => "linkedin",
            Self::Naukri => "naukri",
            Self::Indeed => "indeed",
            Self::Timesjobs => "timesjobs",
        }
    }

    /// Get a human-readable display name for progress messages.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Linkedin => "LinkedIn",
            Self::Naukri => "Naukri",
            Self::Indeed => "Indeed",
            Self::Timesjobs => "TimesJobs",
        }
    }

    /// All known sources, in a stable order.
    #[must_use]
    pub fn all() -> [Source; 4] {
        [Self::Linkedin, Self::Naukri, Self::Indeed, Self::Timesjobs]
    }
}

impl FromStr for Source {
    type Err = JobScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linkedin" => Ok(Self::Linkedin),
            "naukri" => Ok(Self::Naukri),
            "indeed" => Ok(Self::Indeed),
            "timesjobs" => Ok(Self::Timesjobs),
            other => Err(JobScoutError::Validation(format!(
                "Unknown source: {other}"
            ))),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Lifecycle tag for a job record.
///
/// Records start as `scraped`; the enrichment stage promotes the ones it
/// processed to `enriched`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Extracted from a source, not yet enriched
    Scraped,
    /// Passed through the enrichment stage
    Enriched,
}

/// A single aggregated job posting.
///
/// `title`, `company`, `job_url` and `source` are always present once a
/// record exists. Enrichment fields are absent until the enrichment stage
/// runs and are only ever added, never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    /// Opaque identifier, unique within one response
    /// (`<source tag>-<epoch millis>-<positional index>`).
    pub id: String,
    /// Job title
    pub title: String,
    /// Company name
    pub company: String,
    /// Listed location, when the source exposes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Link to the posting. Empty when the source does not expose one.
    pub job_url: String,
    /// Posting date as the source displays it (opaque string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
    /// Which source produced this record
    pub source: Source,
    /// Lifecycle status
    pub status: JobStatus,
    /// Experience requirement, for sources that list one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    /// Company career-page URL discovered by enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_page_url: Option<String>,
    /// Contact email discovered by enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr_email: Option<String>,
}

/// Default cap on the total number of results in a response.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Incoming scrape request as received on the wire.
///
/// All fields are lenient so that validation, not deserialization, decides
/// what is acceptable and with which message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrapeRequest {
    /// Search keywords (required, non-empty after trimming)
    pub keywords: Option<String>,
    /// Search location; falls back to the configured default region
    pub location: Option<String>,
    /// Requested source identifiers (required, non-empty, known values)
    pub sources: Vec<String>,
    /// Cap on the total number of results (positive, default 20)
    pub max_results: Option<u32>,
}

impl ScrapeRequest {
    /// Validate the request into an executable [`ScrapePlan`].
    ///
    /// # Errors
    /// Returns `JobScoutError::Validation` when keywords are missing or
    /// blank, no source is requested, a source name is unknown, or
    /// `max_results` is zero. The missing-keywords message is part of the
    /// HTTP contract and must stay exactly `"Keywords are required"`.
    pub fn validate(&self, default_location: &str) -> Result<ScrapePlan, JobScoutError> {
        let keywords = self
            .keywords
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| JobScoutError::Validation("Keywords are required".to_string()))?
            .to_string();

        if self.sources.is_empty() {
            return Err(JobScoutError::Validation(
                "At least one source is required".to_string(),
            ));
        }

        // Requested sources form a set: dedupe while preserving caller order.
        let mut sources = Vec::with_capacity(self.sources.len());
        for name in &self.sources {
            let source = Source::from_str(name)?;
            if !sources.contains(&source) {
                sources.push(source);
            }
        }

        let max_results = match self.max_results {
            None => DEFAULT_MAX_RESULTS,
            Some(0) => {
                return Err(JobScoutError::Validation(
                    "maxResults must be a positive integer".to_string(),
                ))
            }
            Some(n) => n as usize,
        };

        let location = self
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(default_location)
            .to_string();

        Ok(ScrapePlan {
            keywords,
            location,
            sources,
            max_results,
        })
    }
}

/// A validated scrape request, ready for the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapePlan {
    /// Non-empty search keywords
    pub keywords: String,
    /// Resolved search location
    pub location: String,
    /// Deduplicated sources in caller order
    pub sources: Vec<Source>,
    /// Total result cap
    pub max_results: usize,
}

impl ScrapePlan {
    /// Per-source result cap: `max_results` distributed evenly across the
    /// requested sources, ceiling-rounded.
    #[must_use]
    pub fn per_source_cap(&self) -> usize {
        self.max_results.div_ceil(self.sources.len())
    }
}

/// A unit of the incremental status protocol streamed to the caller.
///
/// Wire form is a tagged union:
/// `{"type":"progress","message":...,"progress":0-100}` or
/// `{"type":"complete","jobs":[...]}`. Percent values are non-decreasing
/// within one stream and exactly one `complete` event terminates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProgressEvent {
    /// Pipeline milestone with a percent in 0..=100
    Progress {
        /// Human-readable milestone description
        message: String,
        /// Completion percent, non-decreasing within a stream
        progress: u8,
    },
    /// Terminal event carrying the full (possibly partially enriched) list
    Complete {
        /// Aggregated job records
        jobs: Vec<JobRecord>,
    },
}

impl ProgressEvent {
    /// Build a progress milestone event.
    #[must_use]
    pub fn progress(message: impl Into<String>, progress: u8) -> Self {
        Self::Progress {
            message: message.into(),
            progress,
        }
    }

    /// Build the terminal event.
    #[must_use]
    pub fn complete(jobs: Vec<JobRecord>) -> Self {
        Self::Complete { jobs }
    }
}
