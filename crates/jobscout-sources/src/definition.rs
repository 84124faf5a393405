//! Source definition types and structures.
//!
//! This module defines the data that distinguishes one job board from
//! another: where to search and which CSS selectors project a results page
//! into job records.

use crate::error::{Result, SourceError};
use jobscout_core::Source;
use serde::{Deserialize, Serialize};

/// Complete configuration for one job listing source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDefinition {
    /// Which source this definition describes
    pub source: Source,

    /// Search URL template with `{keywords}`, `{location}` and `{page}`
    /// placeholders
    pub search_url: String,

    /// Whether a posting link is mandatory for a record to be kept.
    /// Sources without it keep records with an empty link.
    pub link_required: bool,

    /// CSS selectors for the source's results page
    pub selectors: SelectorSet,
}

impl SourceDefinition {
    /// Get the human-readable source name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.source.display_name()
    }

    /// Validate the source definition for completeness and correctness.
    pub fn validate(&self) -> Result<()> {
        if self.search_url.is_empty() {
            return Err(SourceError::ValidationError {
                source: self.source,
                reason: "search URL cannot be empty".to_string(),
            });
        }

        if !self.search_url.contains("{keywords}") {
            return Err(SourceError::ValidationError {
                source: self.source,
                reason: "search URL must contain a {keywords} placeholder".to_string(),
            });
        }

        self.selectors.validate(self.source)?;

        if self.link_required && self.selectors.link.as_deref().unwrap_or("").is_empty() {
            return Err(SourceError::ValidationError {
                source: self.source,
                reason: "link selector is required when link_required is set".to_string(),
            });
        }

        Ok(())
    }
}

/// CSS selectors projecting a results page into job fields.
///
/// `results_ready`, `item`, `title` and `company` are mandatory for every
/// source. The rest are secondary fields some boards simply don't have.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorSet {
    /// Selector that signals the results list has rendered
    pub results_ready: String,

    /// Selector matching one job card within the results list
    pub item: String,

    /// Selector for the job title within a card
    pub title: String,

    /// Selector for the company name within a card
    pub company: String,

    /// Selector for the posting link within a card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Selector for the listed location within a card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Selector for the posting date within a card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,

    /// Selector for the experience requirement within a card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
}

impl SelectorSet {
    /// Validate that the mandatory selectors are present.
    fn validate(&self, source: Source) -> Result<()> {
        let mandatory = [
            ("results_ready", &self.results_ready),
            ("item", &self.item),
            ("title", &self.title),
            ("company", &self.company),
        ];

        for (field, selector) in mandatory {
            if selector.is_empty() {
                return Err(SourceError::ValidationError {
                    source,
                    reason: format!("selector {field} cannot be empty"),
                });
            }
        }

        Ok(())
    }
}
