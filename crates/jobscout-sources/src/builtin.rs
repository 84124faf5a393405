//! Built-in definitions for the supported job boards.
//!
//! Selector sets here track the public (logged-out) markup of each board
//! and are the piece most likely to need maintenance when a board ships a
//! redesign.

use crate::definition::{SelectorSet, SourceDefinition};
use jobscout_core::Source;

/// All built-in source definitions, in a stable order.
#[must_use]
pub fn definitions() -> Vec<SourceDefinition> {
    vec![linkedin(), naukri(), indeed(), timesjobs()]
}

fn linkedin() -> SourceDefinition {
    SourceDefinition {
        source: Source::Linkedin,
        search_url:
            "https://www.linkedin.com/jobs/search?keywords={keywords}&location={location}&start={page}"
                .to_string(),
        // Guest search cards without a link lead nowhere, so drop them.
        link_required: true,
        selectors: SelectorSet {
            results_ready: "ul.jobs-search__results-list".to_string(),
            item: "ul.jobs-search__results-list li".to_string(),
            title: "h3.base-search-card__title".to_string(),
            company: "h4.base-search-card__subtitle".to_string(),
            link: Some("a.base-card__full-link".to_string()),
            location: Some("span.job-search-card__location".to_string()),
            posted_date: Some("time".to_string()),
            experience: None,
        },
    }
}

fn naukri() -> SourceDefinition {
    SourceDefinition {
        source: Source::Naukri,
        search_url: "https://www.naukri.com/jobs-in-{location}?k={keywords}&pageNo={page}"
            .to_string(),
        link_required: false,
        selectors: SelectorSet {
            results_ready: "div.srp-jobtuple-wrapper".to_string(),
            item: "div.srp-jobtuple-wrapper".to_string(),
            title: "a.title".to_string(),
            company: "a.comp-name".to_string(),
            link: Some("a.title".to_string()),
            location: Some("span.locWdth".to_string()),
            posted_date: Some("span.job-post-day".to_string()),
            experience: Some("span.expwdth".to_string()),
        },
    }
}

fn indeed() -> SourceDefinition {
    SourceDefinition {
        source: Source::Indeed,
        search_url: "https://in.indeed.com/jobs?q={keywords}&l={location}&start={page}".to_string(),
        link_required: false,
        selectors: SelectorSet {
            results_ready: "div#mosaic-provider-jobcards".to_string(),
            item: "div.job_seen_beacon".to_string(),
            title: "h2.jobTitle span".to_string(),
            company: "span[data-testid=\"company-name\"]".to_string(),
            link: Some("h2.jobTitle a".to_string()),
            location: Some("div[data-testid=\"text-location\"]".to_string()),
            posted_date: Some("span.date".to_string()),
            experience: None,
        },
    }
}

fn timesjobs() -> SourceDefinition {
    SourceDefinition {
        source: Source::Timesjobs,
        search_url: "https://www.timesjobs.com/candidate/job-search.html?searchType=personalizedSearch&from=submit&txtKeywords={keywords}&txtLocation={location}&sequence={page}"
            .to_string(),
        link_required: false,
        selectors: SelectorSet {
            results_ready: "ul.new-joblist".to_string(),
            item: "li.clearfix.job-bx".to_string(),
            title: "h2 a".to_string(),
            company: "h3.joblist-comp-name".to_string(),
            link: Some("h2 a".to_string()),
            location: Some("ul.top-jd-dtl li span".to_string()),
            posted_date: Some("span.sim-posted span".to_string()),
            experience: None,
        },
    }
}
