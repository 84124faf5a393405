use crate::error::{Result, ScrapeError};
use jobscout_core::Source;
use jobscout_sources::SelectorSet;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// A job card as projected straight off a results page, before record
/// identifiers and lifecycle state are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawJob {
    pub title: String,
    pub company: String,
    pub url: Option<String>,
    pub location: Option<String>,
    pub posted_date: Option<String>,
    pub experience: Option<String>,
}

pub struct JobParser<'a> {
    source: Source,
    selectors: &'a SelectorSet,
    link_required: bool,
    base_url: String,
}

impl<'a> JobParser<'a> {
    pub fn new(
        source: Source,
        selectors: &'a SelectorSet,
        link_required: bool,
        base_url: String,
    ) -> Self {
        Self {
            source,
            selectors,
            link_required,
            base_url,
        }
    }

    pub fn parse(&self, html: &str) -> Result<Vec<RawJob>> {
        let document = Html::parse_document(html);

        let item_selector =
            Selector::parse(&self.selectors.item).map_err(|e| ScrapeError::Extraction {
                source: self.source,
                reason: format!("Invalid item selector: {e}"),
            })?;

        let mut jobs = Vec::new();

        for item in document.select(&item_selector) {
            if let Some(job) = self.parse_item(&item) {
                jobs.push(job);
            }
        }

        Ok(jobs)
    }

    fn parse_item(&self, element: &ElementRef) -> Option<RawJob> {
        // Cards missing a mandatory field are dropped, never an error.
        let title = self.extract_text(element, &self.selectors.title)?;
        let company = self.extract_text(element, &self.selectors.company)?;

        let url = self
            .selectors
            .link
            .as_deref()
            .and_then(|sel| self.extract_href(element, sel));

        if self.link_required && url.is_none() {
            return None;
        }

        Some(RawJob {
            title,
            company,
            url,
            location: self.extract_optional(element, &self.selectors.location),
            posted_date: self.extract_optional(element, &self.selectors.posted_date),
            experience: self.extract_optional(element, &self.selectors.experience),
        })
    }

    fn extract_text(&self, element: &ElementRef, selector: &str) -> Option<String> {
        let sel = Selector::parse(selector).ok()?;

        element
            .select(&sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
    }

    fn extract_optional(&self, element: &ElementRef, selector: &Option<String>) -> Option<String> {
        selector
            .as_ref()
            .and_then(|sel| self.extract_text(element, sel))
    }

    fn extract_href(&self, element: &ElementRef, selector: &str) -> Option<String> {
        let sel = Selector::parse(selector).ok()?;

        element
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr("href"))
            .filter(|href| !href.is_empty())
            .map(|href| {
                if href.starts_with("http") {
                    href.to_string()
                } else {
                    format!("{}{}", self.base_url, href)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_selectors() -> SelectorSet {
        SelectorSet {
            results_ready: ".results".to_string(),
            item: ".job-card".to_string(),
            title: ".title".to_string(),
            company: ".company".to_string(),
            link: Some("a.job-link".to_string()),
            location: Some(".location".to_string()),
            posted_date: Some(".posted".to_string()),
            experience: Some(".experience".to_string()),
        }
    }

    #[test]
    fn test_parse_job_cards() {
        let html = r#"
            <div class="results">
                <div class="job-card">
                    <a class="job-link" href="/jobs/backend-123">View</a>
                    <div class="title">Backend Engineer</div>
                    <div class="company">Acme Corp</div>
                    <div class="location">Bengaluru</div>
                    <div class="posted">2 days ago</div>
                    <div class="experience">3-5 Yrs</div>
                </div>
                <div class="job-card">
                    <a class="job-link" href="https://other.example.com/jobs/data-456">View</a>
                    <div class="title">Data Engineer</div>
                    <div class="company">Globex</div>
                </div>
            </div>
        "#;

        let selectors = test_selectors();
        let parser = JobParser::new(
            Source::Naukri,
            &selectors,
            false,
            "https://example.com".to_string(),
        );
        let jobs = parser.parse(html).expect("parse should succeed");

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Backend Engineer");
        assert_eq!(jobs[0].company, "Acme Corp");
        assert_eq!(
            jobs[0].url.as_deref(),
            Some("https://example.com/jobs/backend-123")
        );
        assert_eq!(jobs[0].experience.as_deref(), Some("3-5 Yrs"));

        // Absolute links pass through untouched
        assert_eq!(
            jobs[1].url.as_deref(),
            Some("https://other.example.com/jobs/data-456")
        );
        assert_eq!(jobs[1].location, None);
    }

    #[test]
    fn test_cards_missing_mandatory_fields_are_skipped() {
        let html = r#"
            <div class="results">
                <div class="job-card">
                    <div class="title">No Company Listed</div>
                </div>
                <div class="job-card">
                    <div class="company">No Title Listed</div>
                </div>
                <div class="job-card">
                    <div class="title">   </div>
                    <div class="company">Whitespace Title</div>
                </div>
                <div class="job-card">
                    <div class="title">Kept</div>
                    <div class="company">Acme Corp</div>
                </div>
            </div>
        "#;

        let selectors = test_selectors();
        let parser = JobParser::new(
            Source::Naukri,
            &selectors,
            false,
            "https://example.com".to_string(),
        );
        let jobs = parser.parse(html).expect("parse should succeed");

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Kept");
        assert_eq!(jobs[0].url, None);
    }

    #[test]
    fn test_link_required_drops_cards_without_links() {
        let html = r#"
            <div class="results">
                <div class="job-card">
                    <div class="title">No Link</div>
                    <div class="company">Acme Corp</div>
                </div>
                <div class="job-card">
                    <a class="job-link" href="/jobs/1">View</a>
                    <div class="title">Has Link</div>
                    <div class="company">Globex</div>
                </div>
            </div>
        "#;

        let selectors = test_selectors();
        let parser = JobParser::new(
            Source::Linkedin,
            &selectors,
            true,
            "https://example.com".to_string(),
        );
        let jobs = parser.parse(html).expect("parse should succeed");

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Has Link");
    }

    #[test]
    fn test_parse_empty_page() {
        let selectors = test_selectors();
        let parser = JobParser::new(
            Source::Indeed,
            &selectors,
            false,
            "https://example.com".to_string(),
        );

        let jobs = parser
            .parse("<html><body><p>No jobs found</p></body></html>")
            .expect("parse should succeed");
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_invalid_item_selector_is_an_error() {
        let mut selectors = test_selectors();
        selectors.item = ":::".to_string();

        let parser = JobParser::new(
            Source::Indeed,
            &selectors,
            false,
            "https://example.com".to_string(),
        );

        assert!(parser.parse("<html></html>").is_err());
    }
}
