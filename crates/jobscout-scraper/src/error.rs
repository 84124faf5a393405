use jobscout_core::Source;
use std::fmt;

/// Errors that can occur while scraping.
///
/// `Display`, `std::error::Error` and the `From` conversions are implemented
/// by hand because the `source` fields hold a domain [`Source`], which
/// thiserror's derive would otherwise treat as an error-source and require to
/// implement `Error`.
#[derive(Debug)]
pub enum ScrapeError {
    ResultsTimeout { source: Source, timeout_secs: u64 },

    Extraction { source: Source, reason: String },

    Enrichment(String),

    Browser(jobscout_browser::BrowserError),

    Source(jobscout_sources::SourceError),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResultsTimeout {
                source,
                timeout_secs,
            } => {
                write!(f, "Results did not load for {source} within {timeout_secs}s")
            }
            Self::Extraction { source, reason } => {
                write!(f, "Extraction failed for {source}: {reason}")
            }
            Self::Enrichment(reason) => write!(f, "Enrichment failed: {reason}"),
            Self::Browser(err) => write!(f, "Browser error: {err}"),
            Self::Source(err) => write!(f, "Source error: {err}"),
        }
    }
}

impl std::error::Error for ScrapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Browser(err) => Some(err),
            Self::Source(err) => Some(err),
            _ => None,
        }
    }
}

impl From<jobscout_browser::BrowserError> for ScrapeError {
    fn from(err: jobscout_browser::BrowserError) -> Self {
        Self::Browser(err)
    }
}

impl From<jobscout_sources::SourceError> for ScrapeError {
    fn from(err: jobscout_sources::SourceError) -> Self {
        Self::Source(err)
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
