//! HTTP-facing error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jobscout_core::JobScoutError;
use serde_json::json;
use std::fmt;

/// Error returned from route handlers, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum AppError {
    /// Request failed validation; rejected before any streaming began
    Validation(String),
    /// The shared browser could not be launched
    BrowserUnavailable(String),
    /// Anything else that should not leak internals to the caller
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Validation messages are the response body verbatim
            AppError::Validation(msg) => write!(f, "{msg}"),
            AppError::BrowserUnavailable(msg) => write!(f, "Failed to launch browser: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal server error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<JobScoutError> for AppError {
    fn from(err: JobScoutError) -> Self {
        match err {
            JobScoutError::Validation(msg) => AppError::Validation(msg),
            JobScoutError::Browser(msg) => AppError::BrowserUnavailable(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<jobscout_browser::BrowserError> for AppError {
    fn from(err: jobscout_browser::BrowserError) -> Self {
        AppError::BrowserUnavailable(err.to_string())
    }
}

impl From<jobscout_scraper::ScrapeError> for AppError {
    fn from(err: jobscout_scraper::ScrapeError) -> Self {
        match err {
            jobscout_scraper::ScrapeError::Browser(inner) => inner.into(),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BrowserUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
