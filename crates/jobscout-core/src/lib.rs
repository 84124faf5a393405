//! JobScout Core - Foundation crate for the JobScout aggregation service.
//!
//! This crate provides the shared types, error handling, and configuration
//! management that all other JobScout crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared domain types (`Source`, `JobRecord`, `ScrapePlan`, `ProgressEvent`)
//!
//! # Example
//!
//! ```rust
//! use jobscout_core::{AppConfig, ScrapeRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//!
//! let request = ScrapeRequest {
//!     keywords: Some("backend engineer".to_string()),
//!     sources: vec!["linkedin".to_string()],
//!     ..Default::default()
//! };
//! let plan = request.validate(&config.scrape.default_location)?;
//! assert_eq!(plan.max_results, 20);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, BrowserConfig, EnrichmentConfig, ScrapeConfig, ServerConfig,
};
pub use error::{ConfigError, ConfigResult, JobScoutError, Result};
pub use types::{JobRecord, JobStatus, ProgressEvent, ScrapePlan, ScrapeRequest, Source};
