//! Configuration management for JobScout.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// This is loaded from `~/.config/jobscout/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Scraping behavior settings
    pub scrape: ScrapeConfig,
    /// Enrichment stage settings
    pub enrichment: EnrichmentConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `JOBSCOUT_PORT`: Override the HTTP listen port
    /// - `JOBSCOUT_HEADLESS`: Override browser headless mode (true/false)
    /// - `JOBSCOUT_ENRICHMENT_LIMIT`: Override how many jobs get enriched
    ///
    /// # Errors
    /// Same conditions as [`AppConfig::load`].
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        // Override from environment
        if let Ok(val) = std::env::var("JOBSCOUT_PORT") {
            if let Ok(port) = val.parse() {
                config.server.port = port;
                tracing::debug!("Override server.port from env: {}", port);
            }
        }

        if let Ok(val) = std::env::var("JOBSCOUT_HEADLESS") {
            if let Ok(headless) = val.parse() {
                config.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Ok(val) = std::env::var("JOBSCOUT_ENRICHMENT_LIMIT") {
            if let Ok(limit) = val.parse() {
                config.enrichment.max_enriched_jobs = limit;
                tracing::debug!("Override enrichment.max_enriched_jobs from env: {}", limit);
            }
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns error if the config directory cannot be determined or the
    /// file cannot be written.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/jobscout/config.toml`
    ///
    /// # Errors
    /// Returns error if the platform config directory cannot be determined.
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "jobscout", "jobscout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the listener to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// User agent string presented to scraped sites
    pub user_agent: String,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36"
                .to_string(),
            window_width: 1920,
            window_height: 1080,
            navigation_timeout_secs: 30,
        }
    }
}

/// Scraping behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Search location used when the request does not name one
    pub default_location: String,
    /// How long to wait for a source's results container in seconds
    pub results_timeout_secs: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            default_location: "India".to_string(),
            results_timeout_secs: 10,
        }
    }
}

/// Enrichment stage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// How many jobs from the front of the merged list get enriched
    pub max_enriched_jobs: usize,
    /// Timeout for each career-page search and page visit in seconds
    pub search_timeout_secs: u64,
    /// Search engine URL template; `{query}` is replaced with the
    /// URL-encoded query
    pub search_url_template: String,
    /// Selector matching the first organic result link on the search page
    pub organic_result_selector: String,
    /// Minimum delay between consecutive searches in milliseconds
    pub min_search_interval_ms: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_enriched_jobs: 5,
            search_timeout_secs: 15,
            search_url_template: "https://www.bing.com/search?q={query}".to_string(),
            organic_result_selector: "li.b_algo h2 a".to_string(),
            min_search_interval_ms: 1000,
        }
    }
}
