//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Page-based listing source
    #[serde(default)]
    pub listing: ListingSourceConfig,

    /// Leaderboard source
    #[serde(default)]
    pub leaderboard: LeaderboardSourceConfig,

    /// Output locations
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == Some(0) {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.listing.per_page == 0 {
            return Err(AppError::validation("listing.per_page must be > 0"));
        }
        if self.listing.country_ids.is_empty() {
            return Err(AppError::validation("listing.country_ids is empty"));
        }

        Url::parse(&self.listing.endpoint)?;
        Url::parse(&self.leaderboard.endpoint)?;
        for (key, template) in [
            ("listing.detail_url", &self.listing.detail_url),
            ("leaderboard.detail_url", &self.leaderboard.detail_url),
        ] {
            if !template.contains(ID_PLACEHOLDER) {
                return Err(AppError::validation(format!(
                    "{key} must contain {ID_PLACEHOLDER}"
                )));
            }
            Url::parse(&detail_url(template, "0"))?;
        }

        if self.output.competitions_file.trim().is_empty() {
            return Err(AppError::validation("output.competitions_file is empty"));
        }
        Ok(())
    }
}

/// Placeholder substituted with a competition id in detail URL templates.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Fill a detail URL template with a competition id.
pub fn detail_url(template: &str, id: &str) -> String {
    template.replace(ID_PLACEHOLDER, id)
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds. Unset means a hung request blocks forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
        }
    }
}

/// Filtered-events listing source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSourceConfig {
    #[serde(default = "defaults::listing_endpoint")]
    pub endpoint: String,

    /// Per-event divisions lookup, with `{id}` placeholder
    #[serde(default = "defaults::listing_detail_url")]
    pub detail_url: String,

    #[serde(default = "defaults::timing")]
    pub timing: String,

    #[serde(default = "defaults::format")]
    pub format: String,

    #[serde(default = "defaults::event_type")]
    pub event_type: String,

    #[serde(default = "defaults::country_ids")]
    pub country_ids: Vec<u32>,

    #[serde(default = "defaults::per_page")]
    pub per_page: u32,
}

impl Default for ListingSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::listing_endpoint(),
            detail_url: defaults::listing_detail_url(),
            timing: defaults::timing(),
            format: defaults::format(),
            event_type: defaults::event_type(),
            country_ids: defaults::country_ids(),
            per_page: defaults::per_page(),
        }
    }
}

/// Leaderboard source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSourceConfig {
    #[serde(default = "defaults::leaderboard_endpoint")]
    pub endpoint: String,

    /// Per-event presentation lookup, with `{id}` placeholder
    #[serde(default = "defaults::leaderboard_detail_url")]
    pub detail_url: String,
}

impl Default for LeaderboardSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::leaderboard_endpoint(),
            detail_url: defaults::leaderboard_detail_url(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Persisted competitions document, relative to the working directory
    #[serde(default = "defaults::competitions_file")]
    pub competitions_file: String,
}

impl OutputConfig {
    pub fn competitions_path(&self) -> PathBuf {
        PathBuf::from(&self.competitions_file)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            competitions_file: defaults::competitions_file(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; competition-scraper/0.1)".into()
    }

    // Listing source defaults
    pub fn listing_endpoint() -> String {
        "https://competitioncorner.net/api2/v1/events/filtered".into()
    }
    pub fn listing_detail_url() -> String {
        "https://competitioncorner.net/api2/v1/registrationinfo/event/{id}/divisions".into()
    }
    pub fn timing() -> String {
        "active".into()
    }
    pub fn format() -> String {
        "team".into()
    }
    pub fn event_type() -> String {
        "functional_fitness".into()
    }
    pub fn country_ids() -> Vec<u32> {
        vec![73, 40, 6, 19]
    }
    pub fn per_page() -> u32 {
        10
    }

    // Leaderboard source defaults
    pub fn leaderboard_endpoint() -> String {
        "https://scoring-rsnatch-prod.herokuapp.com/api/leaderboard/competition/all".into()
    }
    pub fn leaderboard_detail_url() -> String {
        "https://scoring-rsnatch-prod.herokuapp.com/api/event/presentation/{id}".into()
    }

    pub fn competitions_file() -> String {
        "data/getCompetitions/competitions.json".into()
    }
}
