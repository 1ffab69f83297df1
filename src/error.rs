// src/error.rs

//! Unified error handling for the scraper.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Competitions file does not exist
    #[error("Competitions file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Competitions file exists but is not a valid record array
    #[error("Invalid JSON format in {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A request the workflow cannot do without returned nothing
    #[error("No data returned by {0}")]
    NoData(String),

    /// Response lacks a field the workflow cannot do without
    #[error("Missing field '{0}' in response")]
    MissingField(String),

    /// Event date matches neither DD/MM/YYYY nor YYYY-MM-DD
    #[error("Unrecognized date '{date}' for event {event}")]
    DateParse { event: String, date: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a non-success status error.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Create a corrupt-file error.
    pub fn corrupt(path: &Path, source: serde_json::Error) -> Self {
        Self::Corrupt {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a no-data error for an endpoint.
    pub fn no_data(endpoint: impl Into<String>) -> Self {
        Self::NoData(endpoint.into())
    }

    /// Create a missing-field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create a date parsing error.
    pub fn date_parse(event: impl fmt::Display, date: impl Into<String>) -> Self {
        Self::DateParse {
            event: event.to_string(),
            date: date.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = AppError::status("https://example.com/api", 503);
        assert_eq!(err.to_string(), "HTTP status 503 from https://example.com/api");
    }

    #[test]
    fn test_date_parse_message() {
        let err = AppError::date_parse("EV-12", "2030/12/25");
        assert_eq!(
            err.to_string(),
            "Unrecognized date '2030/12/25' for event EV-12"
        );
    }
}
