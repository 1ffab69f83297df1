//! Per-run parameters fixed at start-up.

use chrono::{DateTime, Local, NaiveDate};

use super::ListingSourceConfig;
use crate::utils::http::Query;

/// Clock reading taken once when a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    now: DateTime<Local>,
}

impl RunContext {
    /// Context for a run starting now.
    pub fn start() -> Self {
        Self::at(Local::now())
    }

    /// Context pinned to a given instant.
    pub fn at(now: DateTime<Local>) -> Self {
        Self { now }
    }

    /// Run start in epoch milliseconds.
    pub fn timestamp_ms(&self) -> i64 {
        self.now.timestamp_millis()
    }

    /// Calendar date of the run start in local time.
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

/// Listing filter set sent unchanged with every page request of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFilters {
    pub timing: String,
    pub timestamp_ms: i64,
    pub format: String,
    pub event_type: String,
    pub country_ids: Vec<u32>,
    pub per_page: u32,
}

impl ListingFilters {
    pub fn new(config: &ListingSourceConfig, run: &RunContext) -> Self {
        Self {
            timing: config.timing.clone(),
            timestamp_ms: run.timestamp_ms(),
            format: config.format.clone(),
            event_type: config.event_type.clone(),
            country_ids: config.country_ids.clone(),
            per_page: config.per_page,
        }
    }

    /// Query parameters for a 1-based page.
    pub fn query(&self, page: u32) -> Query {
        Query::new()
            .param("timing", &self.timing)
            .param("timestamp", self.timestamp_ms)
            .param("format", &self.format)
            .param("type", &self.event_type)
            .param_list("countryIds", &self.country_ids)
            .param("page", page)
            .param("perPage", self.per_page)
    }
}
