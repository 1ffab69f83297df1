// src/models/mod.rs

//! Domain models for the scraper.
//!
//! Raw source shapes live in `source`, the unified record and the persisted
//! collection in `competition`.

mod competition;
mod config;
mod run;
mod source;

// Re-export all public types
pub use competition::{AggregationState, CompetitionId, CompetitionRecord, Enrichment};
pub use config::{
    Config, HttpConfig, LeaderboardSourceConfig, ListingSourceConfig, OutputConfig,
    ID_PLACEHOLDER, detail_url,
};
pub use run::{ListingFilters, RunContext};
pub use source::{EventDates, EventDay, LeaderboardEntry, LeaderboardResponse, ListingEvent};
