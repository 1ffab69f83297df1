//! Service layer for the scraper.
//!
//! This module contains the collection logic:
//! - Request wrapping (`Fetcher`)
//! - Listing pagination (`Paginator`)
//! - Per-record detail lookups (`Enricher`)
//! - Source-to-record mapping (`normalize`)

mod enricher;
mod fetcher;
pub mod normalize;
mod paginator;

pub use enricher::{DetailKind, Enricher};
pub use fetcher::Fetcher;
pub use paginator::{PageOutcome, PaginationReport, Paginator, StopReason};
