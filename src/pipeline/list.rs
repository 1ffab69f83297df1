// src/pipeline/list.rs

//! Raw listing dump without enrichment.

use std::future::Future;

use crate::error::Result;
use crate::models::{Config, ListingFilters, RunContext};
use crate::services::{Fetcher, Paginator, StopReason};
use crate::storage::AggregationStore;

/// Outcome of a raw listing run.
#[derive(Debug, Clone)]
pub struct ListSummary {
    pub events: usize,
    pub pages_fetched: u32,
    pub stop: StopReason,
}

/// Paginate the listing and write the raw events as compact JSON.
///
/// The file is written even when no event was found.
pub async fn run_list<I>(
    config: &Config,
    run: &RunContext,
    fetcher: &Fetcher,
    interrupt: I,
) -> Result<ListSummary>
where
    I: Future<Output = ()>,
{
    let filters = ListingFilters::new(&config.listing, run);
    let report = Paginator::new(fetcher, &config.listing.endpoint, &filters)
        .collect(|event| event, interrupt)
        .await;

    let store = AggregationStore::new(config.output.competitions_path());
    store.save_compact(&report.records).await?;
    log::info!("Data saved to: {}", store.path().display());

    Ok(ListSummary {
        events: report.records.len(),
        pages_fetched: report.pages_fetched,
        stop: report.stop,
    })
}
