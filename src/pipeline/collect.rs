// src/pipeline/collect.rs

//! Listing collection: paginate, normalize, attach logos, write.

use std::future::Future;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::{AggregationState, Config, ListingFilters, RunContext};
use crate::services::{DetailKind, Enricher, Fetcher, Paginator, StopReason, normalize};
use crate::storage::AggregationStore;

/// Outcome of a collection run.
#[derive(Debug, Clone)]
pub struct CollectSummary {
    pub records: usize,
    pub pictures: usize,
    pub pages_fetched: u32,
    pub stop: StopReason,
    /// Where the document was written; `None` when nothing was collected
    pub written_to: Option<PathBuf>,
}

/// Collect every listed competition and overwrite the output file.
pub async fn run_collect<I>(
    config: &Config,
    run: &RunContext,
    fetcher: &Fetcher,
    interrupt: I,
) -> Result<CollectSummary>
where
    I: Future<Output = ()>,
{
    let filters = ListingFilters::new(&config.listing, run);
    log::info!(
        "Collecting listings from {} (countries {:?})",
        config.listing.endpoint,
        filters.country_ids
    );

    let report = Paginator::new(fetcher, &config.listing.endpoint, &filters)
        .collect(normalize::from_listing, interrupt)
        .await;
    let mut records = report.records;

    let mut summary = CollectSummary {
        records: records.len(),
        pictures: 0,
        pages_fetched: report.pages_fetched,
        stop: report.stop,
        written_to: None,
    };

    if records.is_empty() {
        log::warn!("No competitions found.");
        return Ok(summary);
    }

    log::info!("Fetching pictures for {} competitions", records.len());
    let enricher = Enricher::new(fetcher, &config.listing.detail_url, DetailKind::Divisions);
    summary.pictures = enricher.enrich_all(&mut records).await;

    let store = AggregationStore::new(config.output.competitions_path());
    store.save(&AggregationState::new(records)).await?;
    log::info!("Data saved to: {}", store.path().display());

    summary.written_to = Some(store.path().to_path_buf());
    Ok(summary)
}
