// src/services/paginator.rs

//! Page-cursor loop over the filtered-events listing.

use std::future::Future;

use serde_json::Value;

use crate::models::{ListingEvent, ListingFilters};
use crate::services::Fetcher;

/// What a single page request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Page(Vec<ListingEvent>),
    EndOfPages,
    FetchFailed,
}

impl PageOutcome {
    /// Classify a fetch result. Bodies that are not a list of events count
    /// as failures.
    pub fn from_response(response: Option<Value>) -> Self {
        let Some(body) = response else {
            return Self::FetchFailed;
        };
        match serde_json::from_value::<Vec<ListingEvent>>(body) {
            Ok(events) if events.is_empty() => Self::EndOfPages,
            Ok(events) => Self::Page(events),
            Err(error) => {
                log::warn!("Unexpected listing page shape: {}", error);
                Self::FetchFailed
            }
        }
    }
}

/// Why pagination stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfPages,
    FetchFailed,
    Interrupted,
}

/// Records gathered by one pagination run.
#[derive(Debug, Clone)]
pub struct PaginationReport<T> {
    pub records: Vec<T>,
    /// Pages that contributed records
    pub pages_fetched: u32,
    pub stop: StopReason,
}

/// Walks listing pages from 1 until an empty or failing page.
pub struct Paginator<'a> {
    fetcher: &'a Fetcher,
    endpoint: &'a str,
    filters: &'a ListingFilters,
}

impl<'a> Paginator<'a> {
    pub fn new(fetcher: &'a Fetcher, endpoint: &'a str, filters: &'a ListingFilters) -> Self {
        Self {
            fetcher,
            endpoint,
            filters,
        }
    }

    /// Fetch every page, mapping each event through `normalize`.
    ///
    /// There is no page limit. When `interrupt` resolves the loop stops and
    /// the records gathered so far are returned.
    pub async fn collect<T, F, I>(&self, normalize: F, interrupt: I) -> PaginationReport<T>
    where
        F: Fn(ListingEvent) -> T,
        I: Future<Output = ()>,
    {
        tokio::pin!(interrupt);

        let mut records = Vec::new();
        let mut page = 1;

        let stop = loop {
            let query = self.filters.query(page);
            let outcome = tokio::select! {
                biased;
                _ = &mut interrupt => {
                    log::warn!("Interrupt received. Keeping {} records.", records.len());
                    break StopReason::Interrupted;
                }
                response = self.fetcher.fetch(self.endpoint, &query) => {
                    PageOutcome::from_response(response)
                }
            };

            match outcome {
                PageOutcome::Page(events) => {
                    log::debug!("Page {}: {} events", page, events.len());
                    records.extend(events.into_iter().map(&normalize));
                    page += 1;
                }
                PageOutcome::EndOfPages => {
                    log::info!("Page {} is empty. Listing exhausted.", page);
                    break StopReason::EndOfPages;
                }
                PageOutcome::FetchFailed => {
                    log::warn!("Page {} failed. Stopping pagination.", page);
                    break StopReason::FetchFailed;
                }
            }
        };

        PaginationReport {
            records,
            pages_fetched: page - 1,
            stop,
        }
    }
}
