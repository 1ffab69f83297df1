// src/services/fetcher.rs

//! Single-request wrapper that turns every failure into "no data".

use std::sync::Arc;

use serde_json::Value;

use crate::utils::http::{JsonSource, Query};

/// Issues one GET per call against a `JsonSource`.
#[derive(Clone)]
pub struct Fetcher {
    source: Arc<dyn JsonSource>,
}

impl Fetcher {
    pub fn new(source: Arc<dyn JsonSource>) -> Self {
        Self { source }
    }

    /// Fetch a JSON document.
    ///
    /// Returns `None` on network errors, non-success statuses and bodies
    /// that are not JSON. The failure is logged, never returned.
    pub async fn fetch(&self, url: &str, query: &Query) -> Option<Value> {
        match self.source.get_json(url, query).await {
            Ok(value) => Some(value),
            Err(error) => {
                log::warn!("Error making API call to {}: {}", url, error);
                None
            }
        }
    }
}
