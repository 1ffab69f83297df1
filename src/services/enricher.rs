// src/services/enricher.rs

//! Secondary per-competition lookups.

use serde_json::Value;

use crate::models::{CompetitionId, CompetitionRecord, Enrichment, detail_url};
use crate::services::Fetcher;
use crate::utils::http::Query;

/// Which detail document the lookup returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    /// Listing divisions page carrying `visualSettings.logoImage`
    Divisions,
    /// Leaderboard presentation carrying location and division names
    Presentation,
}

impl DetailKind {
    /// Pull the supplementary fields out of a detail document.
    pub fn extract(self, detail: &Value) -> Enrichment {
        match self {
            DetailKind::Divisions => Enrichment {
                picture: string_at(detail, "/visualSettings/logoImage"),
                ..Enrichment::default()
            },
            DetailKind::Presentation => Enrichment {
                location: string_at(detail, "/presentation/location"),
                formats: division_names(detail),
                ..Enrichment::default()
            },
        }
    }
}

fn string_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn division_names(detail: &Value) -> Option<Vec<String>> {
    let divisions = detail.pointer("/leaderboard/divisions")?.as_array()?;
    Some(
        divisions
            .iter()
            .filter_map(|division| division.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect(),
    )
}

/// One detail request per record, no batching.
pub struct Enricher<'a> {
    fetcher: &'a Fetcher,
    url_template: &'a str,
    kind: DetailKind,
}

impl<'a> Enricher<'a> {
    pub fn new(fetcher: &'a Fetcher, url_template: &'a str, kind: DetailKind) -> Self {
        Self {
            fetcher,
            url_template,
            kind,
        }
    }

    /// Look up supplementary fields; empty when the lookup fails.
    pub async fn enrich(&self, id: &CompetitionId) -> Enrichment {
        let url = detail_url(self.url_template, &id.to_string());
        match self.fetcher.fetch(&url, &Query::new()).await {
            Some(detail) => self.kind.extract(&detail),
            None => Enrichment::default(),
        }
    }

    /// Enrich every record in place, in order. Returns how many gained fields.
    pub async fn enrich_all(&self, records: &mut [CompetitionRecord]) -> usize {
        let mut enriched = 0;
        for record in records.iter_mut() {
            let extra = self.enrich(&record.id).await;
            if !extra.is_empty() {
                enriched += 1;
            }
            record.apply(extra);
        }
        enriched
    }
}
