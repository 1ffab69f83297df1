// src/pipeline/append.rs

//! Leaderboard append: add upcoming leaderboard competitions to an existing
//! competitions document.

use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::models::{Config, LeaderboardResponse, RunContext};
use crate::services::{DetailKind, Enricher, Fetcher, normalize};
use crate::storage::AggregationStore;
use crate::utils::http::Query;

/// Outcome of an append run.
#[derive(Debug, Clone)]
pub struct AppendSummary {
    pub existing: usize,
    pub listed: usize,
    pub appended: usize,
    pub skipped_past: usize,
    pub total: usize,
    pub path: PathBuf,
}

/// Load the document, append upcoming leaderboard competitions, rewrite it.
///
/// The document must already exist. Nothing is written if any step fails.
pub async fn run_append(
    config: &Config,
    run: &RunContext,
    fetcher: &Fetcher,
) -> Result<AppendSummary> {
    let store = AggregationStore::new(config.output.competitions_path());
    let mut state = store.load().await?;
    let existing = state.len();
    log::info!(
        "Loaded {} competitions from {}",
        existing,
        store.path().display()
    );

    let body = fetcher
        .fetch(&config.leaderboard.endpoint, &Query::new())
        .await
        .ok_or_else(|| AppError::no_data(&config.leaderboard.endpoint))?;
    let entries = serde_json::from_value::<LeaderboardResponse>(body)?
        .competitions
        .ok_or_else(|| AppError::missing_field("competitions"))?;
    let listed = entries.len();

    let mut upcoming = normalize::upcoming_from_leaderboard(entries, run.today())?;
    log::info!(
        "{} of {} leaderboard competitions are after {}",
        upcoming.len(),
        listed,
        run.today()
    );

    let enricher = Enricher::new(
        fetcher,
        &config.leaderboard.detail_url,
        DetailKind::Presentation,
    );
    enricher.enrich_all(&mut upcoming).await;

    let appended = upcoming.len();
    state.append(upcoming);
    store.save(&state).await?;
    log::info!("Data appended to: {}", store.path().display());

    Ok(AppendSummary {
        existing,
        listed,
        appended,
        skipped_past: listed - appended,
        total: state.len(),
        path: store.path().to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Local, TimeZone};
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;
    use crate::models::{AggregationState, CompetitionId, CompetitionRecord};
    use crate::utils::testing::StubSource;

    const BOARD: &str = "https://api.test/leaderboard/competition/all";

    fn config(output: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.leaderboard.endpoint = BOARD.to_string();
        config.leaderboard.detail_url = "https://api.test/presentation/{id}".to_string();
        config.output.competitions_file = output.to_string_lossy().into_owned();
        config
    }

    fn run() -> RunContext {
        RunContext::at(Local.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap())
    }

    fn existing(n: i64) -> AggregationState {
        AggregationState::new(
            (1..=n)
                .map(|id| {
                    let mut record = CompetitionRecord::new(
                        CompetitionId::Number(id),
                        format!("Listed {id}"),
                        "2031-01-01T09:00:00".to_string(),
                    );
                    record.location = Some("Zagreb".to_string());
                    record
                })
                .collect(),
        )
    }

    fn leaderboard() -> serde_json::Value {
        json!({
            "competitions": [
                {
                    "eventNumber": "RS-2030",
                    "name": "Christmas Snatch",
                    "date": {"start": {"day": "25/12/2030"}},
                    "iconLink": "https://cdn.test/rs.png"
                },
                {
                    "eventNumber": "RS-2020",
                    "name": "New Year Snatch",
                    "date": {"start": {"day": "01/01/2020"}}
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_appends_only_future_records() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("competitions.json");
        let store = AggregationStore::new(&output);
        store.save(&existing(3)).await.unwrap();

        let stub = Arc::new(
            StubSource::new().json(BOARD, leaderboard()).json(
                "https://api.test/presentation/RS-2030",
                json!({
                    "presentation": {"location": "Oslo"},
                    "leaderboard": {"divisions": [{"name": "Men RX"}, {"name": "Women RX"}]}
                }),
            ),
        );
        let fetcher = Fetcher::new(stub.clone());

        let summary = run_append(&config(&output), &run(), &fetcher).await.unwrap();
        assert_eq!(summary.existing, 3);
        assert_eq!(summary.appended, 1);
        assert_eq!(summary.skipped_past, 1);
        assert_eq!(summary.total, 4);

        let saved = store.load().await.unwrap();
        assert_eq!(saved.len(), 4);
        assert_eq!(&saved.records()[..3], existing(3).records());

        let added = &saved.records()[3];
        assert_eq!(added.id, CompetitionId::from("RS-2030"));
        assert_eq!(added.date, "25/12/2030");
        assert_eq!(added.picture_url(), Some("https://cdn.test/rs.png"));
        assert_eq!(added.location.as_deref(), Some("Oslo"));
        assert_eq!(
            added.formats,
            Some(vec!["Men RX".to_string(), "Women RX".to_string()])
        );

        // the past event never gets a detail lookup
        let urls: Vec<String> = stub.calls().into_iter().map(|(url, _)| url).collect();
        assert!(!urls.iter().any(|u| u.ends_with("RS-2020")));
    }

    #[tokio::test]
    async fn test_missing_file_stops_before_fetching() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("competitions.json");
        let stub = Arc::new(StubSource::new().json(BOARD, leaderboard()));
        let fetcher = Fetcher::new(stub.clone());

        let result = run_append(&config(&output), &run(), &fetcher).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(stub.call_count(), 0);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_missing_competitions_field_leaves_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("competitions.json");
        let store = AggregationStore::new(&output);
        store.save(&existing(2)).await.unwrap();
        let before = std::fs::read_to_string(&output).unwrap();

        let fetcher = Fetcher::new(Arc::new(
            StubSource::new().json(BOARD, json!({"status": "maintenance"})),
        ));

        let result = run_append(&config(&output), &run(), &fetcher).await;
        assert!(matches!(result, Err(AppError::MissingField(ref f)) if f == "competitions"));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), before);
    }

    #[tokio::test]
    async fn test_bad_date_aborts_without_writing() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("competitions.json");
        let store = AggregationStore::new(&output);
        store.save(&existing(1)).await.unwrap();

        let board = json!({
            "competitions": [{
                "eventNumber": "RS-X",
                "name": "Mystery Meet",
                "date": {"start": {"day": "next spring"}}
            }]
        });
        let fetcher = Fetcher::new(Arc::new(StubSource::new().json(BOARD, board)));

        let result = run_append(&config(&output), &run(), &fetcher).await;
        assert!(matches!(result, Err(AppError::DateParse { .. })));
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_existing_records_written_back_unchanged() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("competitions.json");
        let before = json!([
            {"id": 1, "name": "A", "location": "X", "date": "2031-01-01", "competitionPicture": null},
            {"id": 2, "name": "B", "date": "2031-02-01", "competitionPicture": "p.png",
             "timezone": "Europe/Rome", "format": ["RX"]}
        ]);
        std::fs::write(&output, before.to_string()).unwrap();

        let fetcher = Fetcher::new(Arc::new(
            StubSource::new().json(BOARD, json!({"competitions": []})),
        ));
        let summary = run_append(&config(&output), &run(), &fetcher).await.unwrap();
        assert_eq!(summary.total, 2);

        let after: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_appends_to_raw_listing_document() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("competitions.json");
        std::fs::write(
            &output,
            r#"[{"id":5,"name":"Duo Cup","locationTitle":"Riga","startDateTime":"2031-02-02T10:00:00"}]"#,
        )
        .unwrap();

        let fetcher = Fetcher::new(Arc::new(StubSource::new().json(BOARD, leaderboard())));
        let summary = run_append(&config(&output), &run(), &fetcher).await.unwrap();
        assert_eq!(summary.existing, 1);
        assert_eq!(summary.total, 2);

        let saved = AggregationStore::new(&output).load().await.unwrap();
        let first = &saved.records()[0];
        assert_eq!(first.id, CompetitionId::Number(5));
        assert_eq!(first.location.as_deref(), Some("Riga"));
        assert_eq!(first.date, "2031-02-02T10:00:00");
    }
}
