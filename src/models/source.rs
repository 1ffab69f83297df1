//! Raw response shapes of the two competition sources.

use serde::{Deserialize, Serialize};

use super::CompetitionId;

/// One item of a filtered-events listing page.
///
/// Serialized back with the same keys by the raw listing workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListingEvent {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location_title: Option<String>,
    pub start_date_time: String,
}

/// Body of the leaderboard "all competitions" endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub competitions: Option<Vec<LeaderboardEntry>>,
}

/// One competition as listed by the leaderboard source.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub event_number: CompetitionId,
    pub name: String,
    pub date: EventDates,
    #[serde(default)]
    pub icon_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EventDates {
    pub start: EventDay,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EventDay {
    pub day: String,
}
