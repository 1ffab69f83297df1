// src/services/normalize.rs

//! Mapping of raw source records into `CompetitionRecord`.

use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::{CompetitionId, CompetitionRecord, LeaderboardEntry, ListingEvent};

/// Leaderboard date formats, tried in order.
const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

/// Map a listing event verbatim. Listing events are never filtered.
pub fn from_listing(event: ListingEvent) -> CompetitionRecord {
    let mut record = CompetitionRecord::new(
        CompetitionId::Number(event.id),
        event.name,
        event.start_date_time,
    );
    record.location = event.location_title;
    record
}

/// Map a leaderboard entry; the date string is kept as sent.
///
/// The picture key is always written, `null` when the entry has no icon.
pub fn from_leaderboard(entry: LeaderboardEntry) -> CompetitionRecord {
    let mut record = CompetitionRecord::new(entry.event_number, entry.name, entry.date.start.day);
    record.picture = Some(entry.icon_link);
    record
}

/// Parse a leaderboard day as `DD/MM/YYYY`, falling back to `YYYY-MM-DD`.
pub fn parse_event_date(day: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(day.trim(), format).ok())
}

/// Keep leaderboard entries dated strictly after `today`, normalized.
///
/// An entry whose date matches neither format fails the whole batch.
pub fn upcoming_from_leaderboard(
    entries: Vec<LeaderboardEntry>,
    today: NaiveDate,
) -> Result<Vec<CompetitionRecord>> {
    let mut upcoming = Vec::new();
    for entry in entries {
        let day = &entry.date.start.day;
        let date = parse_event_date(day)
            .ok_or_else(|| AppError::date_parse(&entry.event_number, day.clone()))?;

        if date > today {
            upcoming.push(from_leaderboard(entry));
        } else {
            log::debug!("Skipping past event {} ({})", entry.event_number, day);
        }
    }
    Ok(upcoming)
}
