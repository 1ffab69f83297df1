//! Unified competition record and the persisted collection.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Source-specific competition identifier.
///
/// Numeric for page-based listings, an event-number string for the
/// leaderboard source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompetitionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CompetitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompetitionId::Number(n) => write!(f, "{n}"),
            CompetitionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CompetitionId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CompetitionId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A competition in the unified schema.
///
/// Raw listing keys (`locationTitle`, `startDateTime`) are accepted on load so
/// a document written by the raw listing run can be appended to. Keys the
/// record does not model are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompetitionRecord {
    pub id: CompetitionId,

    pub name: String,

    /// Free-text venue or city
    #[serde(
        alias = "locationTitle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,

    /// Start date as sent by the source, never reformatted
    #[serde(alias = "startDateTime")]
    pub date: String,

    /// Logo or icon URL. `Some(None)` is an explicit `null` in the document.
    #[serde(
        rename = "competitionPicture",
        alias = "picture",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub picture: Option<Option<String>>,

    /// Division names in source order
    #[serde(
        rename = "format",
        alias = "formats",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub formats: Option<Vec<String>>,

    /// Unmodelled keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Distinguish a `null` value from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl CompetitionRecord {
    pub fn new(id: CompetitionId, name: String, date: String) -> Self {
        Self {
            id,
            name,
            location: None,
            date,
            picture: None,
            formats: None,
            extra: Map::new(),
        }
    }

    /// Picture URL, if one is set.
    pub fn picture_url(&self) -> Option<&str> {
        self.picture.as_ref().and_then(|p| p.as_deref())
    }

    /// Merge supplementary fields; fields missing from `found` are left alone.
    pub fn apply(&mut self, found: Enrichment) {
        if let Some(picture) = found.picture {
            self.picture = Some(Some(picture));
        }
        if let Some(location) = found.location {
            self.location = Some(location);
        }
        if let Some(formats) = found.formats {
            self.formats = Some(formats);
        }
    }
}

/// Fields found by a secondary per-competition lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub picture: Option<String>,
    pub location: Option<String>,
    pub formats: Option<Vec<String>>,
}

impl Enrichment {
    pub fn is_empty(&self) -> bool {
        self.picture.is_none() && self.location.is_none() && self.formats.is_none()
    }
}

/// The full persisted collection, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregationState {
    records: Vec<CompetitionRecord>,
}

impl AggregationState {
    pub fn new(records: Vec<CompetitionRecord>) -> Self {
        Self { records }
    }

    /// Append records after the existing ones.
    pub fn append(&mut self, records: impl IntoIterator<Item = CompetitionRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[CompetitionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
