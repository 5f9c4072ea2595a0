use crate::utils::time::Timestamp;
use serde::{Deserialize, Deserializer};

/// An upcoming event as served by `/api/calendar/events`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalendarEvent {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub start: Timestamp,
    #[serde(default)]
    pub end: Option<Timestamp>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response envelope; `events` may be missing or null
#[derive(Debug, Deserialize)]
pub(super) struct EventsResponse {
    #[serde(default)]
    pub events: Option<Vec<CalendarEvent>>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}
