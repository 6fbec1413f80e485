use chrono::{Datelike, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// Identifier assigned by the database on insert.
pub type EventId = i64;

/// A calendar event, either a single occurrence or a weekly recurrence.
///
/// For recurring events only the time-of-day of `start_datetime` matters;
/// the days it occurs on come from `recurrence_days` (Monday = 0 .. Sunday = 6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<EventId>,
    pub name: String,
    pub start_datetime: NaiveDateTime,
    /// Duration in minutes.
    pub duration: i64,
    pub is_recurring: bool,
    pub recurrence_days: Option<Vec<i64>>,
}

impl Event {
    /// `start_datetime + duration`, or `None` if the result is not representable.
    pub fn end_datetime(&self) -> Option<NaiveDateTime> {
        TimeDelta::try_minutes(self.duration)
            .and_then(|d| self.start_datetime.checked_add_signed(d))
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_datetime.time()
    }

    /// Day of week of `start_datetime`, Monday = 0 .. Sunday = 6.
    pub fn weekday_index(&self) -> i64 {
        i64::from(self.start_datetime.weekday().num_days_from_monday())
    }

    /// Recurrence days, empty when absent.
    pub fn days(&self) -> &[i64] {
        self.recurrence_days.as_deref().unwrap_or(&[])
    }
}

/// Row shape of the `events` table.
#[derive(Debug, sqlx::FromRow)]
pub struct EventRow {
    pub id: i64,
    pub name: String,
    pub start_datetime: NaiveDateTime,
    pub duration: i64,
    pub is_recurring: bool,
    pub recurrence_days: Option<Json<Vec<i64>>>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            start_datetime: row.start_datetime,
            duration: row.duration,
            is_recurring: row.is_recurring,
            recurrence_days: row.recurrence_days.map(|days| days.0),
        }
    }
}

/// Request to create a new event.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub start_datetime: String,
    pub duration: i64,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence_days: Option<Vec<i64>>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub start_datetime: Option<String>,
    pub duration: Option<i64>,
    pub is_recurring: Option<bool>,
    pub recurrence_days: Option<Vec<i64>>,
}

/// Response for successful deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicting_event_id: Option<EventId>,
}
