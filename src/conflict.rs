//! Scheduling conflict detection.
//!
//! A candidate event is compared against every existing event. The pairing
//! of recurring and single events decides how the comparison is done:
//!
//! - both recurring: they must share a recurrence day, then their
//!   time-of-day spans are compared
//! - both single: absolute start/end timestamps are compared
//! - one of each: the single event's weekday must be one of the recurring
//!   event's days, then their time-of-day spans are compared
//!
//! All comparisons are boundary-inclusive: an event ending at 11:00 conflicts
//! with one starting at 11:00.
//!
//! Time-of-day spans are taken from `start` and `start + duration` with the
//! date dropped. A span that runs past midnight therefore has an end earlier
//! than its start and is compared as such.

use chrono::{NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::models::{Event, EventId};

/// The inputs violate a precondition of the check.
#[derive(Error, Debug, PartialEq)]
pub enum ConflictError {
    #[error("Invalid duration {duration}: must be a positive number of minutes")]
    NonPositiveDuration { duration: i64 },

    #[error("Event end is out of range for a duration of {duration} minutes")]
    EndOutOfRange { duration: i64 },
}

/// Boundary-inclusive overlap of two time-of-day ranges.
pub fn times_overlap(
    start_a: NaiveTime,
    end_a: NaiveTime,
    start_b: NaiveTime,
    end_b: NaiveTime,
) -> bool {
    start_a <= end_b && end_a >= start_b
}

/// Returns `Ok(true)` if `candidate` can be placed without overlapping any
/// event in `existing`. The event whose id equals `exclude_id` is skipped.
pub fn check_conflict(
    candidate: &Event,
    existing: &[Event],
    exclude_id: Option<EventId>,
) -> Result<bool, ConflictError> {
    find_conflict(candidate, existing, exclude_id).map(|hit| hit.is_none())
}

/// Returns the first event in `existing` that conflicts with `candidate`.
pub fn find_conflict<'a>(
    candidate: &Event,
    existing: &'a [Event],
    exclude_id: Option<EventId>,
) -> Result<Option<&'a Event>, ConflictError> {
    let candidate_span = Span::of(candidate)?;

    for event in existing {
        if exclude_id.is_some() && event.id == exclude_id {
            continue;
        }

        let event_span = Span::of(event)?;
        let conflict = match (candidate.is_recurring, event.is_recurring) {
            (true, true) => {
                shares_day(candidate.days(), event.days())
                    && candidate_span.time_overlaps(&event_span)
            }
            (false, false) => candidate_span.overlaps(&event_span),
            (true, false) => {
                candidate.days().contains(&event.weekday_index())
                    && candidate_span.time_overlaps(&event_span)
            }
            (false, true) => {
                event.days().contains(&candidate.weekday_index())
                    && candidate_span.time_overlaps(&event_span)
            }
        };

        if conflict {
            return Ok(Some(event));
        }
    }

    Ok(None)
}

fn shares_day(a: &[i64], b: &[i64]) -> bool {
    a.iter().any(|day| b.contains(day))
}

/// Absolute start and end of one event.
struct Span {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Span {
    fn of(event: &Event) -> Result<Self, ConflictError> {
        if event.duration <= 0 {
            return Err(ConflictError::NonPositiveDuration {
                duration: event.duration,
            });
        }
        let end = event.end_datetime().ok_or(ConflictError::EndOutOfRange {
            duration: event.duration,
        })?;
        Ok(Self {
            start: event.start_datetime,
            end,
        })
    }

    fn overlaps(&self, other: &Span) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    fn time_overlaps(&self, other: &Span) -> bool {
        times_overlap(
            self.start.time(),
            self.end.time(),
            other.start.time(),
            other.end.time(),
        )
    }
}
