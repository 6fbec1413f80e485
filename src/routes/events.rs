use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::conflict;
use crate::db;
use crate::error::ApiError;
use crate::models::{CreateEventRequest, Event, EventId, MessageResponse, UpdateEventRequest};
use crate::state::AppState;
use crate::validation::Validator;

/// POST /events - Create a new event if it fits the schedule.
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let Json(req) = payload?;

    let event = Event {
        id: None,
        name: req.name,
        start_datetime: Validator::parse_start_datetime(&req.start_datetime)?,
        duration: req.duration,
        is_recurring: req.is_recurring,
        recurrence_days: req.recurrence_days,
    };
    Validator::validate_event(&event)?;

    let _guard = state.write_lock.lock().await;

    let existing = db::list_events(&state.pool, None).await?;
    ensure_no_conflict(&event, &existing, None)?;

    let created = db::insert_event(&state.pool, &event).await?;
    tracing::info!("Created event {:?} ({})", created.id, created.name);

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /events - List all events.
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    let events = db::list_events(&state.pool, None).await?;
    Ok(Json(events))
}

/// GET /events/{id} - Get a single event.
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> Result<Json<Event>, ApiError> {
    db::get_event(&state.pool, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// PUT /events/{id} - Partially update an event, re-checking the schedule
/// against every other event.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
    payload: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> Result<Json<Event>, ApiError> {
    let _guard = state.write_lock.lock().await;

    let mut event = db::get_event(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound(id))?;
    let Json(req) = payload?;

    if let Some(name) = req.name {
        event.name = name;
    }
    if let Some(start) = req.start_datetime {
        event.start_datetime = Validator::parse_start_datetime(&start)?;
    }
    if let Some(duration) = req.duration {
        event.duration = duration;
    }
    if let Some(is_recurring) = req.is_recurring {
        event.is_recurring = is_recurring;
    }
    if let Some(days) = req.recurrence_days {
        event.recurrence_days = Some(days);
    }
    Validator::validate_event(&event)?;

    let others = db::list_events(&state.pool, Some(id)).await?;
    ensure_no_conflict(&event, &others, Some(id))?;

    if !db::update_event(&state.pool, id, &event).await? {
        return Err(ApiError::NotFound(id));
    }
    tracing::info!("Updated event {}", id);

    Ok(Json(event))
}

/// DELETE /events/{id} - Delete an event.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !db::delete_event(&state.pool, id).await? {
        return Err(ApiError::NotFound(id));
    }
    tracing::info!("Deleted event {}", id);

    Ok(Json(MessageResponse {
        message: format!("Event {} successfully deleted", id),
    }))
}

fn ensure_no_conflict(
    event: &Event,
    existing: &[Event],
    exclude_id: Option<EventId>,
) -> Result<(), ApiError> {
    match conflict::find_conflict(event, existing, exclude_id)? {
        Some(hit) => {
            tracing::warn!(
                "Rejected event {:?} ({}): conflicts with event {:?}",
                event.id,
                event.name,
                hit.id
            );
            Err(ApiError::Conflict { with: hit.id })
        }
        None => Ok(()),
    }
}
