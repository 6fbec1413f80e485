use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::conflict::ConflictError;
use crate::models::{ErrorResponse, EventId};
use crate::validation::ValidationError;

/// Errors surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    InvalidBody(String),

    #[error("Event conflicts with existing events")]
    Conflict { with: Option<EventId> },

    #[error("Event {0} not found")]
    NotFound(EventId),

    #[error(transparent)]
    Precondition(#[from] ConflictError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidBody(_) | ApiError::Conflict { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Precondition(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                ErrorResponse {
                    error: "Database error".to_string(),
                    conflicting_event_id: None,
                }
            }
            ApiError::Conflict { with } => ErrorResponse {
                error: self.to_string(),
                conflicting_event_id: *with,
            },
            _ => ErrorResponse {
                error: self.to_string(),
                conflicting_event_id: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
