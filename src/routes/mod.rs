pub mod events;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Event CRUD
        .route(
            "/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/events/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        // Health check
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
