pub mod config;
pub mod conflict;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod validation;

pub use config::Config;
pub use conflict::{check_conflict, find_conflict, times_overlap, ConflictError};
pub use db::{init_pool, run_migrations};
pub use error::ApiError;
pub use models::{CreateEventRequest, Event, EventId, UpdateEventRequest};
pub use routes::create_router;
pub use state::AppState;
pub use validation::{ValidationError, Validator};
