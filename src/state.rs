use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// Held across conflict check and write so two requests cannot both
    /// pass the check against the same snapshot.
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}
