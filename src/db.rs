use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::models::{Event, EventId, EventRow};

const SELECT_EVENT: &str =
    "SELECT id, name, start_datetime, duration, is_recurring, recurrence_days FROM events";

/// Initialize database connection pool with recommended pragmas.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(5))
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

    SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
}

/// Run database migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(include_str!("../migrations/001_create_events.sql"))
        .execute(pool)
        .await?;
    Ok(())
}

/// Insert a new event and return it with its assigned id.
pub async fn insert_event(pool: &SqlitePool, event: &Event) -> Result<Event, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO events (name, start_datetime, duration, is_recurring, recurrence_days)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&event.name)
    .bind(event.start_datetime)
    .bind(event.duration)
    .bind(event.is_recurring)
    .bind(event.recurrence_days.clone().map(Json))
    .execute(pool)
    .await?;

    Ok(Event {
        id: Some(result.last_insert_rowid()),
        ..event.clone()
    })
}

/// Fetch a single event by id.
pub async fn get_event(pool: &SqlitePool, id: EventId) -> Result<Option<Event>, sqlx::Error> {
    let row = sqlx::query_as::<_, EventRow>(&format!("{SELECT_EVENT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Event::from))
}

/// All events ordered by id, optionally leaving one out.
pub async fn list_events(
    pool: &SqlitePool,
    exclude: Option<EventId>,
) -> Result<Vec<Event>, sqlx::Error> {
    let rows = match exclude {
        Some(id) => {
            let sql = format!("{SELECT_EVENT} WHERE id != ? ORDER BY id ASC");
            sqlx::query_as::<_, EventRow>(&sql)
                .bind(id)
                .fetch_all(pool)
                .await?
        }
        None => {
            sqlx::query_as::<_, EventRow>(&format!("{SELECT_EVENT} ORDER BY id ASC"))
                .fetch_all(pool)
                .await?
        }
    };

    Ok(rows.into_iter().map(Event::from).collect())
}

/// Overwrite every field of a stored event. Returns false if no row has that id.
pub async fn update_event(
    pool: &SqlitePool,
    id: EventId,
    event: &Event,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE events
        SET name = ?, start_datetime = ?, duration = ?, is_recurring = ?, recurrence_days = ?
        WHERE id = ?
        "#,
    )
    .bind(&event.name)
    .bind(event.start_datetime)
    .bind(event.duration)
    .bind(event.is_recurring)
    .bind(event.recurrence_days.clone().map(Json))
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete an event. Returns false if no row has that id.
pub async fn delete_event(pool: &SqlitePool, id: EventId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
