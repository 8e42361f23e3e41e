use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::{Event, EventFilter, EventRow, NewEvent, WGS84_SRID};

/// Persistence seam used by the HTTP handlers. Every method issues a
/// single statement and hands the store's error back untouched.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Current time according to the store.
    async fn now(&self) -> Result<DateTime<Utc>, sqlx::Error>;

    async fn create(&self, event: &NewEvent) -> Result<Event, sqlx::Error>;

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, sqlx::Error>;

    /// Returns `false` when no row has this id.
    async fn rename(&self, id: i64, title: Option<&str>) -> Result<bool, sqlx::Error>;

    /// Returns the number of removed rows (0 or 1).
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
}

const EVENT_COLUMNS: &str = "id::bigint AS id, title, description, topluluk, \
     ST_AsGeoJSON(location)::json AS geometry, image_url, created_at, updated_at";

/// Escapes `%`, `_` and `\` so user text matches literally inside `ILIKE`.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn now(&self) -> Result<DateTime<Utc>, sqlx::Error> {
        let (now,): (DateTime<Utc>,) = sqlx::query_as("SELECT NOW()")
            .fetch_one(&self.pool)
            .await?;
        Ok(now)
    }

    async fn create(&self, event: &NewEvent) -> Result<Event, sqlx::Error> {
        let sql = format!(
            "INSERT INTO events (title, description, topluluk, location, image_url) \
             VALUES ($1, $2, $3, ST_SetSRID(ST_MakePoint($4, $5), $6), $7) \
             RETURNING {EVENT_COLUMNS}"
        );

        // ST_MakePoint takes longitude first.
        let row: EventRow = sqlx::query_as(&sql)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.topluluk)
            .bind(event.lng)
            .bind(event.lat)
            .bind(WGS84_SRID)
            .bind(&event.image_url)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(id = row.id, "Inserted event");
        Ok(row.into())
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, sqlx::Error> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE ($1::text IS NULL OR topluluk = $1) \
               AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%' ESCAPE '\\') \
             ORDER BY id"
        );

        let rows: Vec<EventRow> = sqlx::query_as(&sql)
            .bind(&filter.topluluk)
            .bind(filter.q.as_deref().map(escape_like))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn rename(&self, id: i64, title: Option<&str>) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE events SET title = $1, updated_at = NOW() WHERE id = $2")
            .bind(title)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
