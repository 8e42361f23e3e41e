use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::EventStore;
use crate::models::{Event, EventFilter, NewEvent};

/// In-process stand-in for the PostGIS table, used by the router tests.
#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<Event>>,
    next_id: Mutex<i64>,
    offline: AtomicBool,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail like a dropped connection.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), sqlx::Error> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("connection refused".into()));
        }
        Ok(())
    }
}

fn not_null_violation() -> sqlx::Error {
    sqlx::Error::Protocol(
        "null value in column \"title\" of relation \"events\" violates not-null constraint"
            .into(),
    )
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn now(&self) -> Result<DateTime<Utc>, sqlx::Error> {
        self.check_online()?;
        Ok(Utc::now())
    }

    async fn create(&self, event: &NewEvent) -> Result<Event, sqlx::Error> {
        self.check_online()?;
        let title = event.title.clone().ok_or_else(not_null_violation)?;

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let now = Utc::now();
        let geometry = event.location();
        let created = Event {
            id: *next_id,
            etkinlik_name: title.clone(),
            title,
            description: event.description.clone(),
            topluluk: event.topluluk.clone(),
            lat: Some(geometry.lat()),
            lng: Some(geometry.lng()),
            geometry: Some(geometry),
            image_url: event.image_url.clone(),
            created_at: now,
            updated_at: now,
        };

        self.events.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, sqlx::Error> {
        self.check_online()?;
        let events = self.events.lock().unwrap();
        Ok(events.iter().filter(|e| filter.matches(e)).cloned().collect())
    }

    async fn rename(&self, id: i64, title: Option<&str>) -> Result<bool, sqlx::Error> {
        self.check_online()?;
        let mut events = self.events.lock().unwrap();
        let Some(event) = events.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        let title = title.ok_or_else(not_null_violation)?;

        event.title = title.to_string();
        event.etkinlik_name = title.to_string();
        event.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.check_online()?;
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| e.id != id);
        Ok((before - events.len()) as u64)
    }
}
