use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

pub mod events;
#[cfg(test)]
pub mod memory;

pub use events::{EventStore, PgEventStore};

use crate::config::Config;

pub async fn init_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database_url)
        .await
}
