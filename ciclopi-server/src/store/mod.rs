//! Persistent per-chat state: preferences and favorite-station order.
//!
//! Backed by SQLite through sqlx. Each chat's rows are partitioned by
//! chat id, so cross-chat operations never conflict; the multi-step rank
//! swap runs inside one transaction (see `custom_order`).

mod custom_order;
mod error;
mod preferences;

pub use custom_order::{Direction, MoveOutcome, ToggleOutcome};
pub use error::StoreError;

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS chat_preference (
    chat_id          INTEGER PRIMARY KEY,
    sorting          INTEGER NOT NULL DEFAULT 0,
    latitude         REAL,
    longitude        REAL,
    stations_to_show INTEGER NOT NULL DEFAULT 5
);

CREATE TABLE IF NOT EXISTS custom_order (
    chat_id    INTEGER NOT NULL,
    station_id INTEGER NOT NULL,
    rank       INTEGER NOT NULL,
    PRIMARY KEY (chat_id, station_id)
);
"#;

/// Handle to the persistent store.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if missing) a file-backed store.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let store = Self { pool };
        store.bootstrap().await?;
        Ok(store)
    }

    /// Open an in-memory store (tests and throwaway runs).
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        // A single connection, kept alive: each in-memory connection is
        // its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::new().in_memory(true))
            .await?;

        let store = Self { pool };
        store.bootstrap().await?;
        Ok(store)
    }

    /// Create tables that do not exist yet.
    async fn bootstrap(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
