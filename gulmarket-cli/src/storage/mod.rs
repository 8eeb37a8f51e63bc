//! SQLite-backed persistence
//!
//! The deliveries relation is append-only: inserts and bulk reads only,
//! no updates or deletes. The schema is applied idempotently on connect.

pub mod deliveries;

use std::path::Path;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS deliveries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    farm_box TEXT NOT NULL,
    box_type TEXT NOT NULL,
    box_size TEXT NOT NULL,
    mixed TEXT NOT NULL,
    species TEXT NOT NULL,
    product TEXT NOT NULL,
    color TEXT NOT NULL,
    length TEXT NOT NULL,
    price REAL NOT NULL CHECK (price >= 0),
    boxes INTEGER NOT NULL CHECK (boxes >= 0),
    packing INTEGER NOT NULL CHECK (packing >= 0),
    spreadsheet_id TEXT NOT NULL
);
"#;

/// Open (creating if needed) the database at `path` and apply the schema.
pub async fn connect(path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database: {}", path.display()))?;

    migrate(&pool).await?;

    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA)
        .execute(pool)
        .await
        .context("Failed to apply database schema")?;

    Ok(())
}

/// In-memory database for tests. A single never-reaped connection, so the
/// schema survives for the pool's whole lifetime.
#[cfg(test)]
pub(crate) async fn open_in_memory() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(SqliteConnectOptions::new().in_memory(true))
        .await
        .unwrap();

    migrate(&pool).await.unwrap();

    pool
}
