//! Relational record store for provisioned base stations

pub mod station;

use crate::error::Result;
use sqlx::sqlite::SqlitePool;
use tracing::info;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS base_stations (
    node_id           INTEGER PRIMARY KEY,
    network_id        INTEGER NOT NULL,
    network_name      TEXT NOT NULL,
    streaming_enabled BOOLEAN NOT NULL
)";

/// Open the record store and apply the schema
pub async fn connect(url: &str) -> Result<SqlitePool> {
    let pool = SqlitePool::connect(url).await?;
    migrate(&pool).await?;
    info!("Record store ready");
    Ok(pool)
}

/// Apply the schema to an existing pool (idempotent)
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}
