//! BaseStation rows and their queries
//!
//! One row per provisioned node. `node_id` is caller-assigned and acts as
//! the primary key; `save` is an upsert on it, so repeating a request for
//! the same node never duplicates the row.

use crate::error::Result;
use sqlx::sqlite::SqlitePool;

/// A persisted record of one provisioned base station
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BaseStation {
    pub node_id: i64,
    pub network_id: i64,
    pub network_name: String,
    pub streaming_enabled: bool,
}

/// Insert or update the record for a node
pub async fn save(pool: &SqlitePool, station: &BaseStation) -> Result<()> {
    sqlx::query(
        "INSERT INTO base_stations (node_id, network_id, network_name, streaming_enabled)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(node_id) DO UPDATE SET
             network_id = excluded.network_id,
             network_name = excluded.network_name,
             streaming_enabled = excluded.streaming_enabled",
    )
    .bind(station.node_id)
    .bind(station.network_id)
    .bind(&station.network_name)
    .bind(station.streaming_enabled)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch the record for a node, if any
pub async fn find(pool: &SqlitePool, node_id: i64) -> Result<Option<BaseStation>> {
    let row = sqlx::query_as::<_, BaseStation>(
        "SELECT node_id, network_id, network_name, streaming_enabled
         FROM base_stations WHERE node_id = ?1",
    )
    .bind(node_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Number of persisted records
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM base_stations")
        .fetch_one(pool)
        .await?;

    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use sqlx::sqlite::SqlitePoolOptions;

    // A pooled ":memory:" database exists per connection; cap the pool at
    // one connection so every query sees the same database.
    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::migrate(&pool).await.unwrap();
        pool
    }

    fn station_seven() -> BaseStation {
        BaseStation {
            node_id: 7,
            network_id: 3,
            network_name: "net-a".to_string(),
            streaming_enabled: true,
        }
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let pool = memory_pool().await;

        save(&pool, &station_seven()).await.unwrap();

        let found = find(&pool, 7).await.unwrap().unwrap();
        assert_eq!(found, station_seven());
        assert!(find(&pool, 8).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_is_idempotent_on_node_id() {
        let pool = memory_pool().await;

        save(&pool, &station_seven()).await.unwrap();

        let updated = BaseStation {
            network_id: 9,
            streaming_enabled: false,
            ..station_seven()
        };
        save(&pool, &updated).await.unwrap();

        assert_eq!(count(&pool).await.unwrap(), 1);
        let found = find(&pool, 7).await.unwrap().unwrap();
        assert_eq!(found.network_id, 9);
        assert!(!found.streaming_enabled);
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let pool = memory_pool().await;
        db::migrate(&pool).await.unwrap();
        assert_eq!(count(&pool).await.unwrap(), 0);
    }
}
