use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::store::{EntityStore, StoreError};

/// PostgreSQL-backed entity store.
///
/// Entities live in a single `entities` table keyed by `(kind, id)` with a
/// JSONB document per row; `kind` gives each entity type its logical table.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect with the shared pool configuration.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = crate::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn load_raw(&self, kind: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let row: Option<Value> =
            sqlx::query_scalar("SELECT data FROM entities WHERE kind = $1 AND id = $2")
                .bind(kind)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn save_raw(&self, kind: &str, id: &str, data: Value) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO entities (kind, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (kind, id) DO UPDATE
            SET data = EXCLUDED.data, updated_at = now()
            "#,
        )
        .bind(kind)
        .bind(id)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_raw(&self, kind: &str, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM entities WHERE kind = $1 AND id = $2")
            .bind(kind)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn all_raw(&self, kind: &str) -> Result<Vec<Value>, StoreError> {
        let rows: Vec<Value> =
            sqlx::query_scalar("SELECT data FROM entities WHERE kind = $1 ORDER BY id")
                .bind(kind)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }
}
