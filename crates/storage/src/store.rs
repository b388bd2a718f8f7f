use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors surfaced by entity store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A persistable projection entity. `KIND` names the logical table; ids are
/// deterministic functions of event data, so saves are replay-safe upserts.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// Keyed, schema-typed persistent store: one logical table per entity kind,
/// load-by-key, upsert and delete. The unit of persistence is an explicit
/// save after every mutation.
///
/// Implementations work on raw JSON documents so the trait stays
/// object-safe; typed access goes through [`EntityStoreExt`].
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn load_raw(&self, kind: &str, id: &str) -> Result<Option<Value>, StoreError>;

    async fn save_raw(&self, kind: &str, id: &str, data: Value) -> Result<(), StoreError>;

    async fn remove_raw(&self, kind: &str, id: &str) -> Result<(), StoreError>;

    /// Full scan of one kind. Used by cascading clears and the read API;
    /// expected cardinalities are small.
    async fn all_raw(&self, kind: &str) -> Result<Vec<Value>, StoreError>;
}

/// Typed convenience layer over [`EntityStore`].
#[async_trait]
pub trait EntityStoreExt: EntityStore {
    async fn load<T: Entity>(&self, id: &str) -> Result<Option<T>, StoreError> {
        match self.load_raw(T::KIND, id).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn save<T: Entity>(&self, entity: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(entity)?;
        self.save_raw(T::KIND, entity.id(), value).await
    }

    async fn remove<T: Entity>(&self, id: &str) -> Result<(), StoreError> {
        self.remove_raw(T::KIND, id).await
    }

    async fn all<T: Entity>(&self) -> Result<Vec<T>, StoreError> {
        self.all_raw(T::KIND)
            .await?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(StoreError::from))
            .collect()
    }
}

#[async_trait]
impl<S: EntityStore + ?Sized> EntityStoreExt for S {}

#[async_trait]
impl<S: EntityStore + ?Sized> EntityStore for std::sync::Arc<S> {
    async fn load_raw(&self, kind: &str, id: &str) -> Result<Option<Value>, StoreError> {
        (**self).load_raw(kind, id).await
    }

    async fn save_raw(&self, kind: &str, id: &str, data: Value) -> Result<(), StoreError> {
        (**self).save_raw(kind, id, data).await
    }

    async fn remove_raw(&self, kind: &str, id: &str) -> Result<(), StoreError> {
        (**self).remove_raw(kind, id).await
    }

    async fn all_raw(&self, kind: &str) -> Result<Vec<Value>, StoreError> {
        (**self).all_raw(kind).await
    }
}

// ─── MemoryStore ────────────────────────────────────────────────────────────

/// In-memory entity store. Backs every unit and integration test; also usable
/// for one-shot replays that do not need durability.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn load_raw(&self, kind: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.get(kind).and_then(|table| table.get(id)).cloned())
    }

    async fn save_raw(&self, kind: &str, id: &str, data: Value) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables
            .entry(kind.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn remove_raw(&self, kind: &str, id: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(table) = tables.get_mut(kind) {
            table.remove(id);
        }
        Ok(())
    }

    async fn all_raw(&self, kind: &str) -> Result<Vec<Value>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(kind)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default())
    }
}
