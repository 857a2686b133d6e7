//! Catalog persistence: the store contract and its backends.

use crate::domain::model::{seed_houses, CatalogItem, ItemFields};
use crate::infra::config::{AppConfig, StoreBackend};
use async_trait::async_trait;
use std::sync::Arc;

pub mod memory;
pub mod postgres;

pub use memory::MemoryCatalogStore;
pub use postgres::PostgresCatalogStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("item '{0}' not found")]
    NotFound(String),
    #[error("{operation} failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl StoreError {
    pub fn backend(operation: &'static str, source: impl Into<anyhow::Error>) -> Self {
        StoreError::Backend {
            operation,
            source: source.into(),
        }
    }
}

/// Contract shared by every catalog backend.
///
/// The HTTP layer only ever sees `Arc<dyn CatalogStore>`, so the in-memory store and the
/// Postgres document collection are interchangeable.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Returns all items in insertion order.
    async fn list(&self) -> Result<Vec<CatalogItem>, StoreError>;

    async fn get(&self, id: &str) -> Result<CatalogItem, StoreError>;

    /// Assigns a fresh identifier and stores the item.
    async fn create(
        &self,
        fields: ItemFields,
        main_image: Option<String>,
    ) -> Result<CatalogItem, StoreError>;

    /// Overwrites the validated fields of an existing item. `main_image = None` keeps the
    /// current image. Never creates an item.
    async fn replace(
        &self,
        id: &str,
        fields: ItemFields,
        main_image: Option<String>,
    ) -> Result<CatalogItem, StoreError>;

    /// Removes the item and returns what was removed.
    async fn delete(&self, id: &str) -> Result<CatalogItem, StoreError>;

    /// Liveness check used by `/health`.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Builds the backend selected by `config`.
pub async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn CatalogStore>> {
    match config.backend {
        StoreBackend::Memory => {
            let items = if config.seed_fixtures {
                seed_houses()
            } else {
                Vec::new()
            };
            Ok(Arc::new(MemoryCatalogStore::with_items(items)))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set for the postgres backend"))?;
            let store = PostgresCatalogStore::connect(url, config.db_max_connections).await?;
            Ok(Arc::new(store))
        }
    }
}
