//! Process-local catalog backend.

use super::{CatalogStore, StoreError};
use crate::domain::model::{CatalogItem, ItemFields};
use async_trait::async_trait;
use tokio::sync::RwLock;

struct Inner {
    items: Vec<CatalogItem>,
    next_id: u64,
}

/// Ordered in-memory collection. Writers are serialized by the lock; identifiers come from a
/// counter that is never rewound, so ids stay unique after deletes.
pub struct MemoryCatalogStore {
    inner: RwLock<Inner>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Builds a store pre-populated with `items` (no validation is applied).
    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        let next_id = items
            .iter()
            .filter_map(|item| item.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            inner: RwLock::new(Inner { items, next_id }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list(&self) -> Result<Vec<CatalogItem>, StoreError> {
        Ok(self.inner.read().await.items.clone())
    }

    async fn get(&self, id: &str) -> Result<CatalogItem, StoreError> {
        let inner = self.inner.read().await;
        inner
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn create(
        &self,
        fields: ItemFields,
        main_image: Option<String>,
    ) -> Result<CatalogItem, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id.to_string();
        inner.next_id += 1;
        let item = CatalogItem::from_fields(id, fields, main_image);
        inner.items.push(item.clone());
        Ok(item)
    }

    async fn replace(
        &self,
        id: &str,
        fields: ItemFields,
        main_image: Option<String>,
    ) -> Result<CatalogItem, StoreError> {
        let mut inner = self.inner.write().await;
        let item = inner
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        item.apply(fields, main_image);
        Ok(item.clone())
    }

    async fn delete(&self, id: &str) -> Result<CatalogItem, StoreError> {
        let mut inner = self.inner.write().await;
        let pos = inner
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(inner.items.remove(pos))
    }
}
